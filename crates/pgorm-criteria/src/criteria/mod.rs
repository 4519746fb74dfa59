//! Predicate and mutation builders.
//!
//! A [`Cause`] collects `WHERE` fragments with `?` placeholders, their
//! positional arguments, and `ORDER BY` directives. [`Update`] wraps a cause
//! and adds column assignments. Both are compiled into plain strings plus
//! arguments; nothing here talks to a database.
//!
//! The free functions in this module start a new builder, for one-shot use:
//!
//! ```ignore
//! use pgorm_criteria::criteria;
//! use pgorm_criteria::prelude::*;
//!
//! let active = criteria::eq("status", "active");
//! let adults = criteria::gte("age", 18i32).lt("age", 65i32);
//! let either = criteria::or([active, adults]);
//! ```

mod cause;
mod compile;
mod fluent;
mod update;

pub use cause::{Cause, Fragment, Join};
pub use compile::{Compiled, compile};
pub use fluent::Criteria;
pub use update::{Assignment, Assignments, Update};

use crate::param::Arg;
use tokio_postgres::types::ToSql;

/// Create an empty cause.
pub fn new() -> Cause {
    Cause::new()
}

pub fn expr(sql: impl Into<String>, args: impl IntoIterator<Item = Arg>) -> Cause {
    Cause::new().expr(sql, args)
}

pub fn expr_if(test: bool, sql: impl Into<String>, args: impl IntoIterator<Item = Arg>) -> Cause {
    Cause::new().expr_if(test, sql, args)
}

pub fn like<T: ToSql + Send + Sync + 'static>(field: &str, pattern: T) -> Cause {
    Cause::new().like(field, pattern)
}

pub fn like_if<T: ToSql + Send + Sync + 'static>(test: bool, field: &str, pattern: T) -> Cause {
    Cause::new().like_if(test, field, pattern)
}

pub fn eq<T: ToSql + Send + Sync + 'static>(field: &str, value: T) -> Cause {
    Cause::new().eq(field, value)
}

pub fn eq_if<T: ToSql + Send + Sync + 'static>(test: bool, field: &str, value: T) -> Cause {
    Cause::new().eq_if(test, field, value)
}

pub fn gt<T: ToSql + Send + Sync + 'static>(field: &str, value: T) -> Cause {
    Cause::new().gt(field, value)
}

pub fn gt_if<T: ToSql + Send + Sync + 'static>(test: bool, field: &str, value: T) -> Cause {
    Cause::new().gt_if(test, field, value)
}

pub fn gte<T: ToSql + Send + Sync + 'static>(field: &str, value: T) -> Cause {
    Cause::new().gte(field, value)
}

pub fn gte_if<T: ToSql + Send + Sync + 'static>(test: bool, field: &str, value: T) -> Cause {
    Cause::new().gte_if(test, field, value)
}

pub fn lt<T: ToSql + Send + Sync + 'static>(field: &str, value: T) -> Cause {
    Cause::new().lt(field, value)
}

pub fn lt_if<T: ToSql + Send + Sync + 'static>(test: bool, field: &str, value: T) -> Cause {
    Cause::new().lt_if(test, field, value)
}

pub fn lte<T: ToSql + Send + Sync + 'static>(field: &str, value: T) -> Cause {
    Cause::new().lte(field, value)
}

pub fn lte_if<T: ToSql + Send + Sync + 'static>(test: bool, field: &str, value: T) -> Cause {
    Cause::new().lte_if(test, field, value)
}

pub fn in_values(field: &str, values: impl IntoIterator<Item = Arg>) -> Cause {
    Cause::new().in_values(field, values)
}

pub fn in_values_if(test: bool, field: &str, values: impl IntoIterator<Item = Arg>) -> Cause {
    Cause::new().in_values_if(test, field, values)
}

pub fn in_list<T, I>(field: &str, values: I) -> Cause
where
    T: ToSql + Send + Sync + 'static,
    I: IntoIterator<Item = T>,
{
    Cause::new().in_list(field, values)
}

pub fn in_list_if<T, I>(test: bool, field: &str, values: I) -> Cause
where
    T: ToSql + Send + Sync + 'static,
    I: IntoIterator<Item = T>,
{
    Cause::new().in_list_if(test, field, values)
}

pub fn in_sql(field: &str, subquery: &str, args: impl IntoIterator<Item = Arg>) -> Cause {
    Cause::new().in_sql(field, subquery, args)
}

pub fn in_sql_if(
    test: bool,
    field: &str,
    subquery: &str,
    args: impl IntoIterator<Item = Arg>,
) -> Cause {
    Cause::new().in_sql_if(test, field, subquery, args)
}

/// AND the causes together as parenthesized groups. See [`Criteria::and`].
pub fn and(causes: impl IntoIterator<Item = Cause>) -> Cause {
    Cause::new().and(causes)
}

/// OR the causes together.
///
/// No cause gives an empty cause and a single cause is returned as-is.
/// Otherwise every non-empty cause becomes a parenthesized group:
/// `( a ) or ( b )`.
pub fn or(causes: impl IntoIterator<Item = Cause>) -> Cause {
    let mut causes: Vec<Cause> = causes.into_iter().collect();
    match causes.len() {
        0 => Cause::new(),
        1 => causes.pop().unwrap_or_default(),
        _ => causes
            .into_iter()
            .fold(Cause::new(), |acc, cause| acc.or(cause)),
    }
}

pub fn asc<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Cause {
    Cause::new().asc(fields)
}

pub fn desc<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Cause {
    Cause::new().desc(fields)
}

/// Start an update that sets a literal value.
pub fn set<T: ToSql + Send + Sync + 'static>(field: &str, value: T) -> Update {
    Update::default().set(field, value)
}

pub fn set_if<T: ToSql + Send + Sync + 'static>(test: bool, field: &str, value: T) -> Update {
    Update::default().set_if(test, field, value)
}

pub fn set_expr(
    field: &str,
    sql: impl Into<String>,
    args: impl IntoIterator<Item = Arg>,
) -> Update {
    Update::default().set_expr(field, sql, args)
}

pub fn set_expr_if(
    test: bool,
    field: &str,
    sql: impl Into<String>,
    args: impl IntoIterator<Item = Arg>,
) -> Update {
    Update::default().set_expr_if(test, field, sql, args)
}
