//! Fluent predicate operations shared by [`Cause`] and [`Update`](crate::Update).

use crate::criteria::cause::{Cause, Join};
use crate::param::{Arg, Param};
use tokio_postgres::types::ToSql;

fn group(predicate: &str) -> String {
    format!("( {predicate} )")
}

/// Fluent predicate operations.
///
/// Every append operation has an `*_if` twin that leaves the builder untouched
/// when `test` is false, which keeps optional filters inside one chain:
///
/// ```ignore
/// use pgorm_criteria::prelude::*;
///
/// let cause = Cause::new()
///     .eq("tenant_id", tenant_id)
///     .like_if(!keyword.is_empty(), "name", format!("%{keyword}%"))
///     .in_list_if(!roles.is_empty(), "role", roles)
///     .desc(["created_at"]);
/// ```
///
/// Field arguments are emitted verbatim: they are trusted SQL, values are not.
pub trait Criteria: Sized {
    /// The predicate builder this value appends to.
    fn cause_mut(&mut self) -> &mut Cause;

    /// Append a raw SQL fragment with `?` placeholders and its arguments.
    ///
    /// Every other operation is built on this one. Each `?` in `sql` binds
    /// the next argument; write `??` for a literal `?` (JSONB `?`, `?|`, `?&`),
    /// including inside string literals:
    ///
    /// ```ignore
    /// cause.expr("tags ??| ?", args![vec!["a", "b"]]); // tags ?| $1
    /// ```
    fn expr(mut self, sql: impl Into<String>, args: impl IntoIterator<Item = Arg>) -> Self {
        self.cause_mut().push_fragment(Join::And, sql.into(), args);
        self
    }

    fn expr_if(
        self,
        test: bool,
        sql: impl Into<String>,
        args: impl IntoIterator<Item = Arg>,
    ) -> Self {
        if test {
            self.expr(sql, args)
        } else {
            self
        }
    }

    /// `field like ?`
    fn like<T: ToSql + Send + Sync + 'static>(self, field: &str, pattern: T) -> Self {
        self.expr(format!("{field} like ?"), [Arg::scalar(pattern)])
    }

    fn like_if<T: ToSql + Send + Sync + 'static>(
        self,
        test: bool,
        field: &str,
        pattern: T,
    ) -> Self {
        if test {
            self.like(field, pattern)
        } else {
            self
        }
    }

    /// `field = ?`
    fn eq<T: ToSql + Send + Sync + 'static>(self, field: &str, value: T) -> Self {
        self.expr(format!("{field} = ?"), [Arg::scalar(value)])
    }

    fn eq_if<T: ToSql + Send + Sync + 'static>(self, test: bool, field: &str, value: T) -> Self {
        if test {
            self.eq(field, value)
        } else {
            self
        }
    }

    /// `field > ?`
    fn gt<T: ToSql + Send + Sync + 'static>(self, field: &str, value: T) -> Self {
        self.expr(format!("{field} > ?"), [Arg::scalar(value)])
    }

    fn gt_if<T: ToSql + Send + Sync + 'static>(self, test: bool, field: &str, value: T) -> Self {
        if test {
            self.gt(field, value)
        } else {
            self
        }
    }

    /// `field >= ?`
    fn gte<T: ToSql + Send + Sync + 'static>(self, field: &str, value: T) -> Self {
        self.expr(format!("{field} >= ?"), [Arg::scalar(value)])
    }

    fn gte_if<T: ToSql + Send + Sync + 'static>(self, test: bool, field: &str, value: T) -> Self {
        if test {
            self.gte(field, value)
        } else {
            self
        }
    }

    /// `field < ?`
    fn lt<T: ToSql + Send + Sync + 'static>(self, field: &str, value: T) -> Self {
        self.expr(format!("{field} < ?"), [Arg::scalar(value)])
    }

    fn lt_if<T: ToSql + Send + Sync + 'static>(self, test: bool, field: &str, value: T) -> Self {
        if test {
            self.lt(field, value)
        } else {
            self
        }
    }

    /// `field <= ?`
    fn lte<T: ToSql + Send + Sync + 'static>(self, field: &str, value: T) -> Self {
        self.expr(format!("{field} <= ?"), [Arg::scalar(value)])
    }

    fn lte_if<T: ToSql + Send + Sync + 'static>(self, test: bool, field: &str, value: T) -> Self {
        if test {
            self.lte(field, value)
        } else {
            self
        }
    }

    /// `field in ?`, normalized so the result is never `IN ()`.
    ///
    /// List values are flattened into the surrounding scalars first, then:
    ///
    /// - no values left: no-op
    /// - one value: `field = ?`
    /// - two or more: `field in ?` bound to all of them as one list
    ///
    /// ```ignore
    /// cause.in_values("id", args![1i64, 2i64, 3i64]);   // id in ?  -> [[1, 2, 3]]
    /// cause.in_values("id", args![Arg::list(ids)]);     // same, from a collection
    /// cause.in_values("id", args![7i64]);               // id = ?
    /// ```
    fn in_values(self, field: &str, values: impl IntoIterator<Item = Arg>) -> Self {
        let mut flat: Vec<Param> = values
            .into_iter()
            .flat_map(|arg| match arg {
                Arg::Scalar(param) => vec![param],
                Arg::List(params) => params,
            })
            .collect();

        match flat.len() {
            0 => self,
            1 => self.expr(format!("{field} = ?"), flat.pop().map(Arg::Scalar)),
            _ => self.expr(format!("{field} in ?"), [Arg::List(flat)]),
        }
    }

    fn in_values_if(self, test: bool, field: &str, values: impl IntoIterator<Item = Arg>) -> Self {
        if test {
            self.in_values(field, values)
        } else {
            self
        }
    }

    /// `field in ?` over a homogeneous collection. Same normalization as
    /// [`Criteria::in_values`].
    fn in_list<T, I>(self, field: &str, values: I) -> Self
    where
        T: ToSql + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
    {
        self.in_values(field, [Arg::list(values)])
    }

    fn in_list_if<T, I>(self, test: bool, field: &str, values: I) -> Self
    where
        T: ToSql + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
    {
        if test {
            self.in_list(field, values)
        } else {
            self
        }
    }

    /// `field in (<subquery>)` with the subquery's own arguments.
    fn in_sql(self, field: &str, subquery: &str, args: impl IntoIterator<Item = Arg>) -> Self {
        self.expr(format!("{field} in ({subquery})"), args)
    }

    fn in_sql_if(
        self,
        test: bool,
        field: &str,
        subquery: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Self {
        if test {
            self.in_sql(field, subquery, args)
        } else {
            self
        }
    }

    /// AND each cause in as a parenthesized group.
    ///
    /// All-or-nothing: if no cause is given, or any of them has an empty
    /// predicate, the whole call is dropped, non-empty siblings included.
    /// Sort directives of the sub-causes are ignored.
    fn and(mut self, causes: impl IntoIterator<Item = Cause>) -> Self {
        let compiled: Vec<_> = causes.into_iter().map(|c| c.compile()).collect();
        if compiled.is_empty() || compiled.iter().any(|c| c.is_empty()) {
            return self;
        }

        let cause = self.cause_mut();
        for sub in compiled {
            cause.push_fragment(Join::And, group(&sub.predicate), sub.args);
        }
        self
    }

    /// OR a cause in as a parenthesized group. An empty cause is skipped.
    fn or(mut self, cause: Cause) -> Self {
        let sub = cause.compile();
        if sub.is_empty() {
            return self;
        }
        self.cause_mut()
            .push_fragment(Join::Or, group(&sub.predicate), sub.args);
        self
    }

    /// Append ascending sort directives.
    fn asc<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        let cause = self.cause_mut();
        for field in fields {
            cause.push_order(field.into());
        }
        self
    }

    /// Append descending sort directives (`field desc`).
    fn desc<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        let cause = self.cause_mut();
        for field in fields {
            cause.push_order(format!("{} desc", field.into()));
        }
        self
    }
}
