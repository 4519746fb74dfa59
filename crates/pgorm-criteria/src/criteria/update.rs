//! Mutation builder: a predicate plus a column assignment map.

use std::collections::BTreeMap;

use crate::criteria::cause::Cause;
use crate::criteria::compile::Compiled;
use crate::criteria::fluent::Criteria;
use crate::param::{Arg, Param};
use tokio_postgres::types::ToSql;

/// Right-hand side of a `SET column = ...` assignment.
#[derive(Clone, Debug)]
pub enum Assignment {
    /// Parameterized literal value.
    Value(Param),
    /// Raw SQL expression with its own `?` arguments, e.g. `views + ?`.
    Expr { sql: String, args: Vec<Arg> },
}

/// Column assignments keyed by column name.
///
/// Ordered by column so the rendered `SET` list is stable.
pub type Assignments = BTreeMap<String, Assignment>;

/// A row mutation: which rows (the wrapped [`Cause`]) and what to set.
///
/// All [`Criteria`] operations are available to scope the rows:
///
/// ```ignore
/// use pgorm_criteria::prelude::*;
///
/// let update = Update::default()
///     .set("status", "archived")
///     .set_expr("version", "version + ?", args![1i32])
///     .eq("id", 42i64);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Update {
    cause: Cause,
    assignments: Assignments,
}

impl Update {
    /// Create an update scoped by the given causes, ANDed together.
    ///
    /// Follows [`Criteria::and`]: an empty cause among them drops all of them.
    pub fn new(causes: impl IntoIterator<Item = Cause>) -> Self {
        Self {
            cause: Cause::new().and(causes),
            assignments: Assignments::new(),
        }
    }

    /// Set a column to a literal value. A later call for the same column wins.
    pub fn set<T: ToSql + Send + Sync + 'static>(mut self, field: &str, value: T) -> Self {
        self.assignments
            .insert(field.to_string(), Assignment::Value(Param::new(value)));
        self
    }

    pub fn set_if<T: ToSql + Send + Sync + 'static>(
        self,
        test: bool,
        field: &str,
        value: T,
    ) -> Self {
        if test {
            self.set(field, value)
        } else {
            self
        }
    }

    /// Set a column to a raw SQL expression.
    pub fn set_expr(
        mut self,
        field: &str,
        sql: impl Into<String>,
        args: impl IntoIterator<Item = Arg>,
    ) -> Self {
        self.assignments.insert(
            field.to_string(),
            Assignment::Expr {
                sql: sql.into(),
                args: args.into_iter().collect(),
            },
        );
        self
    }

    pub fn set_expr_if(
        self,
        test: bool,
        field: &str,
        sql: impl Into<String>,
        args: impl IntoIterator<Item = Arg>,
    ) -> Self {
        if test {
            self.set_expr(field, sql, args)
        } else {
            self
        }
    }

    /// Set a JSON column.
    pub fn set_json<T: serde::Serialize>(self, field: &str, value: &T) -> serde_json::Result<Self> {
        let json_val = serde_json::to_value(value)?;
        Ok(self.set(field, json_val))
    }

    /// The predicate scoping which rows are mutated.
    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    pub fn compile(&self) -> Compiled {
        self.cause.compile()
    }

    pub fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    /// Whether there is nothing to set.
    pub fn is_noop(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn into_parts(self) -> (Cause, Assignments) {
        (self.cause, self.assignments)
    }
}

impl Criteria for Update {
    fn cause_mut(&mut self) -> &mut Cause {
        &mut self.cause
    }
}
