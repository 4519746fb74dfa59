//! Table-bound statement description handed to an [`Executor`](super::Executor).

use crate::criteria::{Cause, Compiled};
use crate::dao::executor::Table;
use crate::param::Arg;

/// What an executor should run against: a table, an optional projection, a
/// predicate with its arguments, ordering and bounds.
///
/// A scope is plain data. Executors decide how to render it; the Postgres
/// one turns it into `SELECT`/`COUNT`/`DELETE`/`UPDATE` statements.
#[derive(Clone, Debug)]
pub struct Scope {
    table: String,
    columns: Vec<String>,
    predicate: String,
    args: Vec<Arg>,
    order: String,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Scope {
    /// An unfiltered, unordered, unbounded scope over `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            predicate: String::new(),
            args: Vec::new(),
            order: String::new(),
            limit: None,
            offset: None,
        }
    }

    /// A scope over a model's table, projecting its declared columns.
    pub fn of<T: Table>() -> Self {
        Self::new(T::TABLE).select(T::COLUMNS.iter().copied())
    }

    /// Replace the projection. No columns means `*`.
    pub fn select<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Add a predicate with its arguments.
    ///
    /// An empty predicate is a pass-through. A second predicate is ANDed with
    /// the first as `( first ) and ( second )`.
    pub fn apply_predicate(
        mut self,
        predicate: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Self {
        if predicate.is_empty() {
            return self;
        }
        if self.predicate.is_empty() {
            self.predicate = predicate.to_string();
        } else {
            self.predicate = format!("( {} ) and ( {predicate} )", self.predicate);
        }
        self.args.extend(args);
        self
    }

    /// Add an `ORDER BY` body. Empty is a no-op; otherwise it is appended
    /// after any existing ordering.
    pub fn apply_order(mut self, order: &str) -> Self {
        if order.is_empty() {
            return self;
        }
        if self.order.is_empty() {
            self.order = order.to_string();
        } else {
            self.order = format!("{}, {order}", self.order);
        }
        self
    }

    /// Apply the predicate of a cause.
    pub fn query(self, cause: &Cause) -> Self {
        let Compiled { predicate, args, .. } = cause.compile();
        self.apply_predicate(&predicate, args)
    }

    /// Apply the ordering of a cause.
    pub fn order(self, cause: &Cause) -> Self {
        self.apply_order(&cause.compile().order)
    }

    /// Apply both the predicate and the ordering of a cause.
    pub fn query_and_order(self, cause: &Cause) -> Self {
        let Compiled {
            predicate,
            args,
            order,
        } = cause.compile();
        self.apply_predicate(&predicate, args).apply_order(&order)
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// `WHERE` body; empty when the scope is unfiltered.
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// `ORDER BY` body; empty when unordered.
    pub fn order_clause(&self) -> &str {
        &self.order
    }

    pub fn row_limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn row_offset(&self) -> Option<u64> {
        self.offset
    }
}
