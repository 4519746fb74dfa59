//! The fragment store behind every predicate builder.

use crate::criteria::compile::{Compiled, compile};
use crate::criteria::fluent::Criteria;
use crate::param::Arg;

/// How a fragment joins the fragment before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Join {
    And,
    Or,
}

impl Join {
    /// The connective placed in front of a fragment with this join.
    pub fn separator(self) -> &'static str {
        match self {
            Join::And => " and ",
            Join::Or => " or ",
        }
    }
}

/// One atomic piece of a predicate.
#[derive(Clone, Debug)]
pub struct Fragment {
    pub(crate) join: Join,
    pub(crate) sql: String,
}

impl Fragment {
    pub fn join(&self) -> Join {
        self.join
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }
}

/// A predicate builder: ordered fragments, their positional arguments, and
/// sort directives.
///
/// `Cause` is an owned builder. Every fluent call (see [`Criteria`]) takes
/// `self` and hands it back, so a cause has a single owner while it is being
/// built and there is no shared state between links of a chain. Compiling
/// borrows it immutably and can be repeated.
///
/// # Example
/// ```ignore
/// use pgorm_criteria::prelude::*;
///
/// let cause = Cause::new()
///     .eq("status", "active")
///     .gt("age", 18i32)
///     .desc(["created_at"]);
///
/// let compiled = cause.compile();
/// assert_eq!(compiled.predicate, "status = ? and age > ?");
/// assert_eq!(compiled.order, "created_at desc");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Cause {
    pub(crate) fragments: Vec<Fragment>,
    pub(crate) args: Vec<Arg>,
    pub(crate) order: Vec<String>,
}

impl Cause {
    /// Create an empty cause (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no predicate fragment has been added.
    ///
    /// Sort directives do not count.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn sort_directives(&self) -> &[String] {
        &self.order
    }

    /// Compile into a predicate string, its arguments and an order string.
    pub fn compile(&self) -> Compiled {
        compile(self)
    }

    pub(crate) fn push_fragment(
        &mut self,
        join: Join,
        sql: String,
        args: impl IntoIterator<Item = Arg>,
    ) {
        self.fragments.push(Fragment { join, sql });
        self.args.extend(args);
    }

    pub(crate) fn push_order(&mut self, directive: String) {
        self.order.push(directive);
    }
}

impl Criteria for Cause {
    fn cause_mut(&mut self) -> &mut Cause {
        self
    }
}
