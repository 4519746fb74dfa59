//! Bind values carried by criteria builders.
//!
//! Values are stored behind an `Arc` so builders stay cheap to clone and
//! compiling a cause never copies the underlying data.

use std::fmt;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A clone-friendly parameter wrapper using Arc.
#[derive(Clone)]
pub struct Param(pub(crate) Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Create a new parameter from any ToSql value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Get a reference to the inner value as a ToSql trait object.
    pub fn as_ref(&self) -> &(dyn ToSql + Sync) {
        &*self.0 as &(dyn ToSql + Sync)
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ToSql requires Debug, so show the bound value itself.
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// One positional argument of a compiled predicate.
///
/// An argument binds to exactly one `?` placeholder. A [`Arg::List`] is
/// expanded to `($1, $2, ...)` when the statement is rendered, which is what
/// `field in ?` relies on.
#[derive(Clone)]
pub enum Arg {
    /// A single bound value.
    Scalar(Param),
    /// A list of bound values.
    List(Vec<Param>),
}

impl Arg {
    /// Wrap a single value.
    pub fn scalar<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Arg::Scalar(Param::new(value))
    }

    /// Wrap a collection of values as one list argument.
    pub fn list<T, I>(values: I) -> Self
    where
        T: ToSql + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
    {
        Arg::List(values.into_iter().map(Param::new).collect())
    }

    /// Whether this argument is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Arg::List(_))
    }
}

impl<T: ToSql + Send + Sync + 'static> From<T> for Arg {
    fn from(value: T) -> Self {
        Arg::scalar(value)
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Scalar(p) => fmt::Debug::fmt(p, f),
            Arg::List(items) => f.debug_list().entries(items).finish(),
        }
    }
}

/// Build a `Vec<Arg>` from heterogeneous values.
///
/// Plain values become [`Arg::Scalar`]; an existing [`Arg`] (for example
/// `Arg::list(ids)`) is passed through unchanged.
///
/// ```ignore
/// let cause = criteria::expr("age between ? and ?", args![18, 65]);
/// let cause = criteria::in_values("id", args![1i64, 2i64, 3i64]);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($value)),+]
    };
}

/// A collection of parameters that can be built into references.
#[derive(Clone, Debug, Default)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a pre-wrapped Param and return its 1-based index.
    pub fn push_param(&mut self, param: Param) -> usize {
        self.params.push(param);
        self.params.len()
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get all parameters as references for tokio-postgres.
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }

    /// Iterate over the collected parameters.
    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.params.iter()
    }
}
