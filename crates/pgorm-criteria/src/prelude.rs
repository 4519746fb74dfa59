//! Convenient imports for typical `pgorm-criteria` usage.
//!
//! ```ignore
//! use pgorm_criteria::prelude::*;
//! ```

pub use crate::args;
pub use crate::{Arg, Cause, Criteria, Update};
pub use crate::{Executor, FromRow, GenericClient, OrmError, OrmResult, PgExecutor, RowExt, Table};
