//! # pgorm-criteria
//!
//! Fluent `WHERE`/`ORDER BY` criteria for PostgreSQL, and a small generic
//! data-access layer that runs them.
//!
//! ## Features
//!
//! - **Fluent predicates**: chain `eq`, `gt`, `like`, `in_values`, `expr`, ... into a
//!   parameterized predicate with `?` placeholders
//! - **Optional filters**: every operation has an `*_if(test, ...)` twin
//! - **Grouping**: `and([...])` / `or(...)` nest sub-predicates as parenthesized groups
//! - **IN normalization**: empty collections are dropped, singletons become `=`; never `IN ()`
//! - **Mutations**: `Update` adds literal and raw-SQL column assignments to a predicate
//! - **Generic DAO**: `find_by_id`, `find_all`, `page`, `update`, `delete`, ... over any
//!   [`Executor`]; [`PgExecutor`] runs them on a tokio-postgres client, transaction or pool
//!
//! ## Criteria
//!
//! ```ignore
//! use pgorm_criteria::criteria;
//! use pgorm_criteria::prelude::*;
//!
//! let cause = criteria::eq("status", "active")
//!     .gt("age", 18i32)
//!     .in_list_if(!roles.is_empty(), "role", roles)
//!     .or(criteria::eq("vip", true))
//!     .desc(["created_at"]);
//!
//! let compiled = cause.compile();
//! // compiled.predicate: "status = ? and age > ? and role in ? or ( vip = ? )"
//! // compiled.order:     "created_at desc"
//! ```
//!
//! ## Data access
//!
//! ```ignore
//! use pgorm_criteria::{PgExecutor, criteria, dao};
//!
//! let exec = PgExecutor::new(&client);
//! let page = dao::page::<User, _>(&exec, 0, 20, Some(cause)).await?;
//! println!("{} users, showing {}", page.total, page.rows.len());
//! ```

pub mod client;
pub mod config;
pub mod criteria;
pub mod dao;
pub mod error;
pub mod param;
pub mod prelude;
pub mod row;

pub use client::GenericClient;
pub use config::{DangerousDmlPolicy, ExecutorConfig};
pub use criteria::{Assignment, Assignments, Cause, Compiled, Criteria, Update};
pub use dao::{Executor, Page, PgExecutor, Scope, Table};
pub use error::{OrmError, OrmResult};
pub use param::{Arg, Param, ParamList};
pub use row::{FromRow, RowExt};
