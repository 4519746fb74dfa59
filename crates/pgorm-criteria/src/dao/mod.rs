//! Generic data-access operations over an [`Executor`].
//!
//! Every operation builds a [`Scope`] from the model's [`Table`] metadata and
//! an optional [`Cause`]/[`Update`], hands it to the executor, and maps the
//! returned rows with [`FromRow`]. `None` means "match everything". No state
//! is kept between calls.
//!
//! ```ignore
//! use pgorm_criteria::{PgExecutor, criteria, dao};
//! use pgorm_criteria::prelude::*;
//!
//! let exec = PgExecutor::new(&client);
//!
//! let user: Option<User> = dao::find_by_id(&exec, 42i64).await?;
//! let page = dao::page::<User, _>(
//!     &exec,
//!     0,
//!     20,
//!     Some(criteria::eq("status", "active").desc(["created_at"])),
//! )
//! .await?;
//! let archived = dao::update::<User, _>(
//!     &exec,
//!     Some(criteria::set("status", "archived").lt("last_seen_year", 2020i32)),
//! )
//! .await?;
//! ```

mod executor;
mod pg;
mod render;
mod scope;

pub use executor::{Executor, Table};
pub use pg::PgExecutor;
pub use scope::Scope;

use std::collections::HashMap;
use std::hash::Hash;

use crate::criteria::{self, Cause, Update};
use crate::error::{OrmError, OrmResult};
use crate::row::FromRow;
use tokio_postgres::types::ToSql;

/// One page of rows plus the number of rows matching the predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Rows matching the predicate, ignoring ordering and bounds.
    pub total: i64,
    pub rows: Vec<T>,
}

fn scoped<T: Table>(cause: Option<&Cause>) -> Scope {
    match cause {
        Some(cause) => Scope::of::<T>().query(cause),
        None => Scope::of::<T>(),
    }
}

fn map_rows<T, R>(rows: &[R]) -> OrmResult<Vec<T>>
where
    T: FromRow<R>,
{
    rows.iter().map(T::from_row).collect()
}

/// Load the row whose primary key equals `id`.
pub async fn find_by_id<T, E, K>(exec: &E, id: K) -> OrmResult<Option<T>>
where
    E: Executor,
    T: Table + FromRow<E::Row>,
    K: ToSql + Send + Sync + 'static,
{
    find_one(exec, Some(criteria::eq(T::ID, id))).await
}

/// Load rows whose primary key is in `ids`.
///
/// An empty `ids` returns no rows without touching the executor.
pub async fn find_by_ids<T, E, K>(
    exec: &E,
    ids: impl IntoIterator<Item = K>,
) -> OrmResult<Vec<T>>
where
    E: Executor,
    T: Table + FromRow<E::Row>,
    K: ToSql + Send + Sync + 'static,
{
    let ids: Vec<K> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let scope = Scope::of::<T>().query(&criteria::in_list(T::ID, ids));
    let rows = exec.find(&scope).await?;
    map_rows(&rows)
}

/// Load the first row matching the predicate. Ordering on `cause` is ignored.
pub async fn find_one<T, E>(exec: &E, cause: Option<Cause>) -> OrmResult<Option<T>>
where
    E: Executor,
    T: Table + FromRow<E::Row>,
{
    let scope = scoped::<T>(cause.as_ref()).limit(1);
    let rows = exec.find(&scope).await?;
    rows.first().map(T::from_row).transpose()
}

/// Load every row matching the predicate, in the cause's order.
pub async fn find_all<T, E>(exec: &E, cause: Option<Cause>) -> OrmResult<Vec<T>>
where
    E: Executor,
    T: Table + FromRow<E::Row>,
{
    let scope = match &cause {
        Some(cause) => Scope::of::<T>().query_and_order(cause),
        None => Scope::of::<T>(),
    };
    let rows = exec.find(&scope).await?;
    map_rows(&rows)
}

/// Load one page of rows.
///
/// `page` is zero-based. The total is counted over the predicate alone; the
/// rows are then loaded with the cause's ordering, `offset(page * page_size)`
/// and `limit(page_size)`. A page past the end yields no rows.
///
/// Returns a validation error when `page_size` is zero or the offset
/// overflows.
pub async fn page<T, E>(
    exec: &E,
    page: u64,
    page_size: u64,
    cause: Option<Cause>,
) -> OrmResult<Page<T>>
where
    E: Executor,
    T: Table + FromRow<E::Row>,
{
    if page_size == 0 {
        return Err(OrmError::validation("page size must be greater than zero"));
    }
    let offset = page.checked_mul(page_size).ok_or_else(|| {
        OrmError::validation(format!("page offset overflows: {page} * {page_size}"))
    })?;

    let total = exec.count(&scoped::<T>(cause.as_ref())).await?;

    let scope = match &cause {
        Some(cause) => Scope::of::<T>().query_and_order(cause),
        None => Scope::of::<T>(),
    }
    .offset(offset)
    .limit(page_size);
    let rows = exec.find(&scope).await?;

    Ok(Page {
        total,
        rows: map_rows(&rows)?,
    })
}

/// Delete rows matching the predicate; `None` deletes every row of the table.
pub async fn delete<T, E>(exec: &E, cause: Option<Cause>) -> OrmResult<u64>
where
    E: Executor,
    T: Table,
{
    let scope = match &cause {
        Some(cause) => Scope::new(T::TABLE).query(cause),
        None => Scope::new(T::TABLE),
    };
    exec.delete(&scope).await
}

/// Apply an update's assignments to the rows its predicate matches.
///
/// `None`, or an update with nothing to set, affects no rows and does not
/// touch the executor.
pub async fn update<T, E>(exec: &E, update: Option<Update>) -> OrmResult<u64>
where
    E: Executor,
    T: Table,
{
    let Some(update) = update else {
        return Ok(0);
    };
    if update.is_noop() {
        return Ok(0);
    }
    let (cause, assignments) = update.into_parts();
    let scope = Scope::new(T::TABLE).query(&cause);
    exec.update(&scope, &assignments).await
}

/// Map primary key to `field` for every row matching the predicate.
///
/// Selects `(T::ID, field)`. A column whose database type does not match
/// `K` or `V` fails with [`OrmError::Decode`].
pub async fn get_field_map<T, E, K, V>(
    exec: &E,
    field: &str,
    cause: Option<Cause>,
) -> OrmResult<HashMap<K, V>>
where
    E: Executor,
    T: Table,
    K: Eq + Hash,
    (K, V): FromRow<E::Row>,
{
    let scope = Scope::new(T::TABLE).select([T::ID, field]);
    let scope = match &cause {
        Some(cause) => scope.query(cause),
        None => scope,
    };
    let rows = exec.find(&scope).await?;
    rows.iter().map(<(K, V)>::from_row).collect()
}

#[cfg(test)]
mod tests;
