//! The query-executor seam and model table metadata.

use crate::criteria::Assignments;
use crate::dao::scope::Scope;
use crate::error::OrmResult;

/// Table metadata for a model type.
///
/// ```ignore
/// struct User { id: i64, name: String }
///
/// impl Table for User {
///     const TABLE: &'static str = "users";
///     const COLUMNS: &'static [&'static str] = &["id", "name"];
/// }
/// ```
pub trait Table {
    /// Table name, emitted verbatim.
    const TABLE: &'static str;

    /// Primary key column used by `find_by_id`, `find_by_ids` and
    /// `get_field_map`.
    const ID: &'static str = "id";

    /// Columns selected when loading rows. Empty selects `*`.
    const COLUMNS: &'static [&'static str] = &[];
}

/// An already-connected collaborator that runs scoped statements.
///
/// The crate ships [`PgExecutor`](crate::PgExecutor); anything else (a test
/// double, another driver) can implement this trait and reuse every façade
/// operation.
pub trait Executor: Send + Sync {
    /// Row representation handed to [`FromRow`](crate::FromRow).
    type Row: Send;

    /// Count rows matching the scope's predicate.
    fn count(&self, scope: &Scope) -> impl std::future::Future<Output = OrmResult<i64>> + Send;

    /// Load rows for the scope: projection, predicate, order and bounds.
    fn find(
        &self,
        scope: &Scope,
    ) -> impl std::future::Future<Output = OrmResult<Vec<Self::Row>>> + Send;

    /// Delete rows matching the scope's predicate; returns affected rows.
    fn delete(&self, scope: &Scope) -> impl std::future::Future<Output = OrmResult<u64>> + Send;

    /// Apply assignments to rows matching the scope's predicate; returns
    /// affected rows.
    fn update(
        &self,
        scope: &Scope,
        assignments: &Assignments,
    ) -> impl std::future::Future<Output = OrmResult<u64>> + Send;
}

impl<E: Executor> Executor for &E {
    type Row = E::Row;

    async fn count(&self, scope: &Scope) -> OrmResult<i64> {
        (**self).count(scope).await
    }

    async fn find(&self, scope: &Scope) -> OrmResult<Vec<Self::Row>> {
        (**self).find(scope).await
    }

    async fn delete(&self, scope: &Scope) -> OrmResult<u64> {
        (**self).delete(scope).await
    }

    async fn update(&self, scope: &Scope, assignments: &Assignments) -> OrmResult<u64> {
        (**self).update(scope, assignments).await
    }
}
