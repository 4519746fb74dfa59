//! [`Executor`] over any tokio-postgres client.

use crate::client::GenericClient;
use crate::config::{ExecutorConfig, handle_dangerous_dml};
use crate::criteria::Assignments;
use crate::dao::executor::Executor;
use crate::dao::render::{self, BuiltQuery};
use crate::dao::scope::Scope;
use crate::error::{OrmError, OrmResult};
use crate::row::RowExt;
use tokio_postgres::Row;

/// Runs scoped statements on a tokio-postgres client, transaction or pooled
/// client.
///
/// # Example
///
/// ```ignore
/// use pgorm_criteria::{ExecutorConfig, PgExecutor, criteria, dao};
/// use std::time::Duration;
///
/// let exec = PgExecutor::with_config(
///     &client,
///     ExecutorConfig::new().timeout(Duration::from_secs(5)),
/// );
/// let users: Vec<User> = dao::find_all(&exec, Some(criteria::eq("active", true))).await?;
/// ```
pub struct PgExecutor<C> {
    client: C,
    config: ExecutorConfig,
}

impl<C: GenericClient> PgExecutor<C> {
    /// Wrap a client with the default configuration.
    pub fn new(client: C) -> Self {
        Self::with_config(client, ExecutorConfig::default())
    }

    pub fn with_config(client: C, config: ExecutorConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Unwrap the underlying client.
    pub fn into_inner(self) -> C {
        self.client
    }

    async fn execute_with_timeout<T, F>(&self, future: F) -> OrmResult<T>
    where
        F: std::future::Future<Output = OrmResult<T>> + Send,
    {
        match self.config.query_timeout {
            Some(timeout) => {
                tokio::pin!(future);
                tokio::select! {
                    result = &mut future => result,
                    _ = tokio::time::sleep(timeout) => {
                        if let Some(cancel_token) = self.client.cancel_token() {
                            tokio::spawn(async move {
                                let _ = cancel_token.cancel_query(tokio_postgres::NoTls).await;
                            });
                        }
                        Err(OrmError::Timeout(timeout))
                    }
                }
            }
            None => future.await,
        }
    }

    fn trace(&self, operation: &'static str, scope: &Scope, query: &BuiltQuery) {
        #[cfg(feature = "tracing")]
        {
            let sql = self.config.truncate_sql(&query.sql);
            tracing::debug!(
                target: "pgorm.sql",
                operation,
                table = scope.table(),
                param_count = query.params.len(),
                sql = %sql,
            );
            if query.unbound > 0 {
                tracing::warn!(
                    target: "pgorm.sql",
                    operation,
                    table = scope.table(),
                    unbound = query.unbound,
                    sql = %sql,
                    "more arguments than placeholders; surplus arguments dropped"
                );
            }
        }
        #[cfg(not(feature = "tracing"))]
        let _ = (operation, scope, query);
    }

    async fn query(&self, query: &BuiltQuery) -> OrmResult<Vec<Row>> {
        let params = query.params.as_refs();
        self.execute_with_timeout(self.client.query(&query.sql, &params))
            .await
    }

    async fn execute(&self, query: &BuiltQuery) -> OrmResult<u64> {
        let params = query.params.as_refs();
        self.execute_with_timeout(self.client.execute(&query.sql, &params))
            .await
    }
}

impl<C: GenericClient> Executor for PgExecutor<C> {
    type Row = Row;

    async fn count(&self, scope: &Scope) -> OrmResult<i64> {
        let query = render::count(scope);
        self.trace("count", scope, &query);
        let rows = self.query(&query).await?;
        match rows.first() {
            Some(row) => row.try_get_column::<i64>("count"),
            None => Err(OrmError::Other(format!(
                "COUNT on {} returned no rows",
                scope.table()
            ))),
        }
    }

    async fn find(&self, scope: &Scope) -> OrmResult<Vec<Row>> {
        let query = render::select(scope);
        self.trace("find", scope, &query);
        self.query(&query).await
    }

    async fn delete(&self, scope: &Scope) -> OrmResult<u64> {
        let query = render::delete(scope);
        if scope.predicate().is_empty() {
            handle_dangerous_dml(
                self.config.delete_without_where,
                "delete_without_where",
                &query.sql,
            )?;
        }
        self.trace("delete", scope, &query);
        self.execute(&query).await
    }

    async fn update(&self, scope: &Scope, assignments: &Assignments) -> OrmResult<u64> {
        if assignments.is_empty() {
            return Ok(0);
        }
        let query = render::update(scope, assignments);
        if scope.predicate().is_empty() {
            handle_dangerous_dml(
                self.config.update_without_where,
                "update_without_where",
                &query.sql,
            )?;
        }
        self.trace("update", scope, &query);
        self.execute(&query).await
    }
}
