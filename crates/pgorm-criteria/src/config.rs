//! Configuration for [`PgExecutor`](crate::PgExecutor).

use crate::error::OrmError;
use std::time::Duration;

/// How an unscoped `DELETE`/`UPDATE` (no `WHERE`) is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DangerousDmlPolicy {
    Allow,
    Warn,
    Error,
}

/// Configuration for `PgExecutor`.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Per-statement timeout.
    pub query_timeout: Option<Duration>,
    /// Policy for `DELETE` without a predicate.
    pub delete_without_where: DangerousDmlPolicy,
    /// Policy for `UPDATE` without a predicate.
    pub update_without_where: DangerousDmlPolicy,
    /// Maximum logged SQL length in bytes; `None` logs the full statement.
    pub max_sql_log_length: Option<usize>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            query_timeout: None,
            delete_without_where: DangerousDmlPolicy::Allow,
            update_without_where: DangerousDmlPolicy::Allow,
            max_sql_log_length: Some(200),
        }
    }
}

impl ExecutorConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set query timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.query_timeout = Some(duration);
        self
    }

    /// Configure how DELETE without WHERE is handled.
    pub fn delete_without_where(mut self, policy: DangerousDmlPolicy) -> Self {
        self.delete_without_where = policy;
        self
    }

    /// Configure how UPDATE without WHERE is handled.
    pub fn update_without_where(mut self, policy: DangerousDmlPolicy) -> Self {
        self.update_without_where = policy;
        self
    }

    /// Set the maximum logged SQL length.
    pub fn max_sql_log_length(mut self, len: usize) -> Self {
        self.max_sql_log_length = Some(len);
        self
    }

    /// Log statements untruncated.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_log_length = None;
        self
    }

    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    pub(crate) fn truncate_sql<'a>(&self, sql: &'a str) -> std::borrow::Cow<'a, str> {
        match self.max_sql_log_length {
            Some(max) if sql.len() > max => {
                format!("{}...", truncate_sql_bytes(sql, max)).into()
            }
            _ => sql.into(),
        }
    }
}

fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

pub(crate) fn handle_dangerous_dml(
    policy: DangerousDmlPolicy,
    rule: &str,
    sql: &str,
) -> Result<(), OrmError> {
    match policy {
        DangerousDmlPolicy::Allow => Ok(()),
        DangerousDmlPolicy::Warn => {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "pgorm.sql", rule, sql, "SQL policy warning");
            #[cfg(not(feature = "tracing"))]
            let _ = (rule, sql);
            Ok(())
        }
        DangerousDmlPolicy::Error => Err(OrmError::validation(format!(
            "SQL policy violation: {rule}: {sql}"
        ))),
    }
}
