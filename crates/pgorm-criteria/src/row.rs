//! Row mapping traits and utilities

use crate::error::{OrmError, OrmResult};
use tokio_postgres::Row;
use tokio_postgres::types::FromSql;

/// Trait for converting a database row into a Rust struct.
///
/// The row type defaults to [`tokio_postgres::Row`]; executors with another
/// row representation map through `FromRow<TheirRow>`.
///
/// # Example
///
/// ```ignore
/// use pgorm_criteria::{FromRow, OrmResult, RowExt};
/// use tokio_postgres::Row;
///
/// struct User {
///     id: i64,
///     username: String,
///     email: Option<String>,
/// }
///
/// impl FromRow for User {
///     fn from_row(row: &Row) -> OrmResult<Self> {
///         Ok(Self {
///             id: row.try_get_column("id")?,
///             username: row.try_get_column("username")?,
///             email: row.try_get_column("email")?,
///         })
///     }
/// }
/// ```
pub trait FromRow<R = Row>: Sized {
    /// Convert a database row into Self
    fn from_row(row: &R) -> OrmResult<Self>;
}

/// `(id, field)` pairs as selected by [`get_field_map`](crate::dao::get_field_map).
impl<K, V> FromRow<Row> for (K, V)
where
    K: for<'a> FromSql<'a>,
    V: for<'a> FromSql<'a>,
{
    fn from_row(row: &Row) -> OrmResult<Self> {
        let key = row
            .try_get(0)
            .map_err(|e| OrmError::decode("#0", e.to_string()))?;
        let value = row
            .try_get(1)
            .map_err(|e| OrmError::decode("#1", e.to_string()))?;
        Ok((key, value))
    }
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning OrmError::Decode on failure
    fn try_get_column<T>(&self, column: &str) -> OrmResult<T>
    where
        T: for<'a> FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> OrmResult<T>
    where
        T: for<'a> FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| OrmError::decode(column, e.to_string()))
    }
}
