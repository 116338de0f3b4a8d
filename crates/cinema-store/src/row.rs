//! Row mapping traits

use crate::error::{StoreError, StoreResult};
use tokio_postgres::Row;
use tokio_postgres::types::FromSql;

/// Trait for converting a database row into a Rust struct.
///
/// # Example
///
/// ```ignore
/// use cinema_store::{FromRow, RowExt, StoreResult};
///
/// struct Venue {
///     id: i64,
///     address: String,
/// }
///
/// impl FromRow for Venue {
///     fn from_row(row: &tokio_postgres::Row) -> StoreResult<Self> {
///         Ok(Self {
///             id: row.try_get_column("id")?,
///             address: row.try_get_column("address")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> StoreResult<Self>;
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning StoreError::Decode on failure
    fn try_get_column<T>(&self, column: &str) -> StoreResult<T>
    where
        T: for<'a> FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> StoreResult<T>
    where
        T: for<'a> FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| StoreError::decode(column, e.to_string()))
    }
}
