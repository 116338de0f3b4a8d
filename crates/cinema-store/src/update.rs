//! Partial UPDATE assembly.

use crate::error::{StoreError, StoreResult};
use crate::sql::Sql;
use tokio_postgres::types::ToSql;

/// Builds `UPDATE <table> SET ... WHERE id = $n RETURNING *` from the fields
/// that are present.
///
/// Columns appear in the order they were set. A `None` passed to
/// [`UpdateSet::set_opt`] leaves the column out entirely; `Some(0)` or
/// `Some(String::new())` is a real update.
pub struct UpdateSet {
    table: &'static str,
    set: Sql,
    columns: Vec<&'static str>,
}

impl UpdateSet {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            set: Sql::empty(),
            columns: Vec::new(),
        }
    }

    /// Set a column.
    pub fn set<T>(&mut self, column: &'static str, value: T) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        if !self.columns.is_empty() {
            self.set.push(", ");
        }
        self.set.push(column).push(" = ").push_bind(value);
        self.columns.push(column);
        self
    }

    /// Set an optional column (None => skip).
    pub fn set_opt<T>(&mut self, column: &'static str, value: Option<T>) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        if let Some(v) = value {
            self.set(column, v);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns that will be written, in order.
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// Finish as an update of the row with `id`; the id is the last parameter.
    ///
    /// Fails with [`StoreError::InvalidRequest`] when no column was set.
    pub fn into_update_by_id(self, id: i64) -> StoreResult<Sql> {
        if self.columns.is_empty() {
            return Err(StoreError::invalid_request(format!(
                "update of {} #{id} has no fields to change",
                self.table
            )));
        }

        let mut q = Sql::new(format!("UPDATE {} SET ", self.table));
        q.push_sql(self.set);
        q.push(" WHERE id = ").push_bind(id).push(" RETURNING *");
        Ok(q)
    }
}
