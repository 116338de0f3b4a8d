//! Test doubles for `GenericClient`.

use crate::client::GenericClient;
use crate::error::{StoreError, StoreResult};
use std::sync::Mutex;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    Query,
    QueryOne,
    QueryOpt,
    Execute,
}

/// One statement as the client saw it.
#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    pub call: Call,
    pub tag: Option<String>,
    pub sql: String,
    /// `Debug` rendering of each bound parameter, in placeholder order.
    pub params: Vec<String>,
}

/// Records every statement and answers with "no rows".
///
/// `query` -> empty vec, `query_one` -> `NotFound`, `query_opt` -> `None`,
/// `execute` -> the configured affected count. `failing()` makes every call
/// return a `Connection` error instead.
#[derive(Default)]
pub(crate) struct RecordingClient {
    calls: Mutex<Vec<Recorded>>,
    affected: u64,
    fail: bool,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn affecting(rows: u64) -> Self {
        Self {
            affected: rows,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// The only recorded statement; panics unless exactly one was issued.
    pub fn single(&self) -> Recorded {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one statement: {calls:#?}");
        calls.into_iter().next().expect("len == 1")
    }

    fn record(
        &self,
        call: Call,
        tag: Option<&str>,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<()> {
        self.calls.lock().expect("calls lock").push(Recorded {
            call,
            tag: tag.map(str::to_string),
            sql: sql.to_string(),
            params: params.iter().map(|p| format!("{p:?}")).collect(),
        });
        if self.fail {
            return Err(StoreError::Connection("connection reset by peer".into()));
        }
        Ok(())
    }
}

impl GenericClient for RecordingClient {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StoreResult<Vec<Row>> {
        self.record(Call::Query, None, sql, params)?;
        Ok(vec![])
    }

    async fn query_tagged(
        &self,
        tag: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<Vec<Row>> {
        self.record(Call::Query, Some(tag), sql, params)?;
        Ok(vec![])
    }

    async fn query_one(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StoreResult<Row> {
        self.record(Call::QueryOne, None, sql, params)?;
        Err(StoreError::not_found("no rows"))
    }

    async fn query_one_tagged(
        &self,
        tag: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<Row> {
        self.record(Call::QueryOne, Some(tag), sql, params)?;
        Err(StoreError::not_found("no rows"))
    }

    async fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<Option<Row>> {
        self.record(Call::QueryOpt, None, sql, params)?;
        Ok(None)
    }

    async fn query_opt_tagged(
        &self,
        tag: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<Option<Row>> {
        self.record(Call::QueryOpt, Some(tag), sql, params)?;
        Ok(None)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StoreResult<u64> {
        self.record(Call::Execute, None, sql, params)?;
        Ok(self.affected)
    }

    async fn execute_tagged(
        &self,
        tag: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<u64> {
        self.record(Call::Execute, Some(tag), sql, params)?;
        Ok(self.affected)
    }
}

/// Never answers; used to exercise timeouts.
pub(crate) struct HangingClient;

impl GenericClient for HangingClient {
    async fn query(&self, _: &str, _: &[&(dyn ToSql + Sync)]) -> StoreResult<Vec<Row>> {
        std::future::pending().await
    }

    async fn query_one(&self, _: &str, _: &[&(dyn ToSql + Sync)]) -> StoreResult<Row> {
        std::future::pending().await
    }

    async fn query_opt(&self, _: &str, _: &[&(dyn ToSql + Sync)]) -> StoreResult<Option<Row>> {
        std::future::pending().await
    }

    async fn execute(&self, _: &str, _: &[&(dyn ToSql + Sync)]) -> StoreResult<u64> {
        std::future::pending().await
    }
}
