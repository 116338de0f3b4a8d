use super::config::MonitorConfig;
use super::{QueryOutcome, QueryType, SQL_TARGET, truncate_sql_bytes};
use crate::client::GenericClient;
use crate::error::{StoreError, StoreResult};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Wraps a `GenericClient` with `tracing` events and an optional timeout.
pub struct InstrumentedClient<C> {
    client: C,
    config: MonitorConfig,
}

impl<C: GenericClient> InstrumentedClient<C> {
    /// Wrap a client with the default configuration (no per-statement logging,
    /// no timeout).
    pub fn new(client: C) -> Self {
        Self {
            client,
            config: MonitorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: MonitorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn inner(&self) -> &C {
        &self.client
    }

    pub fn into_inner(self) -> C {
        self.client
    }

    pub(super) fn truncate_sql<'a>(&self, sql: &'a str) -> std::borrow::Cow<'a, str> {
        match self.config.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)).into(),
            _ => sql.into(),
        }
    }

    async fn with_timeout<T, F>(&self, future: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>> + Send,
    {
        let Some(timeout) = self.config.query_timeout else {
            return future.await;
        };

        tokio::pin!(future);
        tokio::select! {
            result = &mut future => result,
            _ = tokio::time::sleep(timeout) => {
                if let Some(cancel_token) = self.client.cancel_token() {
                    tokio::spawn(async move {
                        let _ = cancel_token.cancel_query(tokio_postgres::NoTls).await;
                    });
                }
                Err(StoreError::Timeout(timeout))
            }
        }
    }

    async fn run<T, F>(
        &self,
        tag: Option<&str>,
        sql: &str,
        param_count: usize,
        future: F,
        outcome: fn(&T) -> QueryOutcome,
    ) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>> + Send,
    {
        let start = Instant::now();
        let result = self.with_timeout(future).await;
        let elapsed = start.elapsed();

        let outcome = match &result {
            Ok(value) => outcome(value),
            // query_one with zero rows is an expected miss, not a failure.
            Err(StoreError::NotFound(_)) => QueryOutcome::OptionalRow(false),
            Err(e) => QueryOutcome::Error(e.to_string()),
        };
        self.report(tag, sql, param_count, elapsed, &outcome);
        result
    }

    pub(super) fn report(
        &self,
        tag: Option<&str>,
        sql: &str,
        param_count: usize,
        elapsed: Duration,
        outcome: &QueryOutcome,
    ) {
        let tag = tag.unwrap_or("-");
        let query_type = QueryType::from_sql(sql);
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        let slow = self
            .config
            .slow_query_threshold
            .is_some_and(|threshold| elapsed > threshold);

        if let QueryOutcome::Error(error) = outcome {
            tracing::error!(
                target: SQL_TARGET,
                tag,
                query_type = ?query_type,
                param_count,
                elapsed_ms,
                sql = %self.truncate_sql(sql),
                error = %error,
                "statement failed"
            );
        } else if slow {
            tracing::warn!(
                target: SQL_TARGET,
                tag,
                query_type = ?query_type,
                param_count,
                elapsed_ms,
                outcome = ?outcome,
                sql = %self.truncate_sql(sql),
                "slow statement"
            );
        } else if self.config.logging_enabled {
            tracing::debug!(
                target: SQL_TARGET,
                tag,
                query_type = ?query_type,
                param_count,
                elapsed_ms,
                outcome = ?outcome,
                sql = %self.truncate_sql(sql),
                "statement"
            );
        }
    }
}

impl<C: GenericClient> GenericClient for InstrumentedClient<C> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StoreResult<Vec<Row>> {
        let future = self.client.query(sql, params);
        self.run(None, sql, params.len(), future, |rows| {
            QueryOutcome::Rows(rows.len())
        })
        .await
    }

    async fn query_tagged(
        &self,
        tag: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<Vec<Row>> {
        let future = self.client.query_tagged(tag, sql, params);
        self.run(Some(tag), sql, params.len(), future, |rows| {
            QueryOutcome::Rows(rows.len())
        })
        .await
    }

    async fn query_one(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StoreResult<Row> {
        let future = self.client.query_one(sql, params);
        self.run(None, sql, params.len(), future, |_| {
            QueryOutcome::OptionalRow(true)
        })
        .await
    }

    async fn query_one_tagged(
        &self,
        tag: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<Row> {
        let future = self.client.query_one_tagged(tag, sql, params);
        self.run(Some(tag), sql, params.len(), future, |_| {
            QueryOutcome::OptionalRow(true)
        })
        .await
    }

    async fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<Option<Row>> {
        let future = self.client.query_opt(sql, params);
        self.run(None, sql, params.len(), future, |row| {
            QueryOutcome::OptionalRow(row.is_some())
        })
        .await
    }

    async fn query_opt_tagged(
        &self,
        tag: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<Option<Row>> {
        let future = self.client.query_opt_tagged(tag, sql, params);
        self.run(Some(tag), sql, params.len(), future, |row| {
            QueryOutcome::OptionalRow(row.is_some())
        })
        .await
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StoreResult<u64> {
        let future = self.client.execute(sql, params);
        self.run(None, sql, params.len(), future, |n| QueryOutcome::Affected(*n))
            .await
    }

    async fn execute_tagged(
        &self,
        tag: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<u64> {
        let future = self.client.execute_tagged(tag, sql, params);
        self.run(Some(tag), sql, params.len(), future, |n| {
            QueryOutcome::Affected(*n)
        })
        .await
    }

    fn cancel_token(&self) -> Option<tokio_postgres::CancelToken> {
        self.client.cancel_token()
    }
}
