//! Statement logging and timeouts for any [`GenericClient`](crate::GenericClient).
//!
//! ```rust,ignore
//! use cinema_store::monitor::{InstrumentedClient, MonitorConfig};
//! use std::time::Duration;
//!
//! let config = MonitorConfig::new()
//!     .with_query_timeout(Duration::from_secs(5))
//!     .with_slow_query_threshold(Duration::from_millis(250))
//!     .enable_logging();
//!
//! let client = InstrumentedClient::new(pool.get().await?).with_config(config);
//! let movies = MovieRepo::new(&client);
//! ```
//!
//! Events are emitted on the `cinema_store.sql` target.

mod config;
mod instrumented;


pub use config::MonitorConfig;
pub use instrumented::InstrumentedClient;

/// `tracing` target for every statement event.
pub const SQL_TARGET: &str = "cinema_store.sql";

/// The type of SQL operation being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    Select,
    Insert,
    Update,
    Delete,
    Other,
}

impl QueryType {
    /// Detect query type from the leading keyword.
    pub fn from_sql(sql: &str) -> Self {
        let keyword = sql
            .trim_start()
            .split(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or("");

        if keyword.eq_ignore_ascii_case("SELECT") {
            QueryType::Select
        } else if keyword.eq_ignore_ascii_case("INSERT") {
            QueryType::Insert
        } else if keyword.eq_ignore_ascii_case("UPDATE") {
            QueryType::Update
        } else if keyword.eq_ignore_ascii_case("DELETE") {
            QueryType::Delete
        } else {
            QueryType::Other
        }
    }
}

/// What a finished statement produced, for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum QueryOutcome {
    Rows(usize),
    OptionalRow(bool),
    Affected(u64),
    Error(String),
}

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
