use std::time::Duration;

/// Configuration for statement logging and timeouts.
///
/// Per-statement debug events are off until [`MonitorConfig::enable_logging`];
/// failures and slow statements are always reported.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Query timeout duration. `None` means no timeout (default).
    pub query_timeout: Option<Duration>,
    /// Statements slower than this are logged at `warn`.
    pub slow_query_threshold: Option<Duration>,
    /// Whether every statement is logged at `debug`.
    pub logging_enabled: bool,
    /// Truncate logged SQL to this many bytes. `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            query_timeout: None,
            slow_query_threshold: None,
            logging_enabled: false,
            max_sql_length: Some(200),
        }
    }
}

impl MonitorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statements exceeding this duration are cancelled and fail with
    /// [`crate::StoreError::Timeout`].
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }

    pub fn with_slow_query_threshold(mut self, threshold: Duration) -> Self {
        self.slow_query_threshold = Some(threshold);
        self
    }

    pub fn with_max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub fn enable_logging(mut self) -> Self {
        self.logging_enabled = true;
        self
    }

    pub fn disable_logging(mut self) -> Self {
        self.logging_enabled = false;
        self
    }
}
