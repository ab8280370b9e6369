use std::time::Duration;

/// Timeout durations used across browser and HTTP operations
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Page ready-state wait during WAF harvest
    pub page_ready: Duration,

    /// Settle delay used when the ready-state wait times out
    pub page_settle: Duration,

    /// Delay around the second harvest round's reload
    pub reload_delay: Duration,

    /// Browser launch timeout
    pub browser_launch: Duration,

    /// Browser close timeout
    pub browser_close: Duration,

    /// HTTP request timeout
    pub http_request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        GLOBAL_TIMEOUT_CONFIG.clone()
    }
}

impl TimeoutConfig {
    /// Get the global timeout configuration
    pub fn global() -> &'static Self {
        &GLOBAL_TIMEOUT_CONFIG
    }
}

/// Global timeout configuration instance
static GLOBAL_TIMEOUT_CONFIG: TimeoutConfig = TimeoutConfig {
    page_ready: Duration::from_secs(5),
    page_settle: Duration::from_secs(3),
    reload_delay: Duration::from_secs(2),
    browser_launch: Duration::from_secs(30),
    browser_close: Duration::from_secs(5),
    http_request: Duration::from_secs(30),
};
