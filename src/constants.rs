//! Application-wide constants
//!
//! Default values used when the configuration file or command line leaves a
//! setting out.

/// Configuration file used when `--config.file` is not given
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// Scheduling defaults
pub mod schedule {
    /// Poll interval used when a service leaves `interval` unset or non-positive
    pub const DEFAULT_INTERVAL_SECS: u64 = 300;

    /// Deadline for one fetch+reduce cycle, including fetch retries
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
}

/// Feed transport defaults
pub mod fetch {
    /// Attempts per fetch before the cycle is counted as failed
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Delay before the first retry; doubled for each subsequent one
    pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 1000;

    /// Timeout for a single HTTP request
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
}

/// Metrics-related constants
pub mod metrics {
    /// Prefix of the exporter's own cycle metrics
    pub const NAMESPACE: &str = "rss_exporter";

    /// Label carrying the configured feed name on cycle metrics
    pub const FEED_LABEL: &str = "feed";

    /// Buckets for the cycle duration histogram, 50ms to 2 minutes
    pub const CYCLE_DURATION_BUCKETS: [f64; 10] =
        [0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 120.0];
}

/// HTTP server defaults
pub mod web {
    pub const DEFAULT_LISTEN_ADDRESS: &str = "127.0.0.1";
    pub const DEFAULT_TELEMETRY_PATH: &str = "/metrics";
    pub const HEALTH_PATH: &str = "/health";
    pub const HEALTH_RESPONSE: &str = "PONG";
}
