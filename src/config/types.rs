use serde::Deserialize;
use std::time::Duration;

/// Default number of concurrent prober workers
pub const DEFAULT_NUM_POLLERS: usize = 2;

/// Default base cadence between probes of the same URL (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 60_000;

/// Default cadence of status table snapshots (milliseconds)
pub const DEFAULT_STATUS_INTERVAL_MS: u64 = 10_000;

/// Default backoff added per consecutive failure (milliseconds)
pub const DEFAULT_ERR_TIMEOUT_MS: u64 = 10_000;

/// Main configuration structure for urlpoll
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub poller: PollerConfig,
    #[serde(default)]
    pub input: InputConfig,
}

/// Polling loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PollerConfig {
    /// Number of prober workers
    #[serde(rename = "num-pollers", default = "default_num_pollers")]
    pub num_pollers: usize,

    /// Base time between probes of the same URL (milliseconds)
    #[serde(rename = "poll-interval-ms", default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Time between status snapshots (milliseconds)
    #[serde(rename = "status-interval-ms", default = "default_status_interval_ms")]
    pub status_interval_ms: u64,

    /// Extra delay per consecutive failure (milliseconds)
    #[serde(rename = "err-timeout-ms", default = "default_err_timeout_ms")]
    pub err_timeout_ms: u64,

    /// User-Agent header sent with each probe
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,
}

impl PollerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms)
    }

    pub fn err_timeout(&self) -> Duration {
        Duration::from_millis(self.err_timeout_ms)
    }

    /// The configured user agent, or `urlpoll/<version>`
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("urlpoll/{}", env!("CARGO_PKG_VERSION")))
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            num_pollers: DEFAULT_NUM_POLLERS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            status_interval_ms: DEFAULT_STATUS_INTERVAL_MS,
            err_timeout_ms: DEFAULT_ERR_TIMEOUT_MS,
            user_agent: None,
        }
    }
}

/// Input source configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    /// Path to the file listing URLs to poll, one per line
    #[serde(rename = "urls-filepath", default)]
    pub urls_filepath: String,
}

fn default_num_pollers() -> usize {
    DEFAULT_NUM_POLLERS
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_status_interval_ms() -> u64 {
    DEFAULT_STATUS_INTERVAL_MS
}

fn default_err_timeout_ms() -> u64 {
    DEFAULT_ERR_TIMEOUT_MS
}
