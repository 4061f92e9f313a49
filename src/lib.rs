//! urlpoll: a self-sustaining URL liveness poller
//!
//! A fixed set of URLs is probed with HTTP HEAD requests by a small pool of
//! workers. Each result updates a status table that logs a snapshot on its
//! own timer, and every URL is re-queued after a delay that grows with its
//! consecutive failures.

pub mod config;
pub mod monitor;
pub mod urls;

use thiserror::Error;

/// Main error type for urlpoll operations
#[derive(Debug, Error)]
pub enum PollError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("{queue} queue closed while the monitor was running")]
    QueueClosed { queue: &'static str },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read URL list '{path}': {source}")]
    UrlFile {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for urlpoll operations
pub type Result<T> = std::result::Result<T, PollError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use monitor::{Dispatcher, Resource, StatusRecord};
