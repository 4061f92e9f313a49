//! Configuration module for urlpoll
//!
//! This module handles loading the optional TOML configuration file, applying
//! command-line overrides on top of it, and validating the result.
//!
//! # Example
//!
//! ```no_run
//! use urlpoll::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("urlpoll.toml")).unwrap();
//! println!("Polling with {} workers", config.poller.num_pollers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, InputConfig, PollerConfig};

// Re-export parser functions
pub use parser::{load_config, resolve_config, ConfigOverrides};
pub use validation::validate;
