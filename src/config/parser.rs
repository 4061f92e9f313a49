use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::{Path, PathBuf};

/// Values supplied on the command line, applied on top of the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub urls_filepath: Option<PathBuf>,
    pub num_pollers: Option<usize>,
    pub poll_interval_ms: Option<u64>,
    pub status_interval_ms: Option<u64>,
    pub err_timeout_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Writes every provided override into `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.urls_filepath {
            config.input.urls_filepath = path.display().to_string();
        }
        if let Some(n) = self.num_pollers {
            config.poller.num_pollers = n;
        }
        if let Some(ms) = self.poll_interval_ms {
            config.poller.poll_interval_ms = ms;
        }
        if let Some(ms) = self.status_interval_ms {
            config.poller.status_interval_ms = ms;
        }
        if let Some(ms) = self.err_timeout_ms {
            config.poller.err_timeout_ms = ms;
        }
    }
}

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config = read_config(path)?;
    validate(&config)?;
    Ok(config)
}

/// Builds the effective configuration from an optional file plus overrides
///
/// Missing file sections fall back to defaults. Validation runs once, after
/// the overrides are applied, so a URL list given only on the command line
/// satisfies a config file that omits `[input]`.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => Config::default(),
    };

    overrides.apply(&mut config);
    validate(&config)?;

    Ok(config)
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}
