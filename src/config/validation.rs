use crate::config::types::{Config, InputConfig, PollerConfig};
use crate::ConfigError;

/// Upper bound on the prober pool size
pub const MAX_POLLERS: usize = 256;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_poller_config(&config.poller)?;
    validate_input_config(&config.input)?;
    Ok(())
}

/// Validates polling loop configuration
fn validate_poller_config(config: &PollerConfig) -> Result<(), ConfigError> {
    if config.num_pollers < 1 || config.num_pollers > MAX_POLLERS {
        return Err(ConfigError::Validation(format!(
            "num_pollers must be between 1 and {}, got {}",
            MAX_POLLERS, config.num_pollers
        )));
    }

    if config.poll_interval_ms < 1 {
        return Err(ConfigError::Validation(
            "poll_interval_ms must be >= 1ms".to_string(),
        ));
    }

    // tokio::time::interval panics on a zero period
    if config.status_interval_ms < 1 {
        return Err(ConfigError::Validation(
            "status_interval_ms must be >= 1ms".to_string(),
        ));
    }

    if let Some(agent) = &config.user_agent {
        if agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user_agent cannot be blank".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates input configuration
fn validate_input_config(config: &InputConfig) -> Result<(), ConfigError> {
    if config.urls_filepath.trim().is_empty() {
        return Err(ConfigError::Validation(
            "urls_filepath must be provided".to_string(),
        ));
    }

    Ok(())
}
