//! Guard configuration.
//!
//! `GuardConfig` is designed to sit as a section of an application TOML
//! config file; every field has a default so the section can be partial or
//! absent entirely.

use serde::{Deserialize, Serialize};

/// Construction-time configuration for [`LoginAttemptGuard`].
///
/// [`LoginAttemptGuard`]: crate::guard::LoginAttemptGuard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Consecutive failures that trigger a lockout.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// How long a lockout lasts after the most recent failure, in
    /// milliseconds.
    #[serde(default = "default_block_duration_ms")]
    pub block_duration_ms: u64,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            block_duration_ms: default_block_duration_ms(),
        }
    }
}

fn default_max_retries() -> u32 {
    5
}

fn default_block_duration_ms() -> u64 {
    30 * 60 * 1000
}

impl GuardConfig {
    /// Checks that both values are usable.
    ///
    /// The guard clamps zero values to 1 at construction, so this is for
    /// applications that load configuration from a file and prefer a
    /// load-time error over silent clamping.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroMaxRetries`] if `max_retries` is 0.
    /// - [`ConfigError::ZeroBlockDuration`] if `block_duration_ms` is 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_retries == 0 {
            return Err(ConfigError::ZeroMaxRetries);
        }
        if self.block_duration_ms == 0 {
            return Err(ConfigError::ZeroBlockDuration);
        }
        Ok(())
    }
}

/// Invalid guard configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("max_retries must be greater than zero")]
    ZeroMaxRetries,

    #[error("block_duration_ms must be greater than zero")]
    ZeroBlockDuration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = GuardConfig::default();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.block_duration_ms, 1_800_000);
    }

    #[test]
    fn default_config_validates() {
        assert!(GuardConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_max_retries() {
        let config = GuardConfig {
            max_retries: 0,
            ..GuardConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::ZeroMaxRetries
        ));
    }

    #[test]
    fn validate_rejects_zero_block_duration() {
        let config = GuardConfig {
            block_duration_ms: 0,
            ..GuardConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::ZeroBlockDuration
        ));
    }

    #[test]
    fn parse_full_toml_section() {
        let config: GuardConfig = toml::from_str(
            r#"
max_retries = 3
block_duration_ms = 60000
"#,
        )
        .unwrap();

        assert_eq!(config.max_retries, 3);
        assert_eq!(config.block_duration_ms, 60_000);
    }

    #[test]
    fn parse_partial_toml_uses_defaults() {
        let config: GuardConfig = toml::from_str("max_retries = 10").unwrap();

        assert_eq!(config.max_retries, 10);
        assert_eq!(config.block_duration_ms, 1_800_000);
    }

    #[test]
    fn parse_empty_toml_uses_all_defaults() {
        let config: GuardConfig = toml::from_str("").unwrap();
        let default = GuardConfig::default();

        assert_eq!(config.max_retries, default.max_retries);
        assert_eq!(config.block_duration_ms, default.block_duration_ms);
    }
}
