//! Configuration loading
//!
//! Reads an optional TOML file, then applies `COINFLIP_*` environment
//! variable overrides, then validates the result.

use crate::config::CoinflipConfig;
use crate::errors::ConfigurationError;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ENV_DURATION_MS: &str = "COINFLIP_FLIP_DURATION_MS";
pub const ENV_FRAME_RATE: &str = "COINFLIP_FRAME_RATE";
pub const ENV_LOG_LEVEL: &str = "COINFLIP_LOG_LEVEL";
pub const ENV_MIN_BALANCE: &str = "COINFLIP_MIN_BALANCE";
pub const ENV_MAX_BALANCE: &str = "COINFLIP_MAX_BALANCE";

/// Configuration loader with environment variable support
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration from file and environment variables
    pub fn load(&self) -> Result<CoinflipConfig, ConfigurationError> {
        self.load_with(|key| env::var(key).ok())
    }

    /// Same as [`load`](Self::load) but with a custom variable lookup
    pub fn load_with<F>(&self, lookup: F) -> Result<CoinflipConfig, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match self.config_path {
            Some(ref path) => load_from_file(path)?,
            None => CoinflipConfig::default(),
        };

        apply_overrides(&mut config, lookup)?;
        config.validate()?;

        Ok(config)
    }
}

fn load_from_file(path: &Path) -> Result<CoinflipConfig, ConfigurationError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path.display(), e))
    })?;

    Ok(toml::from_str(&content)?)
}

fn apply_overrides<F>(config: &mut CoinflipConfig, lookup: F) -> Result<(), ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(ENV_DURATION_MS) {
        config.animation.duration_ms = parse_var(ENV_DURATION_MS, value)?;
    }
    if let Some(value) = lookup(ENV_FRAME_RATE) {
        config.driver.frame_rate = parse_var(ENV_FRAME_RATE, value)?;
    }
    if let Some(value) = lookup(ENV_LOG_LEVEL) {
        config.monitoring.log_level = value.parse()?;
    }
    if let Some(value) = lookup(ENV_MIN_BALANCE) {
        config.session.min_starting_balance = parse_var(ENV_MIN_BALANCE, value)?;
    }
    if let Some(value) = lookup(ENV_MAX_BALANCE) {
        config.session.max_starting_balance = parse_var(ENV_MAX_BALANCE, value)?;
    }

    Ok(())
}

fn parse_var<T: FromStr>(field: &str, value: String) -> Result<T, ConfigurationError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigurationError::InvalidValue {
            field: field.to_string(),
            value,
            reason: "Not a valid number".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_file() {
        let config = ConfigLoader::new().load_with(|_| None).unwrap();
        assert_eq!(config, CoinflipConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let env = vars(&[
            (ENV_DURATION_MS, "500"),
            (ENV_FRAME_RATE, "30"),
            (ENV_LOG_LEVEL, "WARN"),
        ]);
        let config = ConfigLoader::new()
            .load_with(|key| env.get(key).cloned())
            .unwrap();

        assert_eq!(config.animation.duration_ms, 500);
        assert_eq!(config.driver.frame_rate, 30);
        assert_eq!(config.monitoring.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_bad_env_value_is_reported() {
        let env = vars(&[(ENV_FRAME_RATE, "fast")]);
        let err = ConfigLoader::new()
            .load_with(|key| env.get(key).cloned())
            .unwrap_err();

        match err {
            ConfigurationError::InvalidValue { field, value, .. } => {
                assert_eq!(field, ENV_FRAME_RATE);
                assert_eq!(value, "fast");
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_overrides_are_validated() {
        let env = vars(&[(ENV_MIN_BALANCE, "2000")]);
        assert!(ConfigLoader::new()
            .load_with(|key| env.get(key).cloned())
            .is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[session]\nmin_starting_balance = 10\nmax_starting_balance = 20").unwrap();

        let config = ConfigLoader::new()
            .with_path(file.path())
            .load_with(|_| None)
            .unwrap();

        assert_eq!(config.session.min_starting_balance, 10);
        assert_eq!(config.session.max_starting_balance, 20);
        assert_eq!(config.animation.duration_ms, 2000);
    }

    #[test]
    fn test_missing_file_fails() {
        let result = ConfigLoader::new()
            .with_path("/nonexistent/coinflip.toml")
            .load_with(|_| None);
        assert!(matches!(result, Err(ConfigurationError::LoadFailed(_))));
    }
}
