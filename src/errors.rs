//! Error types for the coin flip core
//!
//! Bet errors are plain validation failures reported back to the caller.
//! Audio errors never leave the controller. Configuration errors surface
//! only while loading settings at startup.

use thiserror::Error;

/// Root error type for all coinflip operations
#[derive(Debug, Error)]
pub enum CoinflipError {
    #[error("Bet rejected: {0}")]
    Bet(#[from] BetError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reasons a bet can be refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BetError {
    #[error("Invalid bet amount: {amount} (balance {balance})")]
    InvalidAmount { amount: i64, balance: i64 },

    #[error("A flip is already in progress")]
    AnimationInProgress,

    #[error("Game over: balance exhausted")]
    GameOver,
}

/// Failure to play the flip sound
#[derive(Debug, Clone, Error)]
pub enum AudioError {
    #[error("Audio not available")]
    Unavailable,

    #[error("Audio playback failed: {0}")]
    PlaybackFailed(String),
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl From<std::io::Error> for ConfigurationError {
    fn from(e: std::io::Error) -> Self {
        ConfigurationError::LoadFailed(e.to_string())
    }
}

impl From<toml::de::Error> for ConfigurationError {
    fn from(e: toml::de::Error) -> Self {
        ConfigurationError::LoadFailed(format!("Failed to parse TOML: {}", e))
    }
}

// Convenience type alias for Results
pub type CoinflipResult<T> = Result<T, CoinflipError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_bet_error_display() {
        let err = BetError::InvalidAmount {
            amount: 150,
            balance: 100,
        };
        assert!(err.to_string().contains("150"));
        assert!(err.to_string().contains("balance 100"));
    }

    #[test]
    fn test_error_conversion() {
        let err: CoinflipError = BetError::GameOver.into();
        match err {
            CoinflipError::Bet(BetError::GameOver) => {}
            _ => panic!("Expected bet error"),
        }
    }

    #[test]
    fn test_error_source() {
        let err: CoinflipError = ConfigurationError::LoadFailed("test".to_string()).into();
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        fn parse(input: &str) -> CoinflipResult<serde_json::Value> {
            Ok(serde_json::from_str(input)?)
        }

        let err = parse("{not json").unwrap_err();
        assert!(matches!(err, CoinflipError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error"));
    }

    #[test]
    fn test_audio_unavailable_display() {
        let err: CoinflipError = AudioError::Unavailable.into();
        assert_eq!(err.to_string(), "Audio error: Audio not available");
    }
}
