//! Configuration for the flip animation, session and frame driver
//!
//! Every value defaults to the tuning the game shipped with, so an empty
//! TOML file (or no file at all) reproduces the stock behavior.

use crate::errors::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest balance a session can hold. Starting balances and winnings are
/// capped here so balance arithmetic never overflows.
pub const MAX_BALANCE: i64 = 1_000_000_000_000;

/// Top-level configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoinflipConfig {
    pub session: SessionConfig,
    pub animation: AnimationConfig,
    pub wiggle: WiggleConfig,
    pub driver: DriverConfig,
    pub monitoring: MonitoringConfig,
}

/// Starting balance range, inclusive on both ends
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub min_starting_balance: i64,
    pub max_starting_balance: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_starting_balance: 100,
            max_starting_balance: 1000,
        }
    }
}

/// Shape of the flip animation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    pub duration_ms: u64,
    /// Full turns before landing
    pub spins: u32,
    /// Peak height of the toss arc
    pub arc_height: f64,
    /// Horizontal drift amplitude
    pub sway: f64,
    pub pulse_amplitude: f64,
    /// Scale pulses per flip
    pub pulse_cycles: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            spins: 6,
            arc_height: 1.5,
            sway: 0.2,
            pulse_amplitude: 0.1,
            pulse_cycles: 6,
        }
    }
}

/// Spring settings for the trailing wiggle joint
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WiggleConfig {
    /// Spring stiffness per frame, in (0, 1]
    pub velocity: f64,
    pub max_stretch: f64,
    /// Velocity retained per frame, in [0, 1)
    pub damping: f64,
}

impl Default for WiggleConfig {
    fn default() -> Self {
        Self {
            velocity: 0.5,
            max_stretch: 0.3,
            damping: 0.9,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DriverConfig {
    pub frame_rate: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self { frame_rate: 60 }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MonitoringConfig {
    pub log_level: LogLevel,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(invalid("monitoring.log_level", other, "Unknown log level")),
        }
    }
}

impl CoinflipConfig {
    /// Short flips at a high frame rate, for demos and scripted runs
    pub fn quick_play() -> Self {
        Self {
            animation: AnimationConfig {
                duration_ms: 250,
                ..Default::default()
            },
            driver: DriverConfig { frame_rate: 120 },
            ..Default::default()
        }
    }

    /// Validate configuration for logical consistency
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let session = &self.session;
        if session.min_starting_balance <= 0 {
            return Err(invalid(
                "session.min_starting_balance",
                session.min_starting_balance,
                "Starting balance must be positive",
            ));
        }
        if session.max_starting_balance < session.min_starting_balance {
            return Err(invalid(
                "session.max_starting_balance",
                session.max_starting_balance,
                "Range is inverted",
            ));
        }
        if session.max_starting_balance > MAX_BALANCE {
            return Err(invalid(
                "session.max_starting_balance",
                session.max_starting_balance,
                "Exceeds the balance cap",
            ));
        }

        if self.animation.duration_ms == 0 {
            return Err(invalid("animation.duration_ms", 0, "Duration cannot be zero"));
        }

        let wiggle = &self.wiggle;
        if !(wiggle.velocity > 0.0 && wiggle.velocity <= 1.0) {
            return Err(invalid("wiggle.velocity", wiggle.velocity, "Must be in (0, 1]"));
        }
        if !(wiggle.damping >= 0.0 && wiggle.damping < 1.0) {
            return Err(invalid("wiggle.damping", wiggle.damping, "Must be in [0, 1)"));
        }
        if !(wiggle.max_stretch >= 0.0) {
            return Err(invalid(
                "wiggle.max_stretch",
                wiggle.max_stretch,
                "Cannot be negative",
            ));
        }

        if self.driver.frame_rate == 0 {
            return Err(invalid("driver.frame_rate", 0, "Frame rate cannot be zero"));
        }

        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.driver.frame_rate.max(1) as f64)
    }
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ConfigurationError {
    ConfigurationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
