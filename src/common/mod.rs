//! Shared capabilities and configuration loading

pub mod config;
pub mod traits;

pub use config::ConfigLoader;
pub use traits::{AudioCue, Clock, ManualClock, RandomSource, RngSource, ScriptedFaces, SilentAudio};
