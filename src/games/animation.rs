//! Flip animation curve
//!
//! Everything here is a pure function of elapsed time, so a frame can be
//! recomputed from scratch on every tick.

use crate::config::AnimationConfig;
use crate::games::types::{AnimationState, CoinChoice};
use std::f64::consts::{PI, TAU};

/// Decelerating curve: fast at the start, settles at the end
pub fn ease_out_cubic(x: f64) -> f64 {
    1.0 - (1.0 - x).powi(3)
}

#[derive(Debug, Clone)]
pub struct FlipAnimation {
    config: AnimationConfig,
}

impl FlipAnimation {
    pub fn new(config: AnimationConfig) -> Self {
        Self { config }
    }

    pub fn duration_ms(&self) -> f64 {
        self.config.duration_ms as f64
    }

    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.config.duration_ms == 0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms()).clamp(0.0, 1.0)
    }

    /// Pose of the coin `elapsed_ms` into a flip that lands on `face`
    pub fn sample(&self, elapsed_ms: f64, start_rotation: f64, face: CoinChoice) -> AnimationState {
        let progress = self.progress(elapsed_ms);
        let target_rotation = face.target_rotation();

        if progress >= 1.0 {
            return AnimationState {
                progress: 1.0,
                elapsed_ms: elapsed_ms.max(0.0),
                ..AnimationState::at_rest(target_rotation)
            };
        }

        let ease = ease_out_cubic(progress);
        let spins = self.config.spins as f64;
        let pulse_cycles = self.config.pulse_cycles as f64;

        AnimationState {
            progress,
            elapsed_ms: elapsed_ms.max(0.0),
            rotation: start_rotation + spins * TAU * ease + target_rotation * ease,
            vertical_offset: (progress * PI).sin() * self.config.arc_height,
            horizontal_offset: (progress * TAU).sin() * self.config.sway,
            scale: 1.0 + (progress * pulse_cycles * TAU).sin() * self.config.pulse_amplitude,
        }
    }
}

impl Default for FlipAnimation {
    fn default() -> Self {
        Self::new(AnimationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < EPS);
    }

    #[test]
    fn test_progress_is_clamped() {
        let animation = FlipAnimation::default();
        assert_eq!(animation.progress(-50.0), 0.0);
        assert_eq!(animation.progress(1000.0), 0.5);
        assert_eq!(animation.progress(5000.0), 1.0);
    }

    #[test]
    fn test_first_frame_starts_at_rest() {
        let animation = FlipAnimation::default();
        let frame = animation.sample(0.0, PI, CoinChoice::Heads);
        assert_eq!(frame.rotation, PI);
        assert_eq!(frame.vertical_offset, 0.0);
        assert_eq!(frame.horizontal_offset, 0.0);
        assert_eq!(frame.scale, 1.0);
    }

    #[test]
    fn test_arc_peaks_mid_flip() {
        let animation = FlipAnimation::default();
        let frame = animation.sample(1000.0, 0.0, CoinChoice::Heads);
        assert!((frame.vertical_offset - 1.5).abs() < EPS);
        assert!(frame.horizontal_offset.abs() < EPS);

        let quarter = animation.sample(500.0, 0.0, CoinChoice::Heads);
        assert!((quarter.horizontal_offset - 0.2).abs() < EPS);
    }

    #[test]
    fn test_rotation_formula() {
        let animation = FlipAnimation::default();
        let frame = animation.sample(1000.0, 0.0, CoinChoice::Tails);
        let ease = ease_out_cubic(0.5);
        let expected = 6.0 * TAU * ease + PI * ease;
        assert!((frame.rotation - expected).abs() < EPS);
    }

    #[test]
    fn test_scale_stays_within_pulse() {
        let animation = FlipAnimation::default();
        for step in 0..=200 {
            let frame = animation.sample(step as f64 * 10.0, 0.0, CoinChoice::Heads);
            assert!(frame.scale >= 0.9 - EPS && frame.scale <= 1.1 + EPS);
        }
    }

    #[test]
    fn test_final_frame_snaps_to_face() {
        let animation = FlipAnimation::default();
        for (face, rotation) in [(CoinChoice::Heads, 0.0), (CoinChoice::Tails, PI)] {
            let frame = animation.sample(2000.0, 3.0, face);
            assert!(frame.is_complete());
            assert_eq!(frame.rotation, rotation);
            assert_eq!(frame.vertical_offset, 0.0);
            assert_eq!(frame.horizontal_offset, 0.0);
            assert_eq!(frame.scale, 1.0);
        }
    }

    #[test]
    fn test_progress_is_monotonic() {
        let animation = FlipAnimation::default();
        let mut last = 0.0;
        for step in 0..300 {
            let progress = animation.sample(step as f64 * 7.3, 0.0, CoinChoice::Tails).progress;
            assert!(progress >= last);
            last = progress;
        }
        assert_eq!(last, 1.0);
    }
}
