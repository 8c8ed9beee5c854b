//! Capabilities the controller depends on
//!
//! The controller never reads the system clock or a global RNG directly.
//! Hosts hand it these instead, and tests substitute scripted versions.

use crate::errors::AudioError;
use crate::games::types::CoinChoice;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Monotonic time source in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Source of coin faces and starting balances
pub trait RandomSource {
    /// Fair coin, independent on every call
    fn flip(&mut self) -> CoinChoice;

    /// Uniform integer in `[min, max]`
    fn balance_in(&mut self, min: i64, max: i64) -> i64;
}

/// One-shot sound played when a flip starts
pub trait AudioCue {
    fn play(&mut self) -> Result<(), AudioError>;
}

/// Hand-driven clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Adapter from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn flip(&mut self) -> CoinChoice {
        CoinChoice::from_bit(self.rng.gen::<bool>())
    }

    fn balance_in(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }
}

/// Replays a fixed list of faces, then falls back to heads
#[derive(Debug, Clone, Default)]
pub struct ScriptedFaces {
    faces: VecDeque<CoinChoice>,
}

impl ScriptedFaces {
    pub fn new<I: IntoIterator<Item = CoinChoice>>(faces: I) -> Self {
        Self {
            faces: faces.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedFaces {
    fn flip(&mut self) -> CoinChoice {
        self.faces.pop_front().unwrap_or(CoinChoice::Heads)
    }

    fn balance_in(&mut self, min: i64, _max: i64) -> i64 {
        min
    }
}

/// No sound at all
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioCue for SilentAudio {
    fn play(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_shared() {
        let clock = ManualClock::new(10.0);
        let handle = clock.clone();
        handle.advance(5.0);
        assert_eq!(clock.now_ms(), 15.0);
        handle.set(100.0);
        assert_eq!(clock.now_ms(), 100.0);
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = RngSource::seeded(7);
        let mut b = RngSource::seeded(7);
        for _ in 0..32 {
            assert_eq!(a.flip(), b.flip());
        }
    }

    #[test]
    fn test_rng_source_is_roughly_fair() {
        let mut source = RngSource::seeded(42);
        let heads = (0..10_000)
            .filter(|_| source.flip() == CoinChoice::Heads)
            .count();
        assert!((4_500..5_500).contains(&heads), "heads = {}", heads);
    }

    #[test]
    fn test_balance_in_range() {
        let mut source = RngSource::seeded(1);
        for _ in 0..1_000 {
            let balance = source.balance_in(100, 1000);
            assert!((100..=1000).contains(&balance));
        }
    }

    #[test]
    fn test_scripted_faces() {
        let mut source = ScriptedFaces::new([CoinChoice::Tails, CoinChoice::Tails]);
        assert_eq!(source.flip(), CoinChoice::Tails);
        assert_eq!(source.flip(), CoinChoice::Tails);
        assert_eq!(source.flip(), CoinChoice::Heads);
    }
}
