//! Spring-damper joint for the coin's cosmetic wobble
//!
//! The joint trails an anchor point (the coin's position). Each frame it is
//! pulled toward the anchor, loses a share of its velocity, and is never
//! allowed to stray further than `max_stretch` from it.

use crate::config::WiggleConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }

    fn scale(self, k: f64) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }
}

#[derive(Debug, Clone)]
pub struct WiggleJoint {
    config: WiggleConfig,
    position: Vec2,
    velocity: Vec2,
}

impl WiggleJoint {
    pub fn new(config: WiggleConfig) -> Self {
        Self {
            config,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
        }
    }

    /// Step one frame toward `anchor`; returns the offset of the joint from it
    pub fn update(&mut self, anchor: Vec2) -> Vec2 {
        let pull = anchor.sub(self.position).scale(self.config.velocity);
        self.velocity = self.velocity.add(pull).scale(self.config.damping);
        self.position = self.position.add(self.velocity);

        let offset = self.position.sub(anchor);
        let stretch = offset.length();
        if stretch > self.config.max_stretch {
            let clamped = offset.scale(self.config.max_stretch / stretch);
            self.position = anchor.add(clamped);
            return clamped;
        }

        offset
    }

    pub fn offset_from(&self, anchor: Vec2) -> Vec2 {
        self.position.sub(anchor)
    }

    pub fn is_at_rest(&self, anchor: Vec2, tolerance: f64) -> bool {
        self.offset_from(anchor).length() <= tolerance && self.velocity.length() <= tolerance
    }
}

impl Default for WiggleJoint {
    fn default() -> Self {
        Self::new(WiggleConfig::default())
    }
}
