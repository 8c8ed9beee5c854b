//! Per-frame driver
//!
//! Owns the controller and the wiggle joint, and pushes one pose per frame
//! to a [`Presenter`]. The controller itself never schedules anything; this
//! loop is the only thing that calls `advance`.

use crate::common::traits::Clock;
use crate::config::CoinflipConfig;
use crate::errors::BetError;
use crate::games::controller::FlipController;
use crate::games::status::{balance_label, parse_bet_amount, StatusLine};
use crate::games::types::{Advance, AnimationState, CoinChoice, FlipStarted, FlipState, Settlement};
use crate::wiggle::{Vec2, WiggleJoint};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

/// Everything a renderer needs to draw the coin for one frame
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CoinPose {
    pub rotation: f64,
    pub position: Vec2,
    pub scale: f64,
    /// Offset of the trailing joint from `position`
    pub wiggle: Vec2,
    pub progress: f64,
}

impl CoinPose {
    fn from_frame(frame: &AnimationState, wiggle: Vec2) -> Self {
        Self {
            rotation: frame.rotation,
            position: Vec2::new(frame.horizontal_offset, frame.vertical_offset),
            scale: frame.scale,
            wiggle,
            progress: frame.progress,
        }
    }
}

/// Presentation layer fed by the driver
pub trait Presenter {
    fn render(&mut self, pose: &CoinPose);
    fn show_balance(&mut self, label: &str);
    fn show_status(&mut self, status: &StatusLine);
    fn set_controls_enabled(&mut self, enabled: bool);
}

/// Clock on tokio's time base, so paused test runtimes control it too
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    origin: Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

pub struct FrameDriver<P: Presenter> {
    controller: FlipController,
    wiggle: WiggleJoint,
    presenter: P,
    frame_interval: Duration,
}

impl<P: Presenter> FrameDriver<P> {
    pub fn new(controller: FlipController, config: &CoinflipConfig, mut presenter: P) -> Self {
        presenter.show_balance(&balance_label(controller.balance()));
        presenter.set_controls_enabled(controller.state() == FlipState::Idle);
        presenter.render(&CoinPose::from_frame(&controller.rest_pose(), Vec2::ZERO));

        Self {
            controller,
            wiggle: WiggleJoint::new(config.wiggle.clone()),
            presenter,
            frame_interval: config.frame_interval(),
        }
    }

    pub fn controller(&self) -> &FlipController {
        &self.controller
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn wiggle(&self) -> &WiggleJoint {
        &self.wiggle
    }

    /// Handle a click on a bet button with the raw text of the amount field
    pub fn submit_bet(
        &mut self,
        choice: CoinChoice,
        amount_input: &str,
    ) -> Result<FlipStarted, BetError> {
        let result = parse_bet_amount(amount_input)
            .and_then(|amount| self.controller.place_bet(choice, amount));

        match &result {
            Ok(_) => {
                self.presenter.set_controls_enabled(false);
                self.presenter.show_status(&StatusLine::flipping());
            }
            // a click during a flip is ignored, like a disabled button
            Err(BetError::AnimationInProgress) => {}
            Err(e) => self.presenter.show_status(&StatusLine::rejected(e)),
        }

        result
    }

    /// Run one frame at the controller clock's current time
    pub fn frame(&mut self) -> Option<Settlement> {
        let advance = self.controller.tick();
        self.present(advance)
    }

    /// Run one frame at an explicit timestamp
    pub fn frame_at(&mut self, timestamp_ms: f64) -> Option<Settlement> {
        let advance = self.controller.advance(timestamp_ms);
        self.present(advance)
    }

    /// Tick frames at the configured rate until the in-flight flip settles.
    /// Returns immediately with `None` when nothing is flipping.
    pub async fn run_until_settled(&mut self) -> Option<Settlement> {
        if self.controller.state() != FlipState::Flipping {
            return None;
        }

        let mut interval = tokio::time::interval(self.frame_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut frames = 0u64;

        loop {
            interval.tick().await;
            frames += 1;
            if let Some(settlement) = self.frame() {
                debug!(frames, flip_id = %settlement.flip_id, "Flip animation finished");
                return Some(settlement);
            }
        }
    }

    /// Tick `count` frames at the configured rate whatever the state, so the
    /// joint keeps swinging while the coin rests between flips.
    /// Returns the settlement if a flip finished during these frames.
    pub async fn run_frames(&mut self, count: u64) -> Option<Settlement> {
        let mut interval = tokio::time::interval(self.frame_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut settled = None;

        for _ in 0..count {
            interval.tick().await;
            if let Some(settlement) = self.frame() {
                settled = Some(settlement);
            }
        }

        settled
    }

    fn present(&mut self, advance: Advance) -> Option<Settlement> {
        let (frame, settlement) = match advance {
            Advance::Idle => (self.controller.rest_pose(), None),
            Advance::Animating(frame) => (frame, None),
            Advance::Settled(settlement) => (settlement.frame, Some(settlement)),
        };

        let anchor = Vec2::new(frame.horizontal_offset, frame.vertical_offset);
        let wiggle = self.wiggle.update(anchor);
        self.presenter.render(&CoinPose::from_frame(&frame, wiggle));

        if let Some(ref settlement) = settlement {
            self.presenter
                .show_balance(&balance_label(settlement.outcome.balance));
            self.presenter
                .show_status(&StatusLine::settled(&settlement.outcome, settlement.state));
            self.presenter
                .set_controls_enabled(settlement.state == FlipState::Idle);
        }

        settlement
    }
}
