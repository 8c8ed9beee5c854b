use crate::common::traits::{AudioCue, Clock, RandomSource, SilentAudio};
use crate::config::{AnimationConfig, CoinflipConfig};
use crate::errors::{BetError, ConfigurationError};
use crate::games::animation::FlipAnimation;
use crate::games::settlement::Session;
use crate::games::types::{
    Advance, AnimationState, BetRequest, CoinChoice, FlipStarted, FlipState, Settlement,
};
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

/// A flip between `place_bet` and settlement
#[derive(Debug, Clone)]
struct InFlight {
    flip_id: Uuid,
    bet: BetRequest,
    face: CoinChoice,
    started_at_ms: f64,
    start_rotation: f64,
    /// Largest elapsed time seen so far; keeps progress from running backwards
    elapsed_ms: f64,
}

/// Drives wagers from bet to settlement.
///
/// The controller renders nothing. An external per-frame loop calls
/// [`advance`](Self::advance) with the frame timestamp and forwards the
/// returned animation values to whatever draws the coin.
pub struct FlipController {
    animation: FlipAnimation,
    session: Session,
    clock: Box<dyn Clock>,
    rng: Box<dyn RandomSource>,
    audio: Box<dyn AudioCue>,
    rest_rotation: f64,
    in_flight: Option<InFlight>,
}

impl FlipController {
    /// Create a controller with a random starting balance.
    /// The configuration is validated first.
    pub fn new(
        config: &CoinflipConfig,
        clock: Box<dyn Clock>,
        mut rng: Box<dyn RandomSource>,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let session = Session::random(&config.session, rng.as_mut());
        info!(balance = session.balance(), "New session");
        Ok(Self::with_session(session, config.animation.clone(), clock, rng))
    }

    /// Create a controller around an existing session
    pub fn with_session(
        session: Session,
        animation: AnimationConfig,
        clock: Box<dyn Clock>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            animation: FlipAnimation::new(animation),
            session,
            clock,
            rng,
            audio: Box::new(SilentAudio),
            rest_rotation: 0.0,
            in_flight: None,
        }
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioCue>) -> Self {
        self.audio = audio;
        self
    }

    pub fn balance(&self) -> i64 {
        self.session.balance()
    }

    pub fn state(&self) -> FlipState {
        self.session.state()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Bet currently being animated, if any
    pub fn current_bet(&self) -> Option<BetRequest> {
        self.in_flight.as_ref().map(|flight| flight.bet)
    }

    /// Pose of the coin between flips
    pub fn rest_pose(&self) -> AnimationState {
        AnimationState::at_rest(self.rest_rotation)
    }

    /// Start a flip. The face is drawn now but only applied at settlement.
    pub fn place_bet(&mut self, choice: CoinChoice, amount: i64) -> Result<FlipStarted, BetError> {
        let bet = BetRequest::new(choice, amount);
        if let Err(e) = self.session.begin_flip(&bet) {
            debug!(%choice, amount, error = %e, "Bet rejected");
            return Err(e);
        }

        let face = self.rng.flip();
        let flight = InFlight {
            flip_id: Uuid::new_v4(),
            bet,
            face,
            started_at_ms: self.clock.now_ms(),
            start_rotation: self.rest_rotation,
            elapsed_ms: 0.0,
        };

        info!(flip_id = %flight.flip_id, %choice, amount, "Flip started");
        let started = FlipStarted {
            flip_id: flight.flip_id,
            bet,
            started_at_ms: flight.started_at_ms,
        };
        self.in_flight = Some(flight);
        self.play_flip_sound();

        Ok(started)
    }

    /// Step the animation to `timestamp_ms` (same time base as the clock)
    pub fn advance(&mut self, timestamp_ms: f64) -> Advance {
        let Some(mut flight) = self.in_flight.take() else {
            return Advance::Idle;
        };

        let elapsed = (timestamp_ms - flight.started_at_ms).max(flight.elapsed_ms);
        flight.elapsed_ms = elapsed;

        let frame = self
            .animation
            .sample(elapsed, flight.start_rotation, flight.face);
        if !frame.is_complete() {
            trace!(progress = frame.progress, "Flip frame");
            self.in_flight = Some(flight);
            return Advance::Animating(frame);
        }

        Advance::Settled(self.finish(flight, frame))
    }

    /// Step the animation to the clock's current time
    pub fn tick(&mut self) -> Advance {
        let now = self.clock.now_ms();
        self.advance(now)
    }

    fn finish(&mut self, flight: InFlight, frame: AnimationState) -> Settlement {
        let outcome = self
            .session
            .settle(flight.face, flight.bet.choice, flight.bet.amount);
        self.rest_rotation = flight.face.target_rotation();

        info!(
            flip_id = %flight.flip_id,
            face = %outcome.face,
            won = outcome.won,
            amount = outcome.amount,
            balance = outcome.balance,
            "Flip settled"
        );
        if self.session.is_game_over() {
            warn!(balance = outcome.balance, "Balance exhausted, game over");
        }

        Settlement {
            flip_id: flight.flip_id,
            frame,
            outcome,
            state: self.session.state(),
        }
    }

    fn play_flip_sound(&mut self) {
        if let Err(e) = self.audio.play() {
            debug!(error = %e, "Flip sound skipped");
        }
    }
}
