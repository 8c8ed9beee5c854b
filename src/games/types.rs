use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A side of the coin, used both for the player's pick and the landed face
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CoinChoice {
    Heads,
    Tails,
}

impl CoinChoice {
    /// Resting rotation (radians) that shows this face to the camera
    pub fn target_rotation(&self) -> f64 {
        match self {
            CoinChoice::Heads => 0.0,
            CoinChoice::Tails => PI,
        }
    }

    pub fn from_bit(bit: bool) -> Self {
        if bit {
            CoinChoice::Tails
        } else {
            CoinChoice::Heads
        }
    }
}

impl fmt::Display for CoinChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinChoice::Heads => write!(f, "heads"),
            CoinChoice::Tails => write!(f, "tails"),
        }
    }
}

impl FromStr for CoinChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heads" | "h" => Ok(CoinChoice::Heads),
            "tails" | "t" => Ok(CoinChoice::Tails),
            other => Err(format!("Unknown coin side: {}", other)),
        }
    }
}

/// Controller state machine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlipState {
    Idle,
    Flipping,
    /// Terminal: balance exhausted
    GameOver,
}

impl fmt::Display for FlipState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlipState::Idle => write!(f, "idle"),
            FlipState::Flipping => write!(f, "flipping"),
            FlipState::GameOver => write!(f, "game over"),
        }
    }
}

/// A bet as submitted by the player
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BetRequest {
    pub choice: CoinChoice,
    pub amount: i64,
}

impl BetRequest {
    pub fn new(choice: CoinChoice, amount: i64) -> Self {
        Self { choice, amount }
    }
}

/// Result of one settled flip
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlipOutcome {
    pub face: CoinChoice,
    pub choice: CoinChoice,
    pub won: bool,
    pub amount: i64,
    /// Balance after settlement
    pub balance: i64,
}

/// Returned by a successful `place_bet`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlipStarted {
    pub flip_id: Uuid,
    pub bet: BetRequest,
    pub started_at_ms: f64,
}

/// Per-tick animation parameters handed to the renderer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AnimationState {
    pub progress: f64,
    pub elapsed_ms: f64,
    pub rotation: f64,
    pub vertical_offset: f64,
    pub horizontal_offset: f64,
    pub scale: f64,
}

impl AnimationState {
    /// The coin at rest, showing the face at `rotation`
    pub fn at_rest(rotation: f64) -> Self {
        Self {
            progress: 0.0,
            elapsed_ms: 0.0,
            rotation,
            vertical_offset: 0.0,
            horizontal_offset: 0.0,
            scale: 1.0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Emitted exactly once per flip, on the tick that completes it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settlement {
    pub flip_id: Uuid,
    /// Final pose: snapped rotation, origin position, unit scale
    pub frame: AnimationState,
    pub outcome: FlipOutcome,
    pub state: FlipState,
}

/// What one call to `advance` produced
#[derive(Debug, Clone)]
pub enum Advance {
    /// No flip in flight
    Idle,
    Animating(AnimationState),
    Settled(Settlement),
}
