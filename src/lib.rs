//! Coinflip - wager on a coin toss and watch it land
//!
//! The crate is the core of a heads-or-tails betting game: it holds the
//! player's balance, validates bets, draws a fair outcome, computes the
//! flip animation frame by frame and settles the wager when the coin lands.
//! Rendering, audio output and input widgets belong to the host; they plug
//! in through the traits in [`common::traits`] and [`driver::Presenter`].

pub mod common;
pub mod config;
pub mod driver;
pub mod errors;
pub mod games;
pub mod wiggle;

pub use config::CoinflipConfig;
pub use driver::{CoinPose, FrameDriver, Presenter, TokioClock};
pub use errors::{BetError, CoinflipError, CoinflipResult};
pub use games::{
    Advance, AnimationState, BetRequest, CoinChoice, FlipController, FlipOutcome, FlipState,
    Session, Settlement,
};
pub use wiggle::WiggleJoint;
