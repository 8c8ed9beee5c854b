pub mod animation;
pub mod controller;
pub mod settlement;
pub mod status;
pub mod types;

pub use types::*;
pub use animation::{ease_out_cubic, FlipAnimation};
pub use controller::FlipController;
pub use settlement::Session;
pub use status::{balance_label, parse_bet_amount, StatusLine, Tone};
