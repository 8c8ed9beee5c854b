//! Player-facing text: balance line, outcome messages and bet input parsing

use crate::errors::BetError;
use crate::games::types::{FlipOutcome, FlipState};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FLIPPING: &str = "Flipping...";
pub const INVALID_BET: &str = "Invalid bet amount!";

/// How a status line should be styled
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Win,
    Lose,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
}

impl StatusLine {
    pub fn flipping() -> Self {
        Self {
            text: FLIPPING.to_string(),
            tone: Tone::Neutral,
        }
    }

    /// Message for a refused bet
    pub fn rejected(error: &BetError) -> Self {
        let text = match error {
            BetError::InvalidAmount { .. } => INVALID_BET.to_string(),
            other => other.to_string(),
        };
        Self {
            text,
            tone: Tone::Lose,
        }
    }

    /// Message for a settled flip, e.g. `HEADS! You won $50!`
    pub fn settled(outcome: &FlipOutcome, state: FlipState) -> Self {
        let mut text = outcome.to_string();
        if state == FlipState::GameOver {
            text.push_str(" Game Over!");
        }
        Self {
            text,
            tone: if outcome.won { Tone::Win } else { Tone::Lose },
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Display for FlipOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let face = self.face.to_string().to_uppercase();
        if self.won {
            write!(f, "{}! You won ${}!", face, self.amount)
        } else {
            write!(f, "{}! You lost ${}.", face, self.amount)
        }
    }
}

pub fn balance_label(balance: i64) -> String {
    format!("Balance: ${}", balance)
}

/// Read a bet amount the way a lenient number field does: optional leading
/// whitespace and sign, then as many digits as are present. Anything after
/// the digits is ignored, so `"3.7"` is 3 and `"12abc"` is 12.
pub fn parse_bet_amount(input: &str) -> Result<i64, BetError> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    let invalid = BetError::InvalidAmount {
        amount: 0,
        balance: 0,
    };
    if digits_len == 0 {
        return Err(invalid);
    }

    let magnitude: i64 = rest[..digits_len].parse().map_err(|_| invalid)?;
    Ok(if negative { -magnitude } else { magnitude })
}
