//! Session balance and bet settlement
//!
//! The session is the only owner of the balance. It moves through
//! `Idle -> Flipping -> Idle` and ends in `GameOver` once the balance is
//! exhausted; nothing leaves `GameOver`.

use crate::common::traits::RandomSource;
use crate::config::{SessionConfig, MAX_BALANCE};
use crate::errors::BetError;
use crate::games::types::{BetRequest, CoinChoice, FlipOutcome, FlipState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    balance: i64,
    state: FlipState,
}

impl Session {
    /// Session with a known balance, capped at [`MAX_BALANCE`]. A
    /// non-positive balance starts over.
    pub fn new(balance: i64) -> Self {
        let balance = balance.min(MAX_BALANCE);
        let state = if balance <= 0 {
            FlipState::GameOver
        } else {
            FlipState::Idle
        };
        Self { balance, state }
    }

    /// Session with a random starting balance from the configured range
    pub fn random(config: &SessionConfig, rng: &mut dyn RandomSource) -> Self {
        let balance = rng.balance_in(config.min_starting_balance, config.max_starting_balance);
        Self::new(balance)
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn state(&self) -> FlipState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.state == FlipState::Flipping
    }

    pub fn is_game_over(&self) -> bool {
        self.state == FlipState::GameOver
    }

    /// Check a bet against the current state and balance without changing anything
    pub fn validate_bet(&self, bet: &BetRequest) -> Result<(), BetError> {
        match self.state {
            FlipState::GameOver => return Err(BetError::GameOver),
            FlipState::Flipping => return Err(BetError::AnimationInProgress),
            FlipState::Idle => {}
        }

        if bet.amount <= 0 || bet.amount > self.balance {
            return Err(BetError::InvalidAmount {
                amount: bet.amount,
                balance: self.balance,
            });
        }

        Ok(())
    }

    /// Validate and lock the session for one flip
    pub(crate) fn begin_flip(&mut self, bet: &BetRequest) -> Result<(), BetError> {
        self.validate_bet(bet)?;
        self.state = FlipState::Flipping;
        Ok(())
    }

    /// Apply the result of a flip.
    ///
    /// Exactly one of `balance += amount` or `balance -= amount` happens.
    /// Winnings stop at [`MAX_BALANCE`]. A session already in `GameOver`
    /// reports the outcome but keeps its balance.
    pub fn settle(&mut self, face: CoinChoice, choice: CoinChoice, amount: i64) -> FlipOutcome {
        let won = face == choice;

        if self.state != FlipState::GameOver {
            if won {
                self.balance = self.balance.saturating_add(amount).min(MAX_BALANCE);
            } else {
                self.balance = self.balance.saturating_sub(amount);
            }

            self.state = if self.balance <= 0 {
                FlipState::GameOver
            } else {
                FlipState::Idle
            };
        }

        FlipOutcome {
            face,
            choice,
            won,
            amount,
            balance: self.balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::traits::RngSource;

    #[test]
    fn test_win_adds_amount() {
        let mut session = Session::new(100);
        let outcome = session.settle(CoinChoice::Heads, CoinChoice::Heads, 50);
        assert!(outcome.won);
        assert_eq!(outcome.balance, 150);
        assert_eq!(session.balance(), 150);
        assert_eq!(session.state(), FlipState::Idle);
    }

    #[test]
    fn test_loss_subtracts_amount() {
        let mut session = Session::new(100);
        let outcome = session.settle(CoinChoice::Tails, CoinChoice::Heads, 30);
        assert!(!outcome.won);
        assert_eq!(session.balance(), 70);
        assert_eq!(session.state(), FlipState::Idle);
    }

    #[test]
    fn test_losing_everything_ends_the_game() {
        let mut session = Session::new(50);
        session.settle(CoinChoice::Heads, CoinChoice::Tails, 50);
        assert_eq!(session.balance(), 0);
        assert!(session.is_game_over());
        assert_eq!(
            session.validate_bet(&BetRequest::new(CoinChoice::Heads, 1)),
            Err(BetError::GameOver)
        );
    }

    #[test]
    fn test_full_balance_win_at_cap_stays_idle() {
        let mut session = Session::new(MAX_BALANCE);
        let bet = BetRequest::new(CoinChoice::Heads, MAX_BALANCE);
        session.begin_flip(&bet).unwrap();

        let outcome = session.settle(CoinChoice::Heads, bet.choice, bet.amount);
        assert!(outcome.won);
        assert_eq!(outcome.balance, MAX_BALANCE);
        assert_eq!(session.state(), FlipState::Idle);
    }

    #[test]
    fn test_oversized_balance_is_capped() {
        let session = Session::new(i64::MAX);
        assert_eq!(session.balance(), MAX_BALANCE);
        assert_eq!(session.state(), FlipState::Idle);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut session = Session::new(10);
        session.settle(CoinChoice::Heads, CoinChoice::Tails, 10);
        let outcome = session.settle(CoinChoice::Heads, CoinChoice::Heads, 10);
        assert!(outcome.won);
        assert_eq!(session.balance(), 0);
        assert!(session.is_game_over());
    }

    #[test]
    fn test_amount_bounds() {
        let session = Session::new(100);
        for amount in [0, -5, 101, 150] {
            assert_eq!(
                session.validate_bet(&BetRequest::new(CoinChoice::Heads, amount)),
                Err(BetError::InvalidAmount {
                    amount,
                    balance: 100
                })
            );
        }
        assert!(session
            .validate_bet(&BetRequest::new(CoinChoice::Tails, 100))
            .is_ok());
        assert!(session
            .validate_bet(&BetRequest::new(CoinChoice::Tails, 1))
            .is_ok());
    }

    #[test]
    fn test_flipping_blocks_new_bets() {
        let mut session = Session::new(100);
        let bet = BetRequest::new(CoinChoice::Heads, 10);
        session.begin_flip(&bet).unwrap();
        assert!(session.is_animating());
        assert_eq!(session.begin_flip(&bet), Err(BetError::AnimationInProgress));
        assert_eq!(session.balance(), 100);
    }

    #[test]
    fn test_random_balance_in_range() {
        let config = SessionConfig::default();
        let mut rng = RngSource::seeded(99);
        for _ in 0..200 {
            let session = Session::random(&config, &mut rng);
            assert!((100..=1000).contains(&session.balance()));
            assert_eq!(session.state(), FlipState::Idle);
        }
    }
}
