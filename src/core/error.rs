//! Error taxonomy for economic actions and roll commits.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by state-mutating game operations.
///
/// Every variant except [`GameError::InvariantViolation`] is a recoverable
/// rejection: the operation was a no-op and the presentation layer may show
/// the reason. `InvariantViolation` means the state itself is corrupt and the
/// operation was aborted before touching it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GameError {
    #[error("insufficient funds: cost {cost}, available {available}")]
    InsufficientFunds { cost: u64, available: u64 },
    #[error("already at max level {max_level}")]
    MaxLevelReached { max_level: u32 },
    #[error("prestige requires a high roll of {required} (best is {highest_roll})")]
    PrestigeNotEligible { highest_roll: u64, required: u64 },
    #[error("price changed: expected {expected}, current {actual}")]
    StalePriceMismatch { expected: u64, actual: u64 },
    #[error("potion stacks are full ({max})")]
    PotionStacksFull { max: u32 },
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

pub type GameResult<T> = Result<T, GameError>;

/// Presentation-facing reason carried by a rejected action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    InsufficientFunds,
    MaxLevelReached,
    PrestigeNotEligible,
    StalePriceMismatch,
    PotionStacksFull,
}

impl RejectReason {
    pub fn message(&self) -> &'static str {
        match self {
            RejectReason::InsufficientFunds => "Not enough funds",
            RejectReason::MaxLevelReached => "Already maxed",
            RejectReason::PrestigeNotEligible => "Reach 1B to prestige",
            RejectReason::StalePriceMismatch => "Price changed, try again",
            RejectReason::PotionStacksFull => "Potion belt is full",
        }
    }
}

impl GameError {
    /// The recoverable reason for this error, `None` for invariant violations.
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            GameError::InsufficientFunds { .. } => Some(RejectReason::InsufficientFunds),
            GameError::MaxLevelReached { .. } => Some(RejectReason::MaxLevelReached),
            GameError::PrestigeNotEligible { .. } => Some(RejectReason::PrestigeNotEligible),
            GameError::StalePriceMismatch { .. } => Some(RejectReason::StalePriceMismatch),
            GameError::PotionStacksFull { .. } => Some(RejectReason::PotionStacksFull),
            GameError::InvariantViolation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_reason_mapping() {
        let err = GameError::InsufficientFunds {
            cost: 100,
            available: 5,
        };
        assert_eq!(err.reject_reason(), Some(RejectReason::InsufficientFunds));
        assert!(GameError::InvariantViolation("bad".into())
            .reject_reason()
            .is_none());
    }

    #[test]
    fn test_error_messages_include_values() {
        let err = GameError::StalePriceMismatch {
            expected: 100,
            actual: 250,
        };
        let text = err.to_string();
        assert!(text.contains("100"));
        assert!(text.contains("250"));
    }
}
