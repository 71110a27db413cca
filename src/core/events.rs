//! Events emitted by game operations.
//!
//! The presentation layer maps these to animations, sounds and toasts. The
//! core never waits for it to acknowledge anything.

use super::error::RejectReason;
use crate::achievements::AchievementId;
use crate::shop::PurchaseTarget;
use serde::{Deserialize, Serialize};

/// A single thing that happened during an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // ── Rolling ─────────────────────────────────────────────────
    /// A roll was committed. Always the last event of a roll.
    RollCompleted {
        result: u64,
        is_rare: bool,
        was_super: bool,
    },

    /// The roll beat the previous best; currency now mirrors it.
    NewHighScore { value: u64, previous: u64 },

    /// An achievement threshold was crossed for the first time.
    AchievementUnlocked { id: AchievementId },

    /// Ten ordinary rolls in a row; the next roll is a super roll.
    SuperRollArmed,

    /// A roll was aborted because the state broke an invariant. Nothing was
    /// applied and auto-roll has been switched off.
    RollFailed { message: String },

    // ── Economy ─────────────────────────────────────────────────
    PurchaseCompleted {
        target: PurchaseTarget,
        new_level: u32,
        cost: u64,
    },

    /// A purchase, prestige or potion was refused; state is unchanged.
    PurchaseRejected { reason: RejectReason },

    PrestigeCompleted {
        prestige_count: u32,
        void_points: u64,
    },

    // ── Potions ─────────────────────────────────────────────────
    PotionActivated { stacks: u32, seconds: u32 },

    /// The shared potion timer ran out and every stack expired.
    PotionsExpired { stacks: u32 },
}
