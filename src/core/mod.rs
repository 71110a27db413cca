//! Core game state and logic.
//!
//! Pure rules (draw, economy, prestige, potions) plus the roll controller
//! that ties them into one transaction per roll. Nothing in here performs IO
//! or waits on a clock; timing lives in [`crate::session`].

pub mod constants;
pub mod core_game;
pub mod draw;
pub mod economy;
pub mod error;
pub mod events;
pub mod game_state;
pub mod potion;
pub mod prestige;
pub mod roll;

pub use core_game::{rejection_event, CoreGame};
pub use error::{GameError, GameResult, RejectReason};
pub use events::GameEvent;
pub use game_state::ProgressionState;
pub use roll::{PendingRoll, RollController, RollOutcome, RollPhase};
