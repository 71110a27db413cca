//! Luck Roller - incremental number-roller game engine
//!
//! The pure rules live in [`core`], [`shop`] and [`achievements`]; the
//! [`session`] module runs them behind a tokio actor with auto-roll, potion
//! and autosave timers. The terminal frontend is in the binary.

pub mod achievements;
pub mod core;
pub mod identity;
pub mod leaderboard;
pub mod session;
pub mod shop;
pub mod simulator;
pub mod storage;
pub mod utils;

pub use crate::core::{CoreGame, GameError, GameEvent, GameResult, ProgressionState};
