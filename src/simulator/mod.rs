//! Game balance simulator for Monte Carlo analysis.
//!
//! Run many seeded playthroughs to analyze:
//! - Rolls and auto-roll time to the first prestige
//! - Achievement pacing
//! - How far the shop carries luck before super rolls take over
//!
//! The simulator drives CoreGame (src/core/core_game.rs) for all game logic,
//! so results match real gameplay behavior.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{AchievementPacing, SimReport};
pub use runner::{run_simulation, PrestigeCycle, RunStats};
