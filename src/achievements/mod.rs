//! Achievement system module.
//!
//! Achievements are one-time permanent luck bonuses unlocked by reaching a
//! roll threshold. The unlocked set lives in the progression state and is
//! never reset by prestige.

pub mod data;
pub mod types;

pub use data::{achievements_reached, get_achievement_def, next_locked, ALL_ACHIEVEMENTS};
pub use types::{AchievementDef, AchievementId, UnlockedAchievements};
