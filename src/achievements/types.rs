//! Achievement identifiers and the unlocked-set bookkeeping.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Unique identifier for each achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    #[serde(rename = "first_100")]
    First100,
    #[serde(rename = "first_1k")]
    First1K,
    #[serde(rename = "first_10k")]
    First10K,
    #[serde(rename = "first_100k")]
    First100K,
    #[serde(rename = "first_1m")]
    First1M,
    #[serde(rename = "first_10m")]
    First10M,
    #[serde(rename = "first_100m")]
    First100M,
    #[serde(rename = "first_1b")]
    First1B,
}

/// Static definition of an achievement.
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    /// Roll value that unlocks it.
    pub threshold: u64,
    /// Permanent luck added once unlocked.
    pub luck_reward: f64,
    pub icon: &'static str,
}

/// Set of unlocked achievements. Append-only, survives prestige.
///
/// Serializes as a plain list of ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnlockedAchievements(BTreeSet<AchievementId>);

impl UnlockedAchievements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an achievement is unlocked.
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.0.contains(&id)
    }

    /// Unlock an achievement. Returns true if newly unlocked.
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        self.0.insert(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = AchievementId> + '_ {
        self.0.iter().copied()
    }

    pub fn unlocked_count(&self) -> usize {
        self.0.len()
    }

    /// Get the total number of achievements.
    pub fn total_count(&self) -> usize {
        super::data::ALL_ACHIEVEMENTS.len()
    }

    /// Get unlock percentage (0.0 - 100.0).
    pub fn unlock_percentage(&self) -> f32 {
        (self.unlocked_count() as f32 / self.total_count() as f32) * 100.0
    }
}

impl FromIterator<AchievementId> for UnlockedAchievements {
    fn from_iter<I: IntoIterator<Item = AchievementId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_is_idempotent() {
        let mut unlocked = UnlockedAchievements::new();
        assert!(unlocked.unlock(AchievementId::First100));
        assert!(!unlocked.unlock(AchievementId::First100));
        assert_eq!(unlocked.unlocked_count(), 1);
    }

    #[test]
    fn test_serializes_as_id_list() {
        let unlocked: UnlockedAchievements =
            [AchievementId::First1K, AchievementId::First100].into_iter().collect();
        let json = serde_json::to_string(&unlocked).unwrap();
        assert_eq!(json, r#"["first_100","first_1k"]"#);

        let loaded: UnlockedAchievements = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, unlocked);
    }

    #[test]
    fn test_duplicate_ids_collapse_on_load() {
        let loaded: UnlockedAchievements =
            serde_json::from_str(r#"["first_1b","first_1b"]"#).unwrap();
        assert_eq!(loaded.unlocked_count(), 1);
    }

    #[test]
    fn test_unlock_percentage() {
        let mut unlocked = UnlockedAchievements::new();
        assert_eq!(unlocked.unlock_percentage(), 0.0);
        unlocked.unlock(AchievementId::First100);
        unlocked.unlock(AchievementId::First1K);
        assert!((unlocked.unlock_percentage() - 25.0).abs() < 0.01);
    }
}
