//! Static achievement definitions.

use super::types::{AchievementDef, AchievementId, UnlockedAchievements};

/// All achievement definitions in ascending threshold order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: AchievementId::First100,
        name: "Getting Started",
        description: "Roll 100 or higher",
        threshold: 100,
        luck_reward: 0.1,
        icon: "🎯",
    },
    AchievementDef {
        id: AchievementId::First1K,
        name: "Thousand Club",
        description: "Roll 1,000 or higher",
        threshold: 1_000,
        luck_reward: 0.25,
        icon: "⭐",
    },
    AchievementDef {
        id: AchievementId::First10K,
        name: "Rising Star",
        description: "Roll 10,000 or higher",
        threshold: 10_000,
        luck_reward: 0.5,
        icon: "🌟",
    },
    AchievementDef {
        id: AchievementId::First100K,
        name: "High Roller",
        description: "Roll 100,000 or higher",
        threshold: 100_000,
        luck_reward: 2.0,
        icon: "💎",
    },
    AchievementDef {
        id: AchievementId::First1M,
        name: "Millionaire",
        description: "Roll 1,000,000 or higher",
        threshold: 1_000_000,
        luck_reward: 3.0,
        icon: "👑",
    },
    AchievementDef {
        id: AchievementId::First10M,
        name: "Master Roller",
        description: "Roll 10,000,000 or higher",
        threshold: 10_000_000,
        luck_reward: 4.0,
        icon: "🔥",
    },
    AchievementDef {
        id: AchievementId::First100M,
        name: "Legend",
        description: "Roll 100,000,000 or higher",
        threshold: 100_000_000,
        luck_reward: 5.0,
        icon: "🏆",
    },
    AchievementDef {
        id: AchievementId::First1B,
        name: "Billionaire",
        description: "Roll 1,000,000,000 or higher",
        threshold: 1_000_000_000,
        luck_reward: 10.0,
        icon: "💫",
    },
];

/// Get the definition for an achievement.
pub fn get_achievement_def(id: AchievementId) -> &'static AchievementDef {
    // Table order matches declaration order of AchievementId
    &ALL_ACHIEVEMENTS[id as usize]
}

/// Achievements whose threshold is reached by `roll`.
pub fn achievements_reached(roll: u64) -> impl Iterator<Item = &'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().filter(move |a| a.threshold <= roll)
}

/// The next locked achievement, by threshold.
pub fn next_locked(unlocked: &UnlockedAchievements) -> Option<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().find(|a| !unlocked.is_unlocked(a.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_matches_id() {
        for def in ALL_ACHIEVEMENTS {
            assert_eq!(get_achievement_def(def.id).id, def.id);
        }
    }

    #[test]
    fn test_thresholds_ascend() {
        for pair in ALL_ACHIEVEMENTS.windows(2) {
            assert!(pair[0].threshold < pair[1].threshold);
        }
    }

    #[test]
    fn test_reached_at_boundary() {
        let ids: Vec<_> = achievements_reached(100).map(|a| a.id).collect();
        assert_eq!(ids, vec![AchievementId::First100]);
        assert_eq!(achievements_reached(99).count(), 0);
        assert_eq!(achievements_reached(1_000_000_000).count(), 8);
    }
}
