use super::constants::{BASE_LUCK_CAP, BASE_LUCK_START, MAX_NUMBER, ROLLS_PER_SUPER};
use super::error::{GameError, GameResult};
use crate::achievements::UnlockedAchievements;
use crate::shop::{ShopItemId, VoidItemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Authoritative record of a play session.
///
/// Fields fall in two groups. `prestige_count`, `void_points`,
/// `void_upgrades` and `unlocked_achievements` persist forever; everything
/// else belongs to the current prestige cycle and is reset by
/// [`ProgressionState::reset_cycle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionState {
    /// Rolls performed this prestige cycle
    pub roll_count: u64,
    /// Luck earned by rolling, in [1, 10]
    pub base_luck: f64,
    pub highest_roll: u64,
    /// Mirrors the latest new high score, minus purchases since
    pub currency: u64,
    pub prestige_count: u32,
    pub void_points: u64,
    #[serde(default)]
    pub upgrade_levels: BTreeMap<ShopItemId, u32>,
    #[serde(default)]
    pub void_upgrades: BTreeMap<VoidItemId, u32>,
    #[serde(default)]
    pub unlocked_achievements: UnlockedAchievements,
    #[serde(default)]
    pub potion_stack_count: u32,
    #[serde(default)]
    pub potion_time_remaining: u32,
    #[serde(default = "default_rolls_until_super")]
    pub rolls_until_super: u32,
    #[serde(default)]
    pub is_super_roll_armed: bool,
}

fn default_rolls_until_super() -> u32 {
    ROLLS_PER_SUPER
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressionState {
    /// Creates a fresh state with no progress
    pub fn new() -> Self {
        Self {
            roll_count: 0,
            base_luck: BASE_LUCK_START,
            highest_roll: 0,
            currency: 0,
            prestige_count: 0,
            void_points: 0,
            upgrade_levels: BTreeMap::new(),
            void_upgrades: BTreeMap::new(),
            unlocked_achievements: UnlockedAchievements::new(),
            potion_stack_count: 0,
            potion_time_remaining: 0,
            rolls_until_super: ROLLS_PER_SUPER,
            is_super_roll_armed: false,
        }
    }

    pub fn upgrade_level(&self, id: ShopItemId) -> u32 {
        self.upgrade_levels.get(&id).copied().unwrap_or(0)
    }

    pub fn void_level(&self, id: VoidItemId) -> u32 {
        self.void_upgrades.get(&id).copied().unwrap_or(0)
    }

    /// Resets every prestige-cycle field to its initial value.
    ///
    /// Prestige count, void points, void upgrades and achievements are kept.
    pub fn reset_cycle(&mut self) {
        let fresh = Self::new();
        self.roll_count = fresh.roll_count;
        self.base_luck = fresh.base_luck;
        self.highest_roll = fresh.highest_roll;
        self.currency = fresh.currency;
        self.upgrade_levels = fresh.upgrade_levels;
        self.potion_stack_count = fresh.potion_stack_count;
        self.potion_time_remaining = fresh.potion_time_remaining;
        self.rolls_until_super = fresh.rolls_until_super;
        self.is_super_roll_armed = fresh.is_super_roll_armed;
    }

    /// Checks the structural invariants of the state.
    ///
    /// Returns [`GameError::InvariantViolation`] describing the first broken
    /// rule. Callers abort the current operation on error.
    pub fn validate(&self) -> GameResult<()> {
        if !self.base_luck.is_finite()
            || self.base_luck < BASE_LUCK_START
            || self.base_luck > BASE_LUCK_CAP
        {
            return Err(GameError::InvariantViolation(format!(
                "base luck {} outside [{BASE_LUCK_START}, {BASE_LUCK_CAP}]",
                self.base_luck
            )));
        }
        if self.highest_roll > MAX_NUMBER {
            return Err(GameError::InvariantViolation(format!(
                "highest roll {} exceeds {MAX_NUMBER}",
                self.highest_roll
            )));
        }
        let max_stacks = super::economy::max_potion_stacks(self);
        if self.potion_stack_count > max_stacks {
            return Err(GameError::InvariantViolation(format!(
                "{} potion stacks exceeds cap {max_stacks}",
                self.potion_stack_count
            )));
        }
        if self.rolls_until_super > ROLLS_PER_SUPER {
            return Err(GameError::InvariantViolation(format!(
                "super roll counter {} exceeds {ROLLS_PER_SUPER}",
                self.rolls_until_super
            )));
        }
        if self.is_super_roll_armed != (self.rolls_until_super == 0) {
            return Err(GameError::InvariantViolation(format!(
                "super roll armed={} with counter {}",
                self.is_super_roll_armed, self.rolls_until_super
            )));
        }
        for (id, level) in &self.upgrade_levels {
            let max = crate::shop::shop_item(*id).max_level;
            if *level > max {
                return Err(GameError::InvariantViolation(format!(
                    "{id:?} level {level} exceeds max {max}"
                )));
            }
        }
        for (id, level) in &self.void_upgrades {
            let max = crate::shop::void_item(*id).max_level;
            if *level > max {
                return Err(GameError::InvariantViolation(format!(
                    "void {id:?} level {level} exceeds max {max}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementId;

    #[test]
    fn test_new_state_defaults() {
        let state = ProgressionState::new();
        assert_eq!(state.roll_count, 0);
        assert_eq!(state.base_luck, 1.0);
        assert_eq!(state.rolls_until_super, 10);
        assert!(!state.is_super_roll_armed);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_reset_cycle_keeps_permanent_fields() {
        let mut state = ProgressionState::new();
        state.roll_count = 500;
        state.base_luck = 4.2;
        state.highest_roll = 1_500_000_000;
        state.currency = 900;
        state.prestige_count = 2;
        state.void_points = 3;
        state.upgrade_levels.insert(ShopItemId::LuckPower, 4);
        state.void_upgrades.insert(VoidItemId::SuperBoost, 2);
        state.unlocked_achievements.unlock(AchievementId::First1B);
        state.potion_stack_count = 2;
        state.potion_time_remaining = 120;
        state.rolls_until_super = 0;
        state.is_super_roll_armed = true;

        state.reset_cycle();

        assert_eq!(state.roll_count, 0);
        assert_eq!(state.base_luck, 1.0);
        assert_eq!(state.highest_roll, 0);
        assert_eq!(state.currency, 0);
        assert!(state.upgrade_levels.is_empty());
        assert_eq!(state.potion_stack_count, 0);
        assert_eq!(state.potion_time_remaining, 0);
        assert_eq!(state.rolls_until_super, 10);
        assert!(!state.is_super_roll_armed);

        assert_eq!(state.prestige_count, 2);
        assert_eq!(state.void_points, 3);
        assert_eq!(state.void_level(VoidItemId::SuperBoost), 2);
        assert!(state.unlocked_achievements.is_unlocked(AchievementId::First1B));
    }

    #[test]
    fn test_validate_rejects_bad_luck() {
        let mut state = ProgressionState::new();
        state.base_luck = -1.0;
        assert!(matches!(
            state.validate(),
            Err(GameError::InvariantViolation(_))
        ));
        state.base_luck = f64::NAN;
        assert!(state.validate().is_err());
        state.base_luck = 10.5;
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inconsistent_super_flag() {
        let mut state = ProgressionState::new();
        state.is_super_roll_armed = true;
        assert!(state.validate().is_err());
        state.rolls_until_super = 0;
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_overfull_potions() {
        let mut state = ProgressionState::new();
        state.potion_stack_count = 4;
        assert!(state.validate().is_err());
        state.upgrade_levels.insert(ShopItemId::PotionSlots, 1);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_level_over_max() {
        let mut state = ProgressionState::new();
        state.upgrade_levels.insert(ShopItemId::AutoSpeed, 7);
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut state = ProgressionState::new();
        state.upgrade_levels.insert(ShopItemId::PermanentLuck, 2);
        state.unlocked_achievements.unlock(AchievementId::First100);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["upgrade_levels"]["permanent_luck"], 2);
        assert_eq!(json["unlocked_achievements"][0], "first_100");

        let loaded: ProgressionState = serde_json::from_value(json).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_missing_transient_fields_load_with_defaults() {
        let json = r#"{
            "roll_count": 12,
            "base_luck": 1.6,
            "highest_roll": 40,
            "currency": 40,
            "prestige_count": 0,
            "void_points": 0
        }"#;
        let loaded: ProgressionState = serde_json::from_str(json).unwrap();
        assert_eq!(loaded.rolls_until_super, 10);
        assert!(loaded.upgrade_levels.is_empty());
        assert!(loaded.validate().is_ok());
    }
}
