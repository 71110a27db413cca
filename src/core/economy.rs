//! Derived quantities computed from progression state and the static catalogs.
//!
//! Everything here is pure: no function mutates state. Purchases live in
//! [`crate::shop::logic`] and call these for validation.

use super::constants::{
    AUTO_ROLL_BASE_INTERVAL_MS, BASE_POTION_DURATION_SECONDS, BASE_POTION_STACKS,
    POTION_BONUS_PER_STACK,
};
use super::draw::draw_ceiling;
use super::game_state::ProgressionState;
use crate::achievements::get_achievement_def;
use crate::shop::{shop_item, void_item, ShopCategory, ShopItem, ShopItemId, VoidItemId, VoidShopItem};

/// Cost of the next level of a shop item: `floor(base * multiplier^level)`.
pub fn shop_cost(item: &ShopItem, current_level: u32) -> u64 {
    (item.base_cost as f64 * item.cost_multiplier.powi(current_level as i32)).floor() as u64
}

/// Cost of the next level of a void item: `base + level * per_level`.
pub fn void_cost(item: &VoidShopItem, current_level: u32) -> u64 {
    item.base_cost + u64::from(current_level) * item.cost_per_level
}

/// Next-level cost for an item id at the state's current level.
pub fn next_shop_cost(state: &ProgressionState, id: ShopItemId) -> u64 {
    shop_cost(shop_item(id), state.upgrade_level(id))
}

pub fn next_void_cost(state: &ProgressionState, id: VoidItemId) -> u64 {
    void_cost(void_item(id), state.void_level(id))
}

/// Sum of luck-category shop bonuses.
pub fn permanent_luck_bonus(state: &ProgressionState) -> f64 {
    state
        .upgrade_levels
        .iter()
        .map(|(id, level)| (shop_item(*id), *level))
        .filter(|(item, _)| item.category == ShopCategory::Luck)
        .map(|(item, level)| f64::from(level) * item.bonus_per_level)
        .sum()
}

/// Sum of luck rewards over unlocked achievements.
pub fn achievement_luck_bonus(state: &ProgressionState) -> f64 {
    state
        .unlocked_achievements
        .iter()
        .map(|id| get_achievement_def(id).luck_reward)
        .sum()
}

fn void_bonus(state: &ProgressionState, id: VoidItemId) -> f64 {
    f64::from(state.void_level(id)) * void_item(id).bonus_per_level
}

/// Extra super-roll multiplier from the void shop.
pub fn void_super_boost(state: &ProgressionState) -> f64 {
    void_bonus(state, VoidItemId::SuperBoost)
}

/// Luck granted by each active potion stack.
pub fn potion_bonus_per_stack(state: &ProgressionState) -> f64 {
    POTION_BONUS_PER_STACK + void_bonus(state, VoidItemId::PotionPower)
}

/// Luck fed into the draw: base + shop + achievements + potions.
pub fn effective_luck(state: &ProgressionState) -> f64 {
    state.base_luck
        + permanent_luck_bonus(state)
        + achievement_luck_bonus(state)
        + f64::from(state.potion_stack_count) * potion_bonus_per_stack(state)
}

/// Ceiling of the next roll, accounting for an armed super roll.
pub fn next_roll_ceiling(state: &ProgressionState) -> u64 {
    draw_ceiling(
        effective_luck(state),
        state.is_super_roll_armed,
        void_super_boost(state),
    )
}

/// Auto-roll period in milliseconds; each speed level shaves 50ms, floor 0.
pub fn auto_roll_interval_ms(state: &ProgressionState) -> u64 {
    let item = shop_item(ShopItemId::AutoSpeed);
    let reduction = f64::from(state.upgrade_level(ShopItemId::AutoSpeed)) * item.bonus_per_level;
    AUTO_ROLL_BASE_INTERVAL_MS.saturating_sub(reduction as u64)
}

pub fn max_potion_stacks(state: &ProgressionState) -> u32 {
    BASE_POTION_STACKS + state.upgrade_level(ShopItemId::PotionSlots)
}

/// Full potion timer in seconds, reset each time a potion is drunk.
pub fn potion_duration_seconds(state: &ProgressionState) -> u32 {
    let shop = shop_item(ShopItemId::PotionDuration).bonus_per_level as u32;
    let void = void_item(VoidItemId::PotionDuration).bonus_per_level as u32;
    BASE_POTION_DURATION_SECONDS
        + state.upgrade_level(ShopItemId::PotionDuration) * shop
        + state.void_level(VoidItemId::PotionDuration) * void
}
