//! Purchase operations for the currency shop and the void shop.

use super::data::{shop_item, void_item};
use super::types::{PurchaseTarget, ShopItemId, VoidItemId};
use crate::core::economy::{shop_cost, void_cost};
use crate::core::error::{GameError, GameResult};
use crate::core::events::GameEvent;
use crate::core::game_state::ProgressionState;

/// A validated purchase, returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Purchase {
    pub target: PurchaseTarget,
    pub new_level: u32,
    pub cost: u64,
}

impl Purchase {
    pub fn event(&self) -> GameEvent {
        GameEvent::PurchaseCompleted {
            target: self.target,
            new_level: self.new_level,
            cost: self.cost,
        }
    }
}

/// Checks level cap, stale price and funds, in that order.
fn validate(
    current_level: u32,
    max_level: u32,
    expected_cost: u64,
    actual_cost: u64,
    available: u64,
) -> GameResult<()> {
    if current_level >= max_level {
        return Err(GameError::MaxLevelReached { max_level });
    }
    if expected_cost != actual_cost {
        return Err(GameError::StalePriceMismatch {
            expected: expected_cost,
            actual: actual_cost,
        });
    }
    if available < actual_cost {
        return Err(GameError::InsufficientFunds {
            cost: actual_cost,
            available,
        });
    }
    Ok(())
}

/// Check if the state can afford the next level of a shop item
pub fn can_afford_shop_item(state: &ProgressionState, id: ShopItemId) -> bool {
    let item = shop_item(id);
    let level = state.upgrade_level(id);
    level < item.max_level && state.currency >= shop_cost(item, level)
}

pub fn can_afford_void_item(state: &ProgressionState, id: VoidItemId) -> bool {
    let item = void_item(id);
    let level = state.void_level(id);
    level < item.max_level && state.void_points >= void_cost(item, level)
}

/// Buys one level of a shop item with currency.
///
/// `expected_cost` is the price the player saw; a mismatch means the view
/// was stale and the purchase is refused. On error the state is unchanged.
pub fn purchase_shop_item(
    state: &mut ProgressionState,
    id: ShopItemId,
    expected_cost: u64,
) -> GameResult<Purchase> {
    let item = shop_item(id);
    let level = state.upgrade_level(id);
    let cost = shop_cost(item, level);
    validate(level, item.max_level, expected_cost, cost, state.currency)?;

    state.currency -= cost;
    state.upgrade_levels.insert(id, level + 1);
    log::info!("bought {} level {} for {cost}", item.name, level + 1);

    Ok(Purchase {
        target: PurchaseTarget::Shop(id),
        new_level: level + 1,
        cost,
    })
}

/// Buys one level of a void item with void points.
pub fn purchase_void_item(
    state: &mut ProgressionState,
    id: VoidItemId,
    expected_cost: u64,
) -> GameResult<Purchase> {
    let item = void_item(id);
    let level = state.void_level(id);
    let cost = void_cost(item, level);
    validate(level, item.max_level, expected_cost, cost, state.void_points)?;

    state.void_points -= cost;
    state.void_upgrades.insert(id, level + 1);
    log::info!("bought {} level {} for {cost} VP", item.name, level + 1);

    Ok(Purchase {
        target: PurchaseTarget::Void(id),
        new_level: level + 1,
        cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_debits_exact_cost() {
        let mut state = ProgressionState::new();
        state.currency = 1_000;
        let before = state.clone();

        let purchase = purchase_shop_item(&mut state, ShopItemId::PermanentLuck, 100).unwrap();
        assert_eq!(purchase.cost, 100);
        assert_eq!(purchase.new_level, 1);
        assert_eq!(state.currency, 900);
        assert_eq!(state.upgrade_level(ShopItemId::PermanentLuck), 1);

        // Nothing else moved
        let mut expected = before;
        expected.currency = 900;
        expected.upgrade_levels.insert(ShopItemId::PermanentLuck, 1);
        assert_eq!(state, expected);
    }

    #[test]
    fn test_purchase_insufficient_funds() {
        let mut state = ProgressionState::new();
        state.currency = 99;
        let before = state.clone();
        let err = purchase_shop_item(&mut state, ShopItemId::PermanentLuck, 100).unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientFunds {
                cost: 100,
                available: 99
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_purchase_stale_price() {
        let mut state = ProgressionState::new();
        state.currency = 10_000;
        state.upgrade_levels.insert(ShopItemId::PermanentLuck, 1);
        let before = state.clone();
        let err = purchase_shop_item(&mut state, ShopItemId::PermanentLuck, 100).unwrap_err();
        assert_eq!(
            err,
            GameError::StalePriceMismatch {
                expected: 100,
                actual: 250
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_purchase_at_max_level() {
        let mut state = ProgressionState::new();
        state.currency = u64::MAX / 2;
        state.upgrade_levels.insert(ShopItemId::AutoSpeed, 6);
        let before = state.clone();
        let cost = shop_cost(shop_item(ShopItemId::AutoSpeed), 6);
        let err = purchase_shop_item(&mut state, ShopItemId::AutoSpeed, cost).unwrap_err();
        assert_eq!(err, GameError::MaxLevelReached { max_level: 6 });
        assert_eq!(state, before);
    }

    #[test]
    fn test_void_purchase_spends_void_points() {
        let mut state = ProgressionState::new();
        state.void_points = 3;
        state.currency = 50;
        let purchase = purchase_void_item(&mut state, VoidItemId::SuperBoost, 1).unwrap();
        assert_eq!(purchase.target, PurchaseTarget::Void(VoidItemId::SuperBoost));
        assert_eq!(state.void_points, 2);
        assert_eq!(state.currency, 50);
        assert_eq!(state.void_level(VoidItemId::SuperBoost), 1);

        // Second level costs 2
        purchase_void_item(&mut state, VoidItemId::SuperBoost, 2).unwrap();
        assert_eq!(state.void_points, 0);
        assert!(!can_afford_void_item(&state, VoidItemId::SuperBoost));
    }

    #[test]
    fn test_can_afford_checks_cap() {
        let mut state = ProgressionState::new();
        state.currency = 1_000_000;
        assert!(can_afford_shop_item(&state, ShopItemId::AutoSpeed));
        state.upgrade_levels.insert(ShopItemId::AutoSpeed, 6);
        assert!(!can_afford_shop_item(&state, ShopItemId::AutoSpeed));
    }
}
