//! Self-contained game engine: state, roll controller and RNG in one owner.
//!
//! Used directly by the simulator and tests, and owned by the session actor
//! in the interactive game. Every operation returns a `GameResult`; recoverable
//! rejections are logged here and can be turned into presentation events with
//! [`rejection_event`].

use super::economy::{next_shop_cost, next_void_cost};
use super::error::{GameError, GameResult};
use super::events::GameEvent;
use super::game_state::ProgressionState;
use super::potion::{drink_potion, tick_potions};
use super::prestige::perform_prestige;
use super::roll::{PendingRoll, RollController, RollOutcome};
use crate::shop::{purchase_shop_item, purchase_void_item, Purchase, ShopItemId, VoidItemId};
use rand::Rng;

/// Event describing a refused action, `None` for invariant violations.
pub fn rejection_event(err: &GameError) -> Option<GameEvent> {
    err.reject_reason()
        .map(|reason| GameEvent::PurchaseRejected { reason })
}

fn log_rejection<T>(action: &str, result: &GameResult<T>) {
    match result {
        Err(GameError::InvariantViolation(msg)) => log::error!("{action} aborted: {msg}"),
        Err(err) => log::warn!("{action} rejected: {err}"),
        Ok(_) => {}
    }
}

pub struct CoreGame<R: Rng> {
    state: ProgressionState,
    controller: RollController,
    rng: R,
}

impl<R: Rng> CoreGame<R> {
    pub fn new(rng: R) -> Self {
        Self::from_state(ProgressionState::new(), rng)
    }

    /// Create a game from an existing state (for save/load).
    pub fn from_state(state: ProgressionState, rng: R) -> Self {
        Self {
            state,
            controller: RollController::new(),
            rng,
        }
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub fn into_state(self) -> ProgressionState {
        self.state
    }

    pub fn is_rolling(&self) -> bool {
        self.controller.is_rolling()
    }

    /// Starts a roll; `None` if one is already in flight.
    pub fn request_roll(&mut self) -> Option<PendingRoll> {
        self.controller.request(&self.state)
    }

    pub fn commit_roll(&mut self) -> GameResult<RollOutcome> {
        let result = self.controller.commit(&mut self.state, &mut self.rng);
        log_rejection("roll", &result);
        result
    }

    /// Request and commit in one step.
    pub fn roll(&mut self) -> GameResult<Option<RollOutcome>> {
        let result = self.controller.roll(&mut self.state, &mut self.rng);
        log_rejection("roll", &result);
        result
    }

    pub fn drink_potion(&mut self) -> GameResult<GameEvent> {
        let result = drink_potion(&mut self.state);
        log_rejection("potion", &result);
        result
    }

    pub fn tick_potions(&mut self) -> Option<GameEvent> {
        tick_potions(&mut self.state)
    }

    pub fn buy_shop_item(&mut self, id: ShopItemId, expected_cost: u64) -> GameResult<Purchase> {
        let result = purchase_shop_item(&mut self.state, id, expected_cost);
        log_rejection("purchase", &result);
        result
    }

    /// Buys at the currently listed price.
    pub fn buy_shop_item_at_list_price(&mut self, id: ShopItemId) -> GameResult<Purchase> {
        let cost = next_shop_cost(&self.state, id);
        self.buy_shop_item(id, cost)
    }

    pub fn buy_void_item(&mut self, id: VoidItemId, expected_cost: u64) -> GameResult<Purchase> {
        let result = purchase_void_item(&mut self.state, id, expected_cost);
        log_rejection("void purchase", &result);
        result
    }

    pub fn buy_void_item_at_list_price(&mut self, id: VoidItemId) -> GameResult<Purchase> {
        let cost = next_void_cost(&self.state, id);
        self.buy_void_item(id, cost)
    }

    pub fn prestige(&mut self) -> GameResult<GameEvent> {
        let result = perform_prestige(&mut self.state);
        log_rejection("prestige", &result);
        result
    }
}
