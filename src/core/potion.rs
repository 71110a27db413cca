//! Luck potions: stacking temporary luck that expires as a group.

use super::economy::{max_potion_stacks, potion_duration_seconds};
use super::error::{GameError, GameResult};
use super::events::GameEvent;
use super::game_state::ProgressionState;

/// Drinks one potion: adds a stack and restarts the shared timer.
///
/// Refused with [`GameError::PotionStacksFull`] at the stack cap.
pub fn drink_potion(state: &mut ProgressionState) -> GameResult<GameEvent> {
    let max = max_potion_stacks(state);
    if state.potion_stack_count >= max {
        return Err(GameError::PotionStacksFull { max });
    }
    state.potion_stack_count += 1;
    state.potion_time_remaining = potion_duration_seconds(state);
    log::info!(
        "potion drunk: {} stack(s), {}s",
        state.potion_stack_count,
        state.potion_time_remaining
    );
    Ok(GameEvent::PotionActivated {
        stacks: state.potion_stack_count,
        seconds: state.potion_time_remaining,
    })
}

/// One second of potion time. Clears every stack when the timer hits zero.
pub fn tick_potions(state: &mut ProgressionState) -> Option<GameEvent> {
    if state.potion_time_remaining == 0 {
        return None;
    }
    state.potion_time_remaining -= 1;
    if state.potion_time_remaining > 0 {
        return None;
    }
    let stacks = std::mem::take(&mut state.potion_stack_count);
    log::info!("{stacks} potion stack(s) expired");
    Some(GameEvent::PotionsExpired { stacks })
}
