//! Roll controller: one roll transaction from request to commit.
//!
//! A roll is requested (`Idle -> Rolling`), then committed after the
//! presentation layer's settle delay (`Rolling -> Idle`). Only one roll may
//! be in flight; a request while rolling is dropped. The commit reads the
//! luck derived at commit time, draws, and applies every side effect to the
//! state in one step, returning a [`RollOutcome`] with the events that
//! describe what happened.

use super::constants::{
    BASE_LUCK_CAP, LUCK_GROWTH_FLOOR, LUCK_GROWTH_SCHEDULE, RARE_CEILING_FRACTION,
    ROLLS_PER_SUPER,
};
use super::draw::{draw, draw_ceiling};
use super::economy::{effective_luck, void_super_boost};
use super::error::{GameError, GameResult};
use super::events::GameEvent;
use super::game_state::ProgressionState;
use crate::achievements::achievements_reached;
use rand::Rng;

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollPhase {
    #[default]
    Idle,
    Rolling(PendingRoll),
}

/// A roll that has been requested but not yet committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRoll {
    /// Captured at request time from the armed flag
    pub is_super: bool,
}

/// Result of committing a roll.
#[derive(Debug, Clone, PartialEq)]
pub struct RollOutcome {
    pub result: u64,
    pub is_rare: bool,
    pub was_super: bool,
    /// Ceiling the result was drawn under
    pub effective_max: u64,
    pub luck: f64,
    /// Events in order; `RollCompleted` is always last.
    pub events: Vec<GameEvent>,
}

impl RollOutcome {
    pub fn is_new_high_score(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::NewHighScore { .. }))
    }
}

/// Luck gained by one roll at the given base luck.
pub fn luck_growth(base_luck: f64) -> f64 {
    LUCK_GROWTH_SCHEDULE
        .iter()
        .find(|(below, _)| base_luck < *below)
        .map(|(_, step)| *step)
        .unwrap_or(LUCK_GROWTH_FLOOR)
}

/// Base luck after one more roll, clamped to the cap.
pub fn grow_base_luck(base_luck: f64) -> f64 {
    (base_luck + luck_growth(base_luck)).min(BASE_LUCK_CAP)
}

/// Whether a result counts as rare: top 20% of its ceiling, or any super roll.
pub fn is_rare_roll(result: u64, effective_max: u64, was_super: bool) -> bool {
    was_super || result as f64 >= RARE_CEILING_FRACTION * effective_max as f64
}

#[derive(Debug, Default)]
pub struct RollController {
    phase: RollPhase,
}

impl RollController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RollPhase {
        self.phase
    }

    pub fn is_rolling(&self) -> bool {
        matches!(self.phase, RollPhase::Rolling(_))
    }

    /// Starts a roll. Returns `None` (and changes nothing) if one is in flight.
    pub fn request(&mut self, state: &ProgressionState) -> Option<PendingRoll> {
        if self.is_rolling() {
            log::trace!("roll request dropped: already rolling");
            return None;
        }
        let pending = PendingRoll {
            is_super: state.is_super_roll_armed,
        };
        self.phase = RollPhase::Rolling(pending);
        Some(pending)
    }

    /// Commits the in-flight roll.
    ///
    /// Fails with [`GameError::InvariantViolation`] if no roll is in flight
    /// or the state is corrupt; in both cases the state is not modified and
    /// the controller returns to `Idle`.
    pub fn commit<R: Rng + ?Sized>(
        &mut self,
        state: &mut ProgressionState,
        rng: &mut R,
    ) -> GameResult<RollOutcome> {
        let pending = match std::mem::take(&mut self.phase) {
            RollPhase::Rolling(pending) => pending,
            RollPhase::Idle => {
                return Err(GameError::InvariantViolation(
                    "roll committed while idle".to_string(),
                ))
            }
        };
        if let Err(err) = state.validate() {
            log::error!("aborting roll: {err}");
            return Err(err);
        }

        let was_super = pending.is_super;
        let luck = effective_luck(state);
        let boost = void_super_boost(state);
        let effective_max = draw_ceiling(luck, was_super, boost);
        let result = draw(rng, luck, was_super, boost);

        let mut events = Vec::new();

        state.roll_count += 1;
        state.base_luck = grow_base_luck(state.base_luck);

        if was_super {
            state.rolls_until_super = ROLLS_PER_SUPER;
            state.is_super_roll_armed = false;
        } else {
            state.rolls_until_super = state.rolls_until_super.saturating_sub(1);
            if state.rolls_until_super == 0 {
                state.is_super_roll_armed = true;
                events.push(GameEvent::SuperRollArmed);
            }
        }

        let is_rare = is_rare_roll(result, effective_max, was_super);

        if result > state.highest_roll {
            let previous = state.highest_roll;
            state.highest_roll = result;
            state.currency = result;
            log::info!("new high score {result} (was {previous})");
            events.push(GameEvent::NewHighScore {
                value: result,
                previous,
            });

            for def in achievements_reached(result) {
                if state.unlocked_achievements.unlock(def.id) {
                    log::info!("achievement unlocked: {}", def.name);
                    events.push(GameEvent::AchievementUnlocked { id: def.id });
                }
            }
        }

        log::debug!(
            "roll #{} = {result} (max {effective_max}, luck {luck:.2}, super {was_super})",
            state.roll_count
        );
        events.push(GameEvent::RollCompleted {
            result,
            is_rare,
            was_super,
        });

        Ok(RollOutcome {
            result,
            is_rare,
            was_super,
            effective_max,
            luck,
            events,
        })
    }

    /// Requests and commits a roll in one call, for callers without a
    /// settle delay. Returns `Ok(None)` if a roll was already in flight.
    pub fn roll<R: Rng + ?Sized>(
        &mut self,
        state: &mut ProgressionState,
        rng: &mut R,
    ) -> GameResult<Option<RollOutcome>> {
        if self.request(state).is_none() {
            return Ok(None);
        }
        self.commit(state, rng).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementId;
    use crate::core::economy::achievement_luck_bonus;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    /// RNG whose every `f64` sample is just below 1.0.
    fn max_rng() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn test_luck_growth_schedule() {
        assert_eq!(luck_growth(1.0), 0.05);
        assert_eq!(luck_growth(2.99), 0.05);
        assert_eq!(luck_growth(3.0), 0.03);
        assert_eq!(luck_growth(4.99), 0.03);
        assert_eq!(luck_growth(5.0), 0.02);
        assert_eq!(luck_growth(8.0), 0.01);
        assert_eq!(grow_base_luck(9.995), 10.0);
        assert_eq!(grow_base_luck(10.0), 10.0);
    }

    #[test]
    fn test_request_while_rolling_is_dropped() {
        let state = ProgressionState::new();
        let mut controller = RollController::new();
        assert!(controller.request(&state).is_some());
        assert!(controller.request(&state).is_none());
        assert!(controller.is_rolling());
    }

    #[test]
    fn test_commit_without_request_is_invariant_violation() {
        let mut state = ProgressionState::new();
        let before = state.clone();
        let mut controller = RollController::new();
        let err = controller.commit(&mut state, &mut rng()).unwrap_err();
        assert!(matches!(err, GameError::InvariantViolation(_)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_corrupt_state_aborts_without_mutation() {
        let mut state = ProgressionState::new();
        state.base_luck = -3.0;
        let before = state.clone();
        let mut controller = RollController::new();
        let err = controller.roll(&mut state, &mut rng()).unwrap_err();
        assert!(matches!(err, GameError::InvariantViolation(_)));
        assert_eq!(state, before);
        assert!(!controller.is_rolling());
    }

    #[test]
    fn test_first_roll_updates_counters() {
        let mut state = ProgressionState::new();
        let mut controller = RollController::new();
        let outcome = controller.roll(&mut state, &mut rng()).unwrap().unwrap();

        assert!((1..=50).contains(&outcome.result));
        assert_eq!(outcome.effective_max, 50);
        assert_eq!(state.roll_count, 1);
        assert!((state.base_luck - 1.05).abs() < 1e-9);
        assert_eq!(state.rolls_until_super, 9);
        assert_eq!(state.highest_roll, outcome.result);
        assert_eq!(state.currency, outcome.result);
        assert!(matches!(
            outcome.events.last(),
            Some(GameEvent::RollCompleted { .. })
        ));
        assert!(outcome.is_new_high_score());
        assert!(!controller.is_rolling());
    }

    #[test]
    fn test_tenth_roll_arms_super_and_eleventh_consumes_it() {
        let mut state = ProgressionState::new();
        let mut controller = RollController::new();
        let mut rng = rng();

        for _ in 0..9 {
            let outcome = controller.roll(&mut state, &mut rng).unwrap().unwrap();
            assert!(!outcome.events.contains(&GameEvent::SuperRollArmed));
        }
        let tenth = controller.roll(&mut state, &mut rng).unwrap().unwrap();
        assert!(tenth.events.contains(&GameEvent::SuperRollArmed));
        assert!(!tenth.was_super);
        assert!(state.is_super_roll_armed);
        assert_eq!(state.rolls_until_super, 0);

        let eleventh = controller.roll(&mut state, &mut rng).unwrap().unwrap();
        assert!(eleventh.was_super);
        assert!(eleventh.is_rare);
        assert!(!state.is_super_roll_armed);
        assert_eq!(state.rolls_until_super, 10);
    }

    #[test]
    fn test_super_flag_captured_at_request() {
        let mut state = ProgressionState::new();
        state.rolls_until_super = 0;
        state.is_super_roll_armed = true;
        let mut controller = RollController::new();
        let pending = controller.request(&state).unwrap();
        assert!(pending.is_super);
        let outcome = controller.commit(&mut state, &mut rng()).unwrap();
        assert!(outcome.was_super);
        // Fresh luck 1.0 doubled: 2^4 * 50
        assert_eq!(outcome.effective_max, 800);
    }

    #[test]
    fn test_high_roll_unlocks_achievements_once() {
        let mut state = ProgressionState::new();
        state.base_luck = 2.0; // ceiling 800
        let mut controller = RollController::new();

        let outcome = controller.roll(&mut state, &mut max_rng()).unwrap().unwrap();
        assert!(outcome.result >= 100);
        assert!(outcome
            .events
            .contains(&GameEvent::AchievementUnlocked { id: AchievementId::First100 }));
        assert!(state.unlocked_achievements.is_unlocked(AchievementId::First100));
        let bonus = achievement_luck_bonus(&state);
        assert!((bonus - 0.1).abs() < 1e-9);

        // Beating the score again does not re-fire the unlock
        state.highest_roll = 100;
        let again = controller.roll(&mut state, &mut max_rng()).unwrap().unwrap();
        assert!(again.is_new_high_score());
        assert!(!again
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::AchievementUnlocked { .. })));
        assert!((achievement_luck_bonus(&state) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_lower_roll_keeps_currency() {
        let mut state = ProgressionState::new();
        state.highest_roll = 10_000;
        state.currency = 7_500;
        let mut controller = RollController::new();
        let outcome = controller.roll(&mut state, &mut rng()).unwrap().unwrap();
        assert!(!outcome.is_new_high_score());
        assert_eq!(state.highest_roll, 10_000);
        assert_eq!(state.currency, 7_500);
    }

    #[test]
    fn test_top_of_ceiling_is_rare() {
        let mut state = ProgressionState::new();
        let mut controller = RollController::new();
        let outcome = controller.roll(&mut state, &mut max_rng()).unwrap().unwrap();
        assert_eq!(outcome.result, 50);
        assert!(outcome.is_rare);
        assert!(is_rare_roll(40, 50, false));
        assert!(!is_rare_roll(39, 50, false));
        assert!(is_rare_roll(1, 50, true));
    }
}
