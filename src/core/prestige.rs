use super::constants::PRESTIGE_THRESHOLD;
use super::error::{GameError, GameResult};
use super::events::GameEvent;
use super::game_state::ProgressionState;

/// Checks if the player can prestige
///
/// # Returns
/// true once the cycle's highest roll reaches one billion
pub fn can_prestige(state: &ProgressionState) -> bool {
    state.highest_roll >= PRESTIGE_THRESHOLD
}

/// Fraction of the way to prestige eligibility, in [0, 1].
pub fn prestige_progress(state: &ProgressionState) -> f64 {
    (state.highest_roll as f64 / PRESTIGE_THRESHOLD as f64).min(1.0)
}

/// Performs a prestige: +1 prestige, +1 void point, cycle fields reset.
///
/// Refused with [`GameError::PrestigeNotEligible`] (state unchanged) below
/// the threshold.
pub fn perform_prestige(state: &mut ProgressionState) -> GameResult<GameEvent> {
    if !can_prestige(state) {
        return Err(GameError::PrestigeNotEligible {
            highest_roll: state.highest_roll,
            required: PRESTIGE_THRESHOLD,
        });
    }

    state.prestige_count += 1;
    state.void_points += 1;
    state.reset_cycle();

    log::info!(
        "prestige {} complete, {} void point(s)",
        state.prestige_count,
        state.void_points
    );
    Ok(GameEvent::PrestigeCompleted {
        prestige_count: state.prestige_count,
        void_points: state.void_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prestige_below_threshold_is_noop() {
        let mut state = ProgressionState::new();
        state.highest_roll = 999_999_999;
        state.currency = 999_999_999;
        let before = state.clone();
        let err = perform_prestige(&mut state).unwrap_err();
        assert_eq!(
            err,
            GameError::PrestigeNotEligible {
                highest_roll: 999_999_999,
                required: 1_000_000_000
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_prestige_at_threshold() {
        let mut state = ProgressionState::new();
        state.highest_roll = 1_000_000_000;
        state.currency = 1_000_000_000;
        let event = perform_prestige(&mut state).unwrap();
        assert_eq!(
            event,
            GameEvent::PrestigeCompleted {
                prestige_count: 1,
                void_points: 1
            }
        );
        assert_eq!(state.highest_roll, 0);
        assert_eq!(state.currency, 0);
        assert!(state.upgrade_levels.is_empty());
    }

    #[test]
    fn test_prestige_progress() {
        let mut state = ProgressionState::new();
        assert_eq!(prestige_progress(&state), 0.0);
        state.highest_roll = 500_000_000;
        assert!((prestige_progress(&state) - 0.5).abs() < 1e-9);
        state.highest_roll = 2_000_000_000;
        assert_eq!(prestige_progress(&state), 1.0);
    }
}
