//! Luck-biased random number draw.
//!
//! Luck widens the reachable ceiling with its 4th power, while the uniform
//! sample is squared so low results stay far more common than high ones even
//! inside that ceiling. The draw holds no state; callers pass their own RNG.

use super::constants::{
    DRAW_CEILING_BASE, LUCK_CEILING_EXPONENT, MAX_NUMBER, SUPER_ROLL_BASE_MULTIPLIER,
};
use rand::Rng;

/// Luck multiplier applied to a draw. Super rolls get `2 + void boost`.
pub fn super_multiplier(is_super_roll: bool, void_super_boost: f64) -> f64 {
    if is_super_roll {
        SUPER_ROLL_BASE_MULTIPLIER + void_super_boost
    } else {
        1.0
    }
}

/// Highest value reachable at this (already multiplied) luck level.
pub fn ceiling_for_luck(luck: f64) -> u64 {
    let raw = (DRAW_CEILING_BASE * luck.powi(LUCK_CEILING_EXPONENT)).floor();
    if raw >= MAX_NUMBER as f64 {
        MAX_NUMBER
    } else {
        raw as u64
    }
}

/// Ceiling for a roll with the given effective luck and super-roll state.
pub fn draw_ceiling(effective_luck: f64, is_super_roll: bool, void_super_boost: f64) -> u64 {
    ceiling_for_luck(effective_luck * super_multiplier(is_super_roll, void_super_boost))
}

/// Maps a uniform sample in `[0, 1)` to a result in `[1, ceiling]`.
pub fn value_from_uniform(uniform: f64, ceiling: u64) -> u64 {
    let biased = uniform * uniform;
    let scaled = (biased * ceiling as f64).floor() as u64;
    // f64 rounding can land exactly on the ceiling for samples just below 1.0
    scaled.min(ceiling.saturating_sub(1)) + 1
}

/// Draws a roll result in `[1, draw_ceiling(..)]`.
pub fn draw<R: Rng + ?Sized>(
    rng: &mut R,
    effective_luck: f64,
    is_super_roll: bool,
    void_super_boost: f64,
) -> u64 {
    debug_assert!(
        effective_luck.is_finite() && effective_luck >= 1.0,
        "effective luck must be >= 1, got {effective_luck}"
    );
    debug_assert!(void_super_boost >= 0.0);

    let ceiling = draw_ceiling(effective_luck, is_super_roll, void_super_boost);
    let uniform: f64 = rng.gen();
    value_from_uniform(uniform, ceiling)
}
