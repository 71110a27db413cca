//! Main simulation runner using CoreGame for real game mechanics.
//!
//! A greedy bot plays each run: it keeps potions topped up, buys the cheapest
//! affordable upgrade, prestiges as soon as it can and otherwise rolls. Time
//! is simulated from the auto-roll interval plus the settle delay, so potion
//! expiry matches what a player leaving auto-roll on would see.

use super::config::SimConfig;
use super::report::SimReport;
use crate::achievements::AchievementId;
use crate::core::constants::{POTION_TICK_MS, PRESTIGE_THRESHOLD, ROLL_SETTLE_MS};
use crate::core::economy::{
    auto_roll_interval_ms, effective_luck, max_potion_stacks, next_shop_cost, next_void_cost,
};
use crate::core::{CoreGame, GameEvent};
use crate::shop::{can_afford_shop_item, can_afford_void_item, ShopItemId, VoidItemId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

/// One completed (or final, unfinished) prestige cycle.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PrestigeCycle {
    pub rank: u32,
    pub rolls: u64,
    pub sim_seconds: f64,
    pub highest_roll: u64,
    pub final_luck: f64,
}

/// Statistics from a single run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunStats {
    pub total_rolls: u64,
    pub sim_seconds: f64,
    pub final_prestige: u32,
    pub reached_target: bool,
    pub best_roll: u64,
    pub super_rolls: u64,
    pub rare_rolls: u64,
    pub purchases: u32,
    pub potions_drunk: u32,
    pub prestige_cycles: Vec<PrestigeCycle>,
    /// Roll number at which each achievement first unlocked
    pub achievement_rolls: BTreeMap<AchievementId, u64>,
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let r = simulate_single_run(config, rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Rolls {}, Prestige {}, Best {}, Supers {}, Purchases {}",
                run_idx + 1,
                config.num_runs,
                r.total_rolls,
                r.final_prestige,
                r.best_roll,
                r.super_rolls,
                r.purchases
            );
        }
        all_runs.push(r);
    }

    SimReport::from_runs(all_runs, config.max_rolls_per_run)
}

/// Tracks statistics during a simulation run from emitted events.
struct SimStats {
    total_rolls: u64,
    sim_ms: u64,
    best_roll: u64,
    super_rolls: u64,
    rare_rolls: u64,
    purchases: u32,
    potions_drunk: u32,
    prestige_cycles: Vec<PrestigeCycle>,
    cycle_start_roll: u64,
    cycle_start_ms: u64,
    achievement_rolls: BTreeMap<AchievementId, u64>,
}

impl SimStats {
    fn new() -> Self {
        Self {
            total_rolls: 0,
            sim_ms: 0,
            best_roll: 0,
            super_rolls: 0,
            rare_rolls: 0,
            purchases: 0,
            potions_drunk: 0,
            prestige_cycles: Vec::new(),
            cycle_start_roll: 0,
            cycle_start_ms: 0,
            achievement_rolls: BTreeMap::new(),
        }
    }

    fn process_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::RollCompleted {
                result,
                is_rare,
                was_super,
            } => {
                self.best_roll = self.best_roll.max(*result);
                self.rare_rolls += u64::from(*is_rare);
                self.super_rolls += u64::from(*was_super);
            }
            GameEvent::AchievementUnlocked { id } => {
                self.achievement_rolls.entry(*id).or_insert(self.total_rolls);
            }
            GameEvent::PurchaseCompleted { .. } => self.purchases += 1,
            GameEvent::PotionActivated { .. } => self.potions_drunk += 1,
            _ => {}
        }
    }

    fn close_cycle(&mut self, rank: u32, highest_roll: u64, final_luck: f64) {
        self.prestige_cycles.push(PrestigeCycle {
            rank,
            rolls: self.total_rolls - self.cycle_start_roll,
            sim_seconds: (self.sim_ms - self.cycle_start_ms) as f64 / 1000.0,
            highest_roll,
            final_luck,
        });
        self.cycle_start_roll = self.total_rolls;
        self.cycle_start_ms = self.sim_ms;
    }
}

/// Buys the cheapest affordable, non-maxed item; `true` if anything was bought.
fn buy_cheapest(game: &mut CoreGame<ChaCha8Rng>, stats: &mut SimStats) -> bool {
    let state = game.state();
    let shop_pick = ShopItemId::ALL
        .into_iter()
        .filter(|id| can_afford_shop_item(state, *id))
        .min_by_key(|id| next_shop_cost(state, *id));
    if let Some(id) = shop_pick {
        if let Ok(purchase) = game.buy_shop_item_at_list_price(id) {
            stats.process_event(&purchase.event());
            return true;
        }
    }

    let state = game.state();
    let void_pick = VoidItemId::ALL
        .into_iter()
        .filter(|id| can_afford_void_item(state, *id))
        .min_by_key(|id| next_void_cost(state, *id));
    if let Some(id) = void_pick {
        if let Ok(purchase) = game.buy_void_item_at_list_price(id) {
            stats.process_event(&purchase.event());
            return true;
        }
    }
    false
}

/// Simulate a single run from a fresh state to the target prestige.
fn simulate_single_run(config: &SimConfig, rng: ChaCha8Rng) -> RunStats {
    let mut game = CoreGame::new(rng);
    let mut stats = SimStats::new();
    let mut potion_clock_ms: u64 = 0;

    while stats.total_rolls < config.max_rolls_per_run
        && game.state().prestige_count < config.target_prestige
    {
        if game.state().highest_roll >= PRESTIGE_THRESHOLD {
            let rank = game.state().prestige_count;
            let highest = game.state().highest_roll;
            let luck = effective_luck(game.state());
            if game.prestige().is_ok() {
                stats.close_cycle(rank, highest, luck);
                potion_clock_ms = 0;
            }
            continue;
        }

        if config.buy_upgrades {
            while buy_cheapest(&mut game, &mut stats) {}
        }
        if config.use_potions {
            while game.state().potion_stack_count < max_potion_stacks(game.state()) {
                match game.drink_potion() {
                    Ok(event) => stats.process_event(&event),
                    Err(_) => break,
                }
            }
        }

        if let Ok(Some(outcome)) = game.roll() {
            stats.total_rolls += 1;
            for event in &outcome.events {
                stats.process_event(event);
            }
        }

        let step_ms = auto_roll_interval_ms(game.state()).max(1) + ROLL_SETTLE_MS;
        stats.sim_ms += step_ms;
        potion_clock_ms += step_ms;
        while potion_clock_ms >= POTION_TICK_MS {
            potion_clock_ms -= POTION_TICK_MS;
            game.tick_potions();
        }
    }

    let final_state = game.into_state();
    if stats.total_rolls > stats.cycle_start_roll {
        stats.close_cycle(
            final_state.prestige_count,
            final_state.highest_roll,
            effective_luck(&final_state),
        );
    }

    RunStats {
        total_rolls: stats.total_rolls,
        sim_seconds: stats.sim_ms as f64 / 1000.0,
        final_prestige: final_state.prestige_count,
        reached_target: final_state.prestige_count >= config.target_prestige,
        best_roll: stats.best_roll,
        super_rolls: stats.super_rolls,
        rare_rolls: stats.rare_rolls,
        purchases: stats.purchases,
        potions_drunk: stats.potions_drunk,
        prestige_cycles: stats.prestige_cycles,
        achievement_rolls: stats.achievement_rolls,
    }
}
