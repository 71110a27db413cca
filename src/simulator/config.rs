//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Maximum rolls per run before timeout
    pub max_rolls_per_run: u64,

    /// Prestige count a run must reach to complete
    pub target_prestige: u32,

    /// Whether the policy buys shop and void upgrades
    pub buy_upgrades: bool,

    /// Whether the policy keeps potions topped up
    pub use_potions: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            seed: None,
            max_rolls_per_run: 500_000,
            target_prestige: 1,
            buy_upgrades: true,
            use_potions: true,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for a first-prestige balance check
    pub fn quick() -> Self {
        Self {
            num_runs: 25,
            max_rolls_per_run: 200_000,
            ..Default::default()
        }
    }

    /// Config for multi-prestige progression
    pub fn prestige_test(target_prestige: u32) -> Self {
        Self {
            num_runs: 50,
            target_prestige,
            max_rolls_per_run: 2_000_000,
            ..Default::default()
        }
    }
}
