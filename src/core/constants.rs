// Draw range
pub const MAX_NUMBER: u64 = 2_500_000_000;
pub const DRAW_CEILING_BASE: f64 = 50.0;
pub const LUCK_CEILING_EXPONENT: i32 = 4;
pub const RARE_CEILING_FRACTION: f64 = 0.8;

// Base luck growth: (below this luck, add this much per roll)
pub const BASE_LUCK_START: f64 = 1.0;
pub const BASE_LUCK_CAP: f64 = 10.0;
pub const LUCK_GROWTH_SCHEDULE: [(f64, f64); 3] = [(3.0, 0.05), (5.0, 0.03), (8.0, 0.02)];
pub const LUCK_GROWTH_FLOOR: f64 = 0.01;

// Super rolls
pub const ROLLS_PER_SUPER: u32 = 10;
pub const SUPER_ROLL_BASE_MULTIPLIER: f64 = 2.0;

// Potions
pub const BASE_POTION_STACKS: u32 = 3;
pub const POTION_BONUS_PER_STACK: f64 = 0.5;
pub const BASE_POTION_DURATION_SECONDS: u32 = 300;

// Auto-roll
pub const AUTO_ROLL_BASE_INTERVAL_MS: u64 = 200;

// Prestige
pub const PRESTIGE_THRESHOLD: u64 = 1_000_000_000;

// Rarity display tiers
pub const UNCOMMON_ROLL: u64 = 100_000_000;
pub const RARE_ROLL: u64 = 1_000_000_000;
pub const LEGENDARY_ROLL: u64 = 2_000_000_000;

// Session timing
pub const ROLL_SETTLE_MS: u64 = 300;
pub const SAVE_DEBOUNCE_MS: u64 = 1000;
pub const SAVE_MAX_DELAY_MS: u64 = 10_000;
pub const POTION_TICK_MS: u64 = 1000;

// Save file format
pub const SAVE_VERSION_MAGIC: u64 = 0x4C55_434B_524F_4C4C; // "LUCKROLL"
