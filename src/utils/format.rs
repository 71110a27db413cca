//! Display helpers: compact numbers and roll rarity tiers.

use crate::core::constants::{LEGENDARY_ROLL, RARE_ROLL, UNCOMMON_ROLL};

/// Formats a count as `999`, `1.23K`, `4.56M` or `7.89B`.
pub fn format_number(value: u64) -> String {
    const UNITS: [(u64, &str); 3] = [
        (1_000_000_000, "B"),
        (1_000_000, "M"),
        (1_000, "K"),
    ];
    for (scale, suffix) in UNITS {
        if value >= scale {
            return format!("{:.2}{suffix}", value as f64 / scale as f64);
        }
    }
    value.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RollTier {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl RollTier {
    pub fn from_value(value: u64) -> Self {
        match value {
            v if v >= LEGENDARY_ROLL => RollTier::Legendary,
            v if v >= RARE_ROLL => RollTier::Rare,
            v if v >= UNCOMMON_ROLL => RollTier::Uncommon,
            _ => RollTier::Common,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RollTier::Common => "Common",
            RollTier::Uncommon => "Uncommon",
            RollTier::Rare => "Rare",
            RollTier::Legendary => "Legendary",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_234), "1.23K");
        assert_eq!(format_number(4_560_000), "4.56M");
        assert_eq!(format_number(2_147_483_647), "2.15B");
    }

    #[test]
    fn test_roll_tiers() {
        assert_eq!(RollTier::from_value(99_999_999), RollTier::Common);
        assert_eq!(RollTier::from_value(100_000_000), RollTier::Uncommon);
        assert_eq!(RollTier::from_value(1_000_000_000), RollTier::Rare);
        assert_eq!(RollTier::from_value(2_000_000_000), RollTier::Legendary);
        assert!(RollTier::Legendary > RollTier::Common);
    }
}
