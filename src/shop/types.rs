//! Shop and void shop item definitions.

use serde::{Deserialize, Serialize};

/// What an upgrade affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopCategory {
    Luck,
    Speed,
    Potion,
    SuperRoll,
}

/// Upgrades bought with currency. Reset on prestige.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopItemId {
    PermanentLuck,
    LuckPower,
    AutoSpeed,
    PotionSlots,
    PotionDuration,
}

impl ShopItemId {
    /// All items in display order
    pub const ALL: [ShopItemId; 5] = [
        ShopItemId::PermanentLuck,
        ShopItemId::LuckPower,
        ShopItemId::AutoSpeed,
        ShopItemId::PotionSlots,
        ShopItemId::PotionDuration,
    ];

    /// Key shown by the terminal shop (1-5).
    pub fn key(&self) -> char {
        match self {
            ShopItemId::PermanentLuck => '1',
            ShopItemId::LuckPower => '2',
            ShopItemId::AutoSpeed => '3',
            ShopItemId::PotionSlots => '4',
            ShopItemId::PotionDuration => '5',
        }
    }
}

/// Upgrades bought with void points. Survive prestige.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoidItemId {
    SuperBoost,
    PotionPower,
    PotionDuration,
}

impl VoidItemId {
    pub const ALL: [VoidItemId; 3] = [
        VoidItemId::SuperBoost,
        VoidItemId::PotionPower,
        VoidItemId::PotionDuration,
    ];

    /// Key shown by the terminal void shop.
    pub fn key(&self) -> char {
        match self {
            VoidItemId::SuperBoost => 'z',
            VoidItemId::PotionPower => 'x',
            VoidItemId::PotionDuration => 'c',
        }
    }
}

/// Static catalog entry for a currency upgrade.
///
/// Cost grows geometrically: `floor(base_cost * cost_multiplier^level)`.
#[derive(Debug, Clone)]
pub struct ShopItem {
    pub id: ShopItemId,
    pub name: &'static str,
    pub description: &'static str,
    pub base_cost: u64,
    pub cost_multiplier: f64,
    pub max_level: u32,
    pub bonus_per_level: f64,
    pub category: ShopCategory,
}

/// Static catalog entry for a void upgrade.
///
/// Cost grows linearly: `base_cost + level * cost_per_level`.
#[derive(Debug, Clone)]
pub struct VoidShopItem {
    pub id: VoidItemId,
    pub name: &'static str,
    pub description: &'static str,
    pub base_cost: u64,
    pub cost_per_level: u64,
    pub max_level: u32,
    pub bonus_per_level: f64,
    pub category: ShopCategory,
}

/// Which catalog a purchase came from, for events and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseTarget {
    Shop(ShopItemId),
    Void(VoidItemId),
}

impl PurchaseTarget {
    pub fn name(&self) -> &'static str {
        match self {
            PurchaseTarget::Shop(id) => super::data::shop_item(*id).name,
            PurchaseTarget::Void(id) => super::data::void_item(*id).name,
        }
    }
}
