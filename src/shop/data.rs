//! Static shop catalogs.

use super::types::{ShopCategory, ShopItem, ShopItemId, VoidItemId, VoidShopItem};

static SHOP_ITEMS: [ShopItem; 5] = [
    ShopItem {
        id: ShopItemId::PermanentLuck,
        name: "Lucky Charm",
        description: "+0.25 permanent luck multiplier",
        base_cost: 100,
        cost_multiplier: 2.5,
        max_level: 20,
        bonus_per_level: 0.25,
        category: ShopCategory::Luck,
    },
    ShopItem {
        id: ShopItemId::LuckPower,
        name: "Fortune Crystal",
        description: "+0.5 permanent luck multiplier",
        base_cost: 1000,
        cost_multiplier: 3.0,
        max_level: 10,
        bonus_per_level: 0.5,
        category: ShopCategory::Luck,
    },
    ShopItem {
        id: ShopItemId::AutoSpeed,
        name: "Speed Boost",
        description: "Faster auto-roll (50ms faster)",
        base_cost: 500,
        cost_multiplier: 2.0,
        max_level: 6,
        bonus_per_level: 50.0,
        category: ShopCategory::Speed,
    },
    ShopItem {
        id: ShopItemId::PotionSlots,
        name: "Potion Belt",
        description: "+1 max potion stack",
        base_cost: 2000,
        cost_multiplier: 4.0,
        max_level: 5,
        bonus_per_level: 1.0,
        category: ShopCategory::Potion,
    },
    ShopItem {
        id: ShopItemId::PotionDuration,
        name: "Extended Brew",
        description: "+2 minutes potion duration",
        base_cost: 1500,
        cost_multiplier: 2.5,
        max_level: 5,
        bonus_per_level: 120.0,
        category: ShopCategory::Potion,
    },
];

static VOID_ITEMS: [VoidShopItem; 3] = [
    VoidShopItem {
        id: VoidItemId::SuperBoost,
        name: "Void Amplifier",
        description: "+0.5x super roll multiplier",
        base_cost: 1,
        cost_per_level: 1,
        max_level: 5,
        bonus_per_level: 0.5,
        category: ShopCategory::SuperRoll,
    },
    VoidShopItem {
        id: VoidItemId::PotionPower,
        name: "Void Essence",
        description: "+0.25 luck per potion stack",
        base_cost: 1,
        cost_per_level: 1,
        max_level: 4,
        bonus_per_level: 0.25,
        category: ShopCategory::Potion,
    },
    VoidShopItem {
        id: VoidItemId::PotionDuration,
        name: "Void Hourglass",
        description: "+5 minutes potion duration",
        base_cost: 2,
        cost_per_level: 2,
        max_level: 3,
        bonus_per_level: 300.0,
        category: ShopCategory::Potion,
    },
];

/// The full currency shop catalog in display order.
pub fn shop_items() -> &'static [ShopItem] {
    &SHOP_ITEMS
}

/// The full void shop catalog in display order.
pub fn void_items() -> &'static [VoidShopItem] {
    &VOID_ITEMS
}

pub fn shop_item(id: ShopItemId) -> &'static ShopItem {
    // Catalog order matches ShopItemId::ALL
    &SHOP_ITEMS[id as usize]
}

pub fn void_item(id: VoidItemId) -> &'static VoidShopItem {
    &VOID_ITEMS[id as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_matches_id() {
        for id in ShopItemId::ALL {
            assert_eq!(shop_item(id).id, id);
        }
        for id in VoidItemId::ALL {
            assert_eq!(void_item(id).id, id);
        }
    }

    #[test]
    fn test_catalog_values_are_sane() {
        for item in shop_items() {
            assert!(item.base_cost > 0, "{} has no cost", item.name);
            assert!(item.cost_multiplier > 1.0);
            assert!(item.max_level > 0);
        }
        for item in void_items() {
            assert!(item.base_cost > 0);
            assert!(item.max_level > 0);
        }
    }
}
