//! Upgrade shops.
//!
//! The currency shop sells per-cycle upgrades that prestige wipes. The void
//! shop sells permanent upgrades paid for with void points earned by
//! prestiging.

pub mod data;
pub mod logic;
pub mod types;

pub use data::{shop_item, shop_items, void_item, void_items};
pub use logic::*;
pub use types::*;
