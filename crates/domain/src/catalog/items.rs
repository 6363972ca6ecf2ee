//! Consumable and trade item names.

pub const HEALING_POTION: &str = "Healing Potion";
pub const SANDWICH: &str = "Sausage Sandwich";
pub const COFFEE: &str = "Coffee";

/// Health restored by drinking one [`HEALING_POTION`].
pub const HEALING_POTION_RESTORES: u32 = 30;
