//! Static equipment catalog: weapons and armor.

use serde::{Deserialize, Serialize};

use crate::value_objects::{Attribute, Attributes};

/// Weapon names as stored on player records.
pub mod weapons {
    pub const APPRENTICE_STAFF: &str = "Apprentice Staff";
    pub const WOODEN_SWORD: &str = "Wooden Sword";
    pub const ROGUES_DAGGER: &str = "Rogue's Dagger";
    pub const OAK_BOW: &str = "Oak Bow";
    pub const IRON_SWORD: &str = "Iron Sword";
}

/// Armor names as stored on player records.
pub mod armor {
    pub const APPRENTICE_ROBE: &str = "Apprentice Robe";
    pub const LEATHER_JERKIN: &str = "Leather Jerkin";
    pub const STUDDED_LEATHER: &str = "Studded Leather";
    pub const CHAINMAIL: &str = "Chainmail";
}

/// How a weapon deals damage, and therefore which attribute drives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageSchool {
    Melee,
    Ranged,
    Magic,
}

impl DamageSchool {
    pub fn governing_attribute(&self) -> Attribute {
        match self {
            Self::Melee => Attribute::Strength,
            Self::Ranged => Attribute::Dexterity,
            Self::Magic => Attribute::Intellect,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponStats {
    pub name: &'static str,
    pub school: DamageSchool,
    pub base_damage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmorStats {
    pub name: &'static str,
    pub health_bonus: u32,
}

/// Used whenever a record references a weapon the catalog does not know.
pub const FALLBACK_WEAPON: WeaponStats = WeaponStats {
    name: "Improvised Weapon",
    school: DamageSchool::Melee,
    base_damage: 5,
};

const NO_ARMOR: ArmorStats = ArmorStats {
    name: "No Armor",
    health_bonus: 0,
};

const WEAPONS: [WeaponStats; 5] = [
    WeaponStats {
        name: weapons::APPRENTICE_STAFF,
        school: DamageSchool::Magic,
        base_damage: 10,
    },
    WeaponStats {
        name: weapons::WOODEN_SWORD,
        school: DamageSchool::Melee,
        base_damage: 8,
    },
    WeaponStats {
        name: weapons::ROGUES_DAGGER,
        school: DamageSchool::Melee,
        base_damage: 7,
    },
    WeaponStats {
        name: weapons::OAK_BOW,
        school: DamageSchool::Ranged,
        base_damage: 9,
    },
    WeaponStats {
        name: weapons::IRON_SWORD,
        school: DamageSchool::Melee,
        base_damage: 12,
    },
];

const ARMOR: [ArmorStats; 4] = [
    ArmorStats {
        name: armor::APPRENTICE_ROBE,
        health_bonus: 5,
    },
    ArmorStats {
        name: armor::LEATHER_JERKIN,
        health_bonus: 10,
    },
    ArmorStats {
        name: armor::STUDDED_LEATHER,
        health_bonus: 15,
    },
    ArmorStats {
        name: armor::CHAINMAIL,
        health_bonus: 25,
    },
];

/// Exact catalog lookup.
pub fn weapon_stats(name: &str) -> Option<&'static WeaponStats> {
    WEAPONS.iter().find(|w| w.name == name)
}

/// Catalog lookup that never fails; unknown weapons resolve to [`FALLBACK_WEAPON`].
pub fn resolve_weapon(name: &str) -> WeaponStats {
    weapon_stats(name).copied().unwrap_or(FALLBACK_WEAPON)
}

pub fn find_armor(name: &str) -> Option<&'static ArmorStats> {
    ARMOR.iter().find(|a| a.name == name)
}

/// Unknown armor grants no bonus.
pub fn armor_stats(name: &str) -> ArmorStats {
    find_armor(name).copied().unwrap_or(NO_ARMOR)
}

/// Damage of one player strike: weapon base plus the governing attribute.
pub fn attack_damage(weapon_name: &str, attributes: &Attributes) -> u32 {
    let weapon = resolve_weapon(weapon_name);
    weapon
        .base_damage
        .saturating_add(attributes.get(weapon.school.governing_attribute()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn melee_weapons_scale_with_strength() {
        let attrs = Attributes::new(18, 3, 3);
        assert_eq!(attack_damage(weapons::WOODEN_SWORD, &attrs), 26);
    }

    #[test]
    fn ranged_weapons_scale_with_dexterity() {
        let attrs = Attributes::new(1, 17, 1);
        assert_eq!(attack_damage(weapons::OAK_BOW, &attrs), 26);
    }

    #[test]
    fn magic_weapons_scale_with_intellect() {
        let attrs = Attributes::new(1, 1, 18);
        assert_eq!(attack_damage(weapons::APPRENTICE_STAFF, &attrs), 28);
    }

    #[test]
    fn unknown_weapon_falls_back_to_melee_five() {
        let attrs = Attributes::new(10, 20, 30);
        assert_eq!(resolve_weapon("Rusty Spork"), FALLBACK_WEAPON);
        assert_eq!(attack_damage("Rusty Spork", &attrs), 15);
    }

    #[test]
    fn unknown_armor_grants_nothing() {
        assert_eq!(armor_stats("Cardboard Box").health_bonus, 0);
        assert_eq!(armor_stats(armor::CHAINMAIL).health_bonus, 25);
    }
}
