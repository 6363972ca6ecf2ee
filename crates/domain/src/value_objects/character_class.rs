//! Playable classes and their starting kits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::equipment::{armor, weapons};
use crate::error::DomainError;
use crate::value_objects::Attributes;

/// Base health before strength and armor are added.
pub const BASE_HEALTH: u32 = 50;
/// Health gained per point of strength at creation.
pub const HEALTH_PER_STRENGTH: u32 = 3;
/// Base mana before intellect is added.
pub const BASE_MANA: u32 = 20;
/// Mana gained per point of intellect at creation.
pub const MANA_PER_INTELLECT: u32 = 5;
/// Unspent attribute points granted to a new character.
pub const STARTING_ATTRIBUTE_POINTS: u32 = 3;
/// Gold in a new character's purse.
pub const STARTING_GOLD: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Ranger,
}

/// Everything a class hands a freshly created character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartingKit {
    pub attributes: Attributes,
    pub weapon: &'static str,
    pub armor: &'static str,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [Self::Warrior, Self::Mage, Self::Rogue, Self::Ranger];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warrior => "warrior",
            Self::Mage => "mage",
            Self::Rogue => "rogue",
            Self::Ranger => "ranger",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Warrior => "Warrior",
            Self::Mage => "Mage",
            Self::Rogue => "Rogue",
            Self::Ranger => "Ranger",
        }
    }

    pub fn starting_kit(&self) -> StartingKit {
        match self {
            Self::Warrior => StartingKit {
                attributes: Attributes::new(18, 10, 6),
                weapon: weapons::WOODEN_SWORD,
                armor: armor::CHAINMAIL,
            },
            Self::Mage => StartingKit {
                attributes: Attributes::new(6, 10, 18),
                weapon: weapons::APPRENTICE_STAFF,
                armor: armor::APPRENTICE_ROBE,
            },
            Self::Rogue => StartingKit {
                attributes: Attributes::new(10, 16, 8),
                weapon: weapons::ROGUES_DAGGER,
                armor: armor::LEATHER_JERKIN,
            },
            Self::Ranger => StartingKit {
                attributes: Attributes::new(10, 17, 8),
                weapon: weapons::OAK_BOW,
                armor: armor::STUDDED_LEATHER,
            },
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CharacterClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|class| class.as_str() == wanted)
            .ok_or_else(|| DomainError::parse(format!("Unknown class: {}", wanted)))
    }
}

/// Maximum health for a character with these attributes and armor.
pub fn derived_max_health(attributes: &Attributes, armor_name: &str) -> u32 {
    BASE_HEALTH
        .saturating_add(attributes.strength.saturating_mul(HEALTH_PER_STRENGTH))
        .saturating_add(crate::catalog::equipment::armor_stats(armor_name).health_bonus)
}

/// Maximum mana for a character with these attributes.
pub fn derived_max_mana(attributes: &Attributes) -> u32 {
    BASE_MANA.saturating_add(attributes.intellect.saturating_mul(MANA_PER_INTELLECT))
}
