//! Static world: regions, NPCs, vendors and quests.
//!
//! Quest triggers and completion conditions are typed predicates evaluated by
//! the engine. They are never rendered into narrator context, so players
//! cannot read activation thresholds out of the prose.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::enemies::EnemyKind;
use crate::catalog::items;
use crate::combat::EncounterTable;
use crate::error::DomainError;
use crate::value_objects::Inventory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionId {
    Mirefold,
    RedWitchLair,
}

/// Where new characters start and fallen characters wake up.
pub const HOME_REGION: RegionId = RegionId::Mirefold;

impl RegionId {
    pub const ALL: [RegionId; 2] = [Self::Mirefold, Self::RedWitchLair];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mirefold => "mirefold",
            Self::RedWitchLair => "red_witch_lair",
        }
    }

    pub fn region(&self) -> &'static Region {
        match self {
            Self::Mirefold => &MIREFOLD,
            Self::RedWitchLair => &RED_WITCH_LAIR,
        }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionId {
    type Err = DomainError;

    /// Accepts either the id (`red_witch_lair`) or the display name
    /// (`Red Witch's Lair`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted || id.region().name.to_lowercase() == wanted)
            .ok_or_else(|| DomainError::parse(format!("Unknown region: {}", wanted)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestId {
    SlayTheRedWitch,
}

impl QuestId {
    pub fn quest(&self) -> &'static Quest {
        match self {
            Self::SlayTheRedWitch => &SLAY_THE_RED_WITCH,
        }
    }
}

/// An item a vendor sells, with its price in gold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ware {
    pub item: &'static str,
    pub price: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Npc {
    pub name: &'static str,
    pub role: &'static str,
    pub description: &'static str,
    pub wares: &'static [Ware],
}

/// Condition that activates a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestTrigger {
    /// The player holds at least `count` of every listed item.
    Holds(&'static [(&'static str, u32)]),
}

impl QuestTrigger {
    pub fn is_met(&self, inventory: &Inventory) -> bool {
        match self {
            Self::Holds(requirements) => requirements
                .iter()
                .all(|(item, count)| inventory.count(item) >= *count),
        }
    }
}

/// Condition that completes a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestCompletion {
    Defeat(EnemyKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quest {
    pub id: QuestId,
    pub name: &'static str,
    pub description: &'static str,
    pub trigger: QuestTrigger,
    pub completion: QuestCompletion,
    pub reward_gold: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub id: RegionId,
    pub name: &'static str,
    pub description: &'static str,
    pub npcs: &'static [Npc],
    pub enemies: &'static [EnemyKind],
    pub quests: &'static [QuestId],
    pub exits: &'static [RegionId],
    pub encounter: EncounterTable,
}

impl Region {
    pub fn has_exit_to(&self, other: RegionId) -> bool {
        self.exits.contains(&other)
    }

    /// Price of `item` if some NPC in this region sells it.
    pub fn price_of(&self, item: &str) -> Option<Ware> {
        self.npcs
            .iter()
            .flat_map(|npc| npc.wares.iter())
            .find(|ware| ware.item.eq_ignore_ascii_case(item.trim()))
            .copied()
    }

    pub fn quests(&self) -> impl Iterator<Item = &'static Quest> + '_ {
        self.quests.iter().map(|id| id.quest())
    }
}

const SANYA: Npc = Npc {
    name: "Sanya",
    role: "Barkeep",
    description: "A stout, good-natured man in an apron, never without a rag and a cup of coffee.",
    wares: &[
        Ware {
            item: items::SANDWICH,
            price: 10,
        },
        Ware {
            item: items::COFFEE,
            price: 5,
        },
    ],
};

const SLAY_THE_RED_WITCH: Quest = Quest {
    id: QuestId::SlayTheRedWitch,
    name: "Lift the Curse from Mirefold",
    description: "Sanya whispered that the witch steals children at night. \
                  Find her lair and destroy her.",
    trigger: QuestTrigger::Holds(&[(items::SANDWICH, 2), (items::COFFEE, 1)]),
    completion: QuestCompletion::Defeat(EnemyKind::RedWitch),
    reward_gold: 50,
};

const MIREFOLD: Region = Region {
    id: RegionId::Mirefold,
    name: "Mirefold",
    description: "A bog town of crooked houses on stilts, reeking of marsh water and fried \
                  sausage. In the middle stands the tavern \"Sanya's Sandwiches\", loud with \
                  voices and clinking mugs.",
    npcs: &[SANYA],
    enemies: &[],
    quests: &[QuestId::SlayTheRedWitch],
    exits: &[RegionId::RedWitchLair],
    encounter: EncounterTable::Uniform(EnemyKind::Goblin),
};

const RED_WITCH_LAIR: Region = Region {
    id: RegionId::RedWitchLair,
    name: "Red Witch's Lair",
    description: "A dark cave beneath the roots of a rotten oak. The walls are slick with \
                  slime and runes, the air hums with magic, and deep inside waits an altar \
                  of skulls.",
    npcs: &[],
    enemies: &[EnemyKind::RedWitch],
    quests: &[],
    exits: &[RegionId::Mirefold],
    encounter: EncounterTable::Boss(EnemyKind::RedWitch),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_ids_parse_from_id_and_name() {
        assert_eq!("mirefold".parse::<RegionId>().unwrap(), RegionId::Mirefold);
        assert_eq!(
            "Red Witch's Lair".parse::<RegionId>().unwrap(),
            RegionId::RedWitchLair
        );
        assert!("atlantis".parse::<RegionId>().is_err());
    }

    #[test]
    fn exits_are_symmetric() {
        for id in RegionId::ALL {
            for exit in id.region().exits {
                assert!(exit.region().has_exit_to(id));
            }
        }
    }

    #[test]
    fn vendor_prices_are_case_insensitive() {
        let ware = RegionId::Mirefold.region().price_of("coffee").unwrap();
        assert_eq!(ware.item, items::COFFEE);
        assert!(RegionId::RedWitchLair.region().price_of("coffee").is_none());
    }

    #[test]
    fn witch_quest_triggers_on_two_sandwiches_and_coffee() {
        let quest = QuestId::SlayTheRedWitch.quest();
        let mut inv = Inventory::new();
        inv.add(items::SANDWICH, 2);
        assert!(!quest.trigger.is_met(&inv));
        inv.add(items::COFFEE, 1);
        assert!(quest.trigger.is_met(&inv));
    }
}
