//! Character sheet read model.

use std::collections::BTreeMap;

use serde::Serialize;
use shadowfire_domain::{PlayerRecord, ResourcePool};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolView {
    pub current: u32,
    pub max: u32,
}

impl From<&ResourcePool> for PoolView {
    fn from(pool: &ResourcePool) -> Self {
        Self {
            current: pool.current(),
            max: pool.max(),
        }
    }
}

/// Everything the character screen shows. Numbers are fine here; this is
/// UI data, not narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterSheet {
    pub player_id: String,
    pub name: String,
    pub class: String,
    pub strength: u32,
    pub dexterity: u32,
    pub intellect: u32,
    pub unspent_points: u32,
    pub health: PoolView,
    pub mana: PoolView,
    pub weapon: String,
    pub armor: String,
    pub attack_damage: u32,
    pub inventory: BTreeMap<String, u32>,
    pub gold: u32,
    pub region: String,
    pub active_quests: Vec<String>,
    pub completed_quests: Vec<String>,
    pub in_combat: bool,
    pub fallen: bool,
}

impl From<&PlayerRecord> for CharacterSheet {
    fn from(record: &PlayerRecord) -> Self {
        Self {
            player_id: record.id.as_str().to_string(),
            name: record.name.as_str().to_string(),
            class: record.class.display_name().to_string(),
            strength: record.attributes.strength,
            dexterity: record.attributes.dexterity,
            intellect: record.attributes.intellect,
            unspent_points: record.unspent_points,
            health: PoolView::from(&record.health),
            mana: PoolView::from(&record.mana),
            weapon: record.weapon.clone(),
            armor: record.armor.clone(),
            attack_damage: record.attack_damage(),
            inventory: record
                .inventory
                .iter()
                .map(|(item, count)| (item.to_string(), count))
                .collect(),
            gold: record.gold,
            region: record.region.region().name.to_string(),
            active_quests: record
                .active_quests
                .iter()
                .map(|id| id.quest().name.to_string())
                .collect(),
            completed_quests: record
                .completed_quests
                .iter()
                .map(|id| id.quest().name.to_string())
                .collect(),
            in_combat: record.in_combat(),
            fallen: record.is_fallen(),
        }
    }
}
