//! Player record - the single persisted row per player.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{attack_damage, EnemyKind, Quest, QuestCompletion, QuestId, RegionId, HOME_REGION};
use crate::entities::CombatState;
use crate::error::DomainError;
use crate::ids::PlayerId;
use crate::value_objects::{
    derived_max_health, derived_max_mana, Attribute, Attributes, CharacterClass, Inventory,
    PlayerName, ResourcePool, STARTING_ATTRIBUTE_POINTS, STARTING_GOLD,
};

/// Most exploration turns kept for narrator context.
pub const MAX_CHRONICLE_ENTRIES: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Player,
    Narrator,
}

/// One line of the exploration conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChronicleEntry {
    pub speaker: Speaker,
    pub text: String,
}

/// Everything persisted about one player.
///
/// Fields added after the first release carry `#[serde(default)]` so older
/// stored records keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: PlayerName,
    pub class: CharacterClass,

    pub attributes: Attributes,
    pub unspent_points: u32,

    pub health: ResourcePool,
    pub mana: ResourcePool,

    pub weapon: String,
    pub armor: String,
    pub inventory: Inventory,
    #[serde(default)]
    pub gold: u32,

    pub region: RegionId,
    #[serde(default)]
    pub active_quests: BTreeSet<QuestId>,
    #[serde(default)]
    pub completed_quests: BTreeSet<QuestId>,

    #[serde(default)]
    pub combat: CombatState,
    #[serde(default)]
    pub chronicle: Vec<ChronicleEntry>,

    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl PlayerRecord {
    /// Create a fresh character from its class kit.
    pub fn new(id: PlayerId, name: PlayerName, class: CharacterClass, now: DateTime<Utc>) -> Self {
        let kit = class.starting_kit();
        Self {
            id,
            name,
            class,
            attributes: kit.attributes,
            unspent_points: STARTING_ATTRIBUTE_POINTS,
            health: ResourcePool::full(derived_max_health(&kit.attributes, kit.armor)),
            mana: ResourcePool::full(derived_max_mana(&kit.attributes)),
            weapon: kit.weapon.to_string(),
            armor: kit.armor.to_string(),
            inventory: Inventory::new(),
            gold: STARTING_GOLD,
            region: HOME_REGION,
            active_quests: BTreeSet::new(),
            completed_quests: BTreeSet::new(),
            combat: CombatState::NoEncounter,
            chronicle: Vec::new(),
            created_at: now,
            last_active_at: now,
        }
    }

    pub fn is_fallen(&self) -> bool {
        self.health.is_depleted()
    }

    pub fn in_combat(&self) -> bool {
        self.combat.is_active()
    }

    /// Damage of one strike with the equipped weapon.
    pub fn attack_damage(&self) -> u32 {
        attack_damage(&self.weapon, &self.attributes)
    }

    /// Spend one unspent point on `attribute`.
    ///
    /// # Errors
    ///
    /// `DomainError::Constraint` when no points are left; the record is not
    /// modified in that case.
    pub fn allocate_point(&mut self, attribute: Attribute) -> Result<(), DomainError> {
        if self.unspent_points == 0 {
            return Err(DomainError::constraint("No unspent attribute points"));
        }
        self.attributes.increment(attribute);
        self.unspent_points -= 1;
        Ok(())
    }

    pub fn credit_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// # Errors
    ///
    /// `DomainError::Constraint` if the purse holds less than `amount`.
    pub fn spend_gold(&mut self, amount: u32) -> Result<(), DomainError> {
        if self.gold < amount {
            return Err(DomainError::constraint("Not enough gold"));
        }
        self.gold -= amount;
        Ok(())
    }

    /// Activate every quest of the current region whose trigger is now met.
    /// Returns the newly activated quests.
    pub fn activate_quests(&mut self) -> Vec<&'static Quest> {
        let region = self.region.region();
        let mut activated = Vec::new();
        for quest in region.quests() {
            if self.active_quests.contains(&quest.id) || self.completed_quests.contains(&quest.id) {
                continue;
            }
            if quest.trigger.is_met(&self.inventory) {
                self.active_quests.insert(quest.id);
                activated.push(quest);
            }
        }
        activated
    }

    /// Complete every active quest satisfied by defeating `kind`, crediting
    /// rewards. Returns the completed quests.
    pub fn complete_quests_for_defeat(&mut self, kind: EnemyKind) -> Vec<&'static Quest> {
        let done: Vec<&'static Quest> = self
            .active_quests
            .iter()
            .map(|id| id.quest())
            .filter(|quest| matches!(quest.completion, QuestCompletion::Defeat(k) if k == kind))
            .collect();
        for quest in &done {
            self.active_quests.remove(&quest.id);
            self.completed_quests.insert(quest.id);
            self.credit_gold(quest.reward_gold);
        }
        done
    }

    /// Append an exploration exchange, keeping only the newest entries.
    pub fn record_exchange(&mut self, action: impl Into<String>, reply: impl Into<String>) {
        self.chronicle.push(ChronicleEntry {
            speaker: Speaker::Player,
            text: action.into(),
        });
        self.chronicle.push(ChronicleEntry {
            speaker: Speaker::Narrator,
            text: reply.into(),
        });
        if self.chronicle.len() > MAX_CHRONICLE_ENTRIES {
            let excess = self.chronicle.len() - MAX_CHRONICLE_ENTRIES;
            self.chronicle.drain(..excess);
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_active_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::items;

    fn record(class: CharacterClass) -> PlayerRecord {
        PlayerRecord::new(
            PlayerId::new("p1").unwrap(),
            PlayerName::new("Tester").unwrap(),
            class,
            Utc::now(),
        )
    }

    #[test]
    fn new_record_starts_full_and_at_home() {
        let pc = record(CharacterClass::Rogue);
        assert_eq!(pc.health.current(), pc.health.max());
        assert_eq!(pc.mana.current(), pc.mana.max());
        assert_eq!(pc.region, HOME_REGION);
        assert_eq!(pc.unspent_points, STARTING_ATTRIBUTE_POINTS);
        assert!(!pc.in_combat());
    }

    #[test]
    fn allocate_without_points_leaves_record_unchanged() {
        let mut pc = record(CharacterClass::Mage);
        pc.unspent_points = 0;
        let before = pc.clone();
        let err = pc.allocate_point(Attribute::Intellect).unwrap_err();
        assert!(matches!(err, DomainError::Constraint(_)));
        assert_eq!(pc, before);
    }

    #[test]
    fn allocate_moves_one_point() {
        let mut pc = record(CharacterClass::Warrior);
        pc.allocate_point(Attribute::Strength).unwrap();
        assert_eq!(pc.attributes.strength, 19);
        assert_eq!(pc.unspent_points, STARTING_ATTRIBUTE_POINTS - 1);
    }

    #[test]
    fn spend_gold_refuses_overdraft() {
        let mut pc = record(CharacterClass::Warrior);
        pc.gold = 4;
        assert!(pc.spend_gold(5).is_err());
        assert_eq!(pc.gold, 4);
    }

    #[test]
    fn quests_activate_once_and_complete_on_boss_defeat() {
        let mut pc = record(CharacterClass::Warrior);
        pc.inventory.add(items::SANDWICH, 2);
        pc.inventory.add(items::COFFEE, 1);
        assert_eq!(pc.activate_quests().len(), 1);
        assert!(pc.activate_quests().is_empty());

        let gold_before = pc.gold;
        assert!(pc.complete_quests_for_defeat(EnemyKind::Goblin).is_empty());
        let done = pc.complete_quests_for_defeat(EnemyKind::RedWitch);
        assert_eq!(done.len(), 1);
        assert_eq!(pc.gold, gold_before + done[0].reward_gold);
        assert!(pc.active_quests.is_empty());

        // completed quests never re-trigger
        assert!(pc.activate_quests().is_empty());
    }

    #[test]
    fn chronicle_is_bounded() {
        let mut pc = record(CharacterClass::Ranger);
        for i in 0..20 {
            pc.record_exchange(format!("look {i}"), format!("you see {i}"));
        }
        assert_eq!(pc.chronicle.len(), MAX_CHRONICLE_ENTRIES);
        assert_eq!(pc.chronicle.last().unwrap().text, "you see 19");
        assert_eq!(pc.chronicle[0].speaker, Speaker::Player);
    }

    #[test]
    fn older_records_without_additive_fields_still_load() {
        let pc = record(CharacterClass::Warrior);
        let mut json = serde_json::to_value(&pc).unwrap();
        let obj = json.as_object_mut().unwrap();
        for field in ["gold", "active_quests", "completed_quests", "combat", "chronicle"] {
            obj.remove(field);
        }
        let loaded: PlayerRecord = serde_json::from_value(json).unwrap();
        assert_eq!(loaded.gold, 0);
        assert_eq!(loaded.combat, CombatState::NoEncounter);
    }
}
