//! Encounter entity - the enemies currently opposing one player.

use serde::{Deserialize, Serialize};

use crate::catalog::EnemyKind;

/// Inclusive gold reward range of an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldRange {
    pub min: u32,
    pub max: u32,
}

impl GoldRange {
    pub fn contains(&self, amount: u32) -> bool {
        (self.min..=self.max).contains(&amount)
    }
}

/// One enemy inside an encounter. Stats are copied from the catalog at spawn
/// time so a stored encounter stays resolvable even if the catalog changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyInstance {
    pub kind: EnemyKind,
    pub hp: u32,
    pub max_hp: u32,
    pub damage: u32,
    pub gold: GoldRange,
    pub loot_chance: f64,
}

impl EnemyInstance {
    pub fn spawn(kind: EnemyKind) -> Self {
        let template = kind.template();
        Self {
            kind,
            hp: template.max_hp,
            max_hp: template.max_hp,
            damage: template.damage,
            gold: GoldRange {
                min: template.gold_min,
                max: template.gold_max,
            },
            loot_chance: template.loot_chance,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Apply a strike. Returns true if this strike killed the enemy.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.is_alive();
        self.hp = self.hp.saturating_sub(amount);
        was_alive && !self.is_alive()
    }
}

/// How an encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterConclusion {
    Victory,
    Defeat,
}

/// Lifecycle of an encounter: `Forming -> Active -> Concluded`.
///
/// `Concluded(Defeat)` is decided by the outcome applier from the player's
/// health; an encounter on its own can only observe `Victory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterPhase {
    Forming,
    Active,
    Concluded(EncounterConclusion),
}

/// Ordered list of enemies. Order matters: targeting always picks the first
/// living enemy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    enemies: Vec<EnemyInstance>,
}

impl Encounter {
    pub fn new(enemies: Vec<EnemyInstance>) -> Self {
        Self { enemies }
    }

    pub fn enemies(&self) -> &[EnemyInstance] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [EnemyInstance] {
        &mut self.enemies
    }

    pub fn alive_count(&self) -> u32 {
        self.enemies.iter().filter(|e| e.is_alive()).count() as u32
    }

    pub fn is_active(&self) -> bool {
        self.enemies.iter().any(EnemyInstance::is_alive)
    }

    /// Index of the current target: the first enemy still standing.
    pub fn first_alive_index(&self) -> Option<usize> {
        self.enemies.iter().position(EnemyInstance::is_alive)
    }

    pub fn phase(&self) -> EncounterPhase {
        if self.enemies.is_empty() {
            EncounterPhase::Forming
        } else if self.is_active() {
            EncounterPhase::Active
        } else {
            EncounterPhase::Concluded(EncounterConclusion::Victory)
        }
    }

    /// Kind of the first living enemy, used to describe who is being faced.
    pub fn leading_kind(&self) -> Option<EnemyKind> {
        self.first_alive_index().map(|i| self.enemies[i].kind)
    }
}

/// Combat state stored on a player record.
///
/// A tagged variant rather than an optional list, so "no encounter" and
/// "encounter whose enemies are all dead" cannot be confused.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "encounter", rename_all = "snake_case")]
pub enum CombatState {
    #[default]
    NoEncounter,
    Active(Encounter),
}

impl CombatState {
    /// Keep the encounter only while someone is still standing.
    pub fn from_encounter(encounter: Encounter) -> Self {
        if encounter.is_active() {
            Self::Active(encounter)
        } else {
            Self::NoEncounter
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(encounter) if encounter.is_active())
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        match self {
            Self::Active(encounter) => Some(encounter),
            Self::NoEncounter => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblins(n: usize) -> Encounter {
        Encounter::new((0..n).map(|_| EnemyInstance::spawn(EnemyKind::Goblin)).collect())
    }

    #[test]
    fn spawned_enemies_start_at_full_health() {
        let goblin = EnemyInstance::spawn(EnemyKind::Goblin);
        assert_eq!(goblin.hp, goblin.max_hp);
        assert!(goblin.is_alive());
    }

    #[test]
    fn take_damage_clamps_at_zero_and_reports_kill_once() {
        let mut goblin = EnemyInstance::spawn(EnemyKind::Goblin);
        assert!(goblin.take_damage(100));
        assert_eq!(goblin.hp, 0);
        assert!(!goblin.take_damage(5));
    }

    #[test]
    fn phase_follows_enemy_health() {
        assert_eq!(Encounter::default().phase(), EncounterPhase::Forming);
        let mut encounter = goblins(2);
        assert_eq!(encounter.phase(), EncounterPhase::Active);
        for enemy in encounter.enemies_mut() {
            enemy.hp = 0;
        }
        assert_eq!(
            encounter.phase(),
            EncounterPhase::Concluded(EncounterConclusion::Victory)
        );
    }

    #[test]
    fn cleared_encounter_is_not_stored() {
        let mut encounter = goblins(1);
        encounter.enemies_mut()[0].hp = 0;
        assert_eq!(CombatState::from_encounter(encounter), CombatState::NoEncounter);
    }

    #[test]
    fn combat_state_serializes_as_tagged_variant() {
        let json = serde_json::to_value(CombatState::NoEncounter).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "no_encounter" }));

        let active = CombatState::Active(goblins(1));
        let json = serde_json::to_value(&active).unwrap();
        assert_eq!(json["state"], "active");
        assert_eq!(json["encounter"]["enemies"][0]["kind"], "goblin");
    }
}
