//! Combat engine: builds encounters and resolves one round at a time.
//!
//! Everything here is pure. Randomness comes in through [`Dice`], so a round
//! is fully reproducible given the same rolls.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::enemies::weighted_templates;
use crate::catalog::{attack_damage, EnemyKind, LOOT_ITEM};
use crate::entities::{EnemyInstance, Encounter};
use crate::value_objects::Attributes;

/// Largest encounter a single `start` may build.
pub const MAX_ENCOUNTER_SIZE: u32 = 8;

/// Source of randomness for combat.
///
/// Implemented by the engine's random port; tests use scripted doubles.
pub trait Dice {
    /// Uniform integer in `[min, max]` (inclusive). Callers guarantee `min <= max`.
    fn roll_range(&self, min: u32, max: u32) -> u32;

    /// True with probability `p` (clamped to `[0, 1]`).
    fn roll_chance(&self, p: f64) -> bool;
}

/// How a region picks the enemies of a new encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterTable {
    /// Every enemy is the same kind.
    Uniform(EnemyKind),
    /// Each enemy is drawn independently by catalog weight.
    Weighted,
    /// A single boss; the requested count is ignored.
    Boss(EnemyKind),
}

impl Default for EncounterTable {
    fn default() -> Self {
        Self::Uniform(EnemyKind::Goblin)
    }
}

/// Build a fresh encounter of `count` enemies, clamped to `1..=8`.
pub fn start_encounter<D: Dice + ?Sized>(count: u32, table: EncounterTable, dice: &D) -> Encounter {
    let count = count.clamp(1, MAX_ENCOUNTER_SIZE);
    let enemies = match table {
        EncounterTable::Uniform(kind) => (0..count).map(|_| EnemyInstance::spawn(kind)).collect(),
        EncounterTable::Weighted => (0..count)
            .map(|_| EnemyInstance::spawn(draw_weighted(dice)))
            .collect(),
        EncounterTable::Boss(kind) => vec![EnemyInstance::spawn(kind)],
    };
    Encounter::new(enemies)
}

fn draw_weighted<D: Dice + ?Sized>(dice: &D) -> EnemyKind {
    let total: u32 = weighted_templates().map(|t| t.weight).sum();
    if total == 0 {
        return EnemyKind::Goblin;
    }
    let mut roll = dice.roll_range(1, total);
    for template in weighted_templates() {
        if roll <= template.weight {
            return template.kind;
        }
        roll -= template.weight;
    }
    EnemyKind::Goblin
}

/// Returned when a round is resolved against an encounter with nobody left
/// standing. A value, not a failure: callers narrate it as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No enemy left to target")]
pub struct NoActiveTarget;

/// Mechanical result of one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub damage_dealt: u32,
    pub enemy_killed: bool,
    pub target: EnemyKind,
    pub player_damage_taken: u32,
    pub gold_awarded: u32,
    pub items_dropped: Vec<String>,
    pub remaining_enemies: u32,
    pub combat_continues: bool,
}

/// Resolve one round: the player strikes the first living enemy, then every
/// enemy still standing strikes back.
///
/// Only the targeted enemy is modified. The player's own health is not
/// touched here; the damage taken is reported for the outcome applier.
pub fn resolve_round<D: Dice + ?Sized>(
    attributes: &Attributes,
    weapon: &str,
    encounter: &mut Encounter,
    dice: &D,
) -> Result<RoundOutcome, NoActiveTarget> {
    let index = encounter.first_alive_index().ok_or(NoActiveTarget)?;
    let damage_dealt = attack_damage(weapon, attributes);

    let target = &mut encounter.enemies_mut()[index];
    let target_kind = target.kind;
    let enemy_killed = target.take_damage(damage_dealt);

    let (gold_awarded, items_dropped) = if enemy_killed {
        let gold = dice.roll_range(target.gold.min, target.gold.max.max(target.gold.min));
        let items = if dice.roll_chance(target.loot_chance) {
            vec![LOOT_ITEM.to_string()]
        } else {
            Vec::new()
        };
        (gold, items)
    } else {
        (0, Vec::new())
    };

    let player_damage_taken = encounter
        .enemies()
        .iter()
        .filter(|e| e.is_alive())
        .fold(0u32, |acc, e| acc.saturating_add(e.damage));
    let remaining_enemies = encounter.alive_count();

    Ok(RoundOutcome {
        damage_dealt,
        enemy_killed,
        target: target_kind,
        player_damage_taken,
        gold_awarded,
        items_dropped,
        remaining_enemies,
        combat_continues: remaining_enemies > 0,
    })
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedDice;
    use super::*;
    use crate::catalog::equipment::weapons;

    fn warrior() -> Attributes {
        Attributes::new(18, 10, 6)
    }

    fn goblins(n: u32) -> Encounter {
        start_encounter(n, EncounterTable::Uniform(EnemyKind::Goblin), &ScriptedDice::default())
    }

    #[test]
    fn encounter_size_is_clamped() {
        let dice = ScriptedDice::default();
        let table = EncounterTable::default();
        assert_eq!(start_encounter(0, table, &dice).enemies().len(), 1);
        assert_eq!(start_encounter(50, table, &dice).enemies().len(), 8);
        assert_eq!(start_encounter(3, table, &dice).enemies().len(), 3);
    }

    #[test]
    fn boss_table_ignores_count() {
        let encounter = start_encounter(
            5,
            EncounterTable::Boss(EnemyKind::RedWitch),
            &ScriptedDice::default(),
        );
        assert_eq!(encounter.enemies().len(), 1);
        assert_eq!(encounter.enemies()[0].kind, EnemyKind::RedWitch);
    }

    #[test]
    fn weighted_table_follows_rolls_and_skips_bosses() {
        // goblin weight 3 covers 1..=3, skeleton weight 1 covers 4
        let dice = ScriptedDice::new(&[1, 4, 3], &[]);
        let encounter = start_encounter(3, EncounterTable::Weighted, &dice);
        let kinds: Vec<_> = encounter.enemies().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EnemyKind::Goblin, EnemyKind::Skeleton, EnemyKind::Goblin]
        );
    }

    #[test]
    fn every_enemy_starts_alive() {
        let encounter = goblins(4);
        assert!(encounter
            .enemies()
            .iter()
            .all(|e| e.hp == e.max_hp && e.hp > 0));
    }

    #[test]
    fn wooden_sword_kills_a_goblin_in_one_strike() {
        let mut encounter = goblins(3);
        let dice = ScriptedDice::new(&[7], &[false]);

        let outcome = resolve_round(&warrior(), weapons::WOODEN_SWORD, &mut encounter, &dice).unwrap();

        assert_eq!(outcome.damage_dealt, 26);
        assert!(outcome.enemy_killed);
        assert_eq!(outcome.target, EnemyKind::Goblin);
        assert_eq!(outcome.remaining_enemies, 2);
        assert!(outcome.combat_continues);
        assert_eq!(encounter.enemies()[0].hp, 0);
    }

    #[test]
    fn survivors_counter_attack_after_the_strike() {
        let mut encounter = goblins(3);
        let dice = ScriptedDice::default();

        let outcome = resolve_round(&warrior(), weapons::WOODEN_SWORD, &mut encounter, &dice).unwrap();

        assert_eq!(outcome.player_damage_taken, 16);
    }

    #[test]
    fn unknown_weapon_falls_back_to_melee_five() {
        let mut encounter = goblins(1);
        let outcome = resolve_round(
            &warrior(),
            "Frying Pan",
            &mut encounter,
            &ScriptedDice::default(),
        )
        .unwrap();
        assert_eq!(outcome.damage_dealt, 5 + 18);
        assert!(!outcome.enemy_killed);
        assert_eq!(encounter.enemies()[0].hp, 2);
    }

    #[test]
    fn only_the_first_living_enemy_is_touched() {
        let mut encounter = goblins(3);
        encounter.enemies_mut()[0].hp = 0;
        let before = encounter.clone();

        resolve_round(
            &Attributes::new(1, 1, 1),
            weapons::WOODEN_SWORD,
            &mut encounter,
            &ScriptedDice::default(),
        )
        .unwrap();

        assert_eq!(encounter.enemies()[0], before.enemies()[0]);
        assert_eq!(encounter.enemies()[1].hp, before.enemies()[1].hp - 9);
        assert_eq!(encounter.enemies()[2], before.enemies()[2]);
        for enemy in encounter.enemies() {
            assert!(enemy.hp <= enemy.max_hp);
        }
    }

    #[test]
    fn loot_only_on_kill_and_within_range() {
        // no kill: no gold, no items, dice never consulted
        let mut encounter = start_encounter(
            1,
            EncounterTable::Boss(EnemyKind::RedWitch),
            &ScriptedDice::default(),
        );
        let dice = ScriptedDice::new(&[55], &[true]);
        let outcome = resolve_round(&warrior(), weapons::WOODEN_SWORD, &mut encounter, &dice).unwrap();
        assert_eq!(outcome.gold_awarded, 0);
        assert!(outcome.items_dropped.is_empty());

        // kill: rolls are clamped into the enemy's gold range
        for scripted in [0, 7, 999] {
            let mut encounter = goblins(1);
            let dice = ScriptedDice::new(&[scripted], &[true]);
            let outcome = resolve_round(&warrior(), weapons::IRON_SWORD, &mut encounter, &dice).unwrap();
            assert!(encounter.enemies()[0].gold.contains(outcome.gold_awarded));
            assert_eq!(outcome.items_dropped, vec![LOOT_ITEM.to_string()]);
        }
    }

    #[test]
    fn last_kill_ends_combat_with_no_counter_damage() {
        let mut encounter = goblins(1);
        let outcome = resolve_round(
            &warrior(),
            weapons::WOODEN_SWORD,
            &mut encounter,
            &ScriptedDice::default(),
        )
        .unwrap();
        assert_eq!(outcome.remaining_enemies, 0);
        assert!(!outcome.combat_continues);
        assert_eq!(outcome.player_damage_taken, 0);
    }

    #[test]
    fn concluded_or_empty_encounter_has_no_target() {
        let dice = ScriptedDice::default();
        let mut empty = Encounter::default();
        assert_eq!(
            resolve_round(&warrior(), weapons::WOODEN_SWORD, &mut empty, &dice),
            Err(NoActiveTarget)
        );

        let mut cleared = goblins(2);
        for enemy in cleared.enemies_mut() {
            enemy.hp = 0;
        }
        assert_eq!(
            resolve_round(&warrior(), weapons::WOODEN_SWORD, &mut cleared, &dice),
            Err(NoActiveTarget)
        );
    }
}
