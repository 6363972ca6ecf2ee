//! Merge a resolved round into the player's record.

use std::sync::Arc;

use shadowfire_domain::{
    CombatState, Encounter, EncounterConclusion, EncounterPhase, PlayerId, PlayerRecord,
    RoundOutcome,
};

use super::CombatError;
use crate::infrastructure::ports::{ClockPort, PlayerRepo};

/// What a round did to the player once applied.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedOutcome {
    pub record: PlayerRecord,
    pub health: u32,
    pub alive: bool,
    pub gold: u32,
    pub items_gained: Vec<String>,
    pub conclusion: Option<EncounterConclusion>,
    pub quests_completed: Vec<&'static str>,
}

/// Applies round outcomes and persists the result in a single write.
pub struct ApplyOutcome {
    players: Arc<dyn PlayerRepo>,
    clock: Arc<dyn ClockPort>,
}

impl ApplyOutcome {
    pub fn new(players: Arc<dyn PlayerRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { players, clock }
    }

    pub async fn execute(
        &self,
        player_id: &PlayerId,
        outcome: &RoundOutcome,
        encounter_after: Encounter,
    ) -> Result<AppliedOutcome, CombatError> {
        let mut record = self
            .players
            .get(player_id)
            .await?
            .ok_or_else(|| CombatError::NotFound(player_id.to_string()))?;

        let health = record.health.drain(outcome.player_damage_taken);
        let alive = health > 0;
        record.inventory.add_all(outcome.items_dropped.as_slice());
        record.credit_gold(outcome.gold_awarded);

        let quests_completed = if outcome.enemy_killed {
            record
                .complete_quests_for_defeat(outcome.target)
                .into_iter()
                .map(|quest| quest.name)
                .collect()
        } else {
            Vec::new()
        };

        // A fallen player ends the fight whatever is left standing; otherwise
        // the encounter's own phase decides.
        let conclusion = if alive {
            match encounter_after.phase() {
                EncounterPhase::Concluded(conclusion) => Some(conclusion),
                EncounterPhase::Forming | EncounterPhase::Active => None,
            }
        } else {
            Some(EncounterConclusion::Defeat)
        };
        record.combat = match conclusion {
            Some(_) => CombatState::NoEncounter,
            None => CombatState::from_encounter(encounter_after),
        };

        record.touch(self.clock.now());
        self.players.save(&record).await?;

        if let Some(conclusion) = conclusion {
            tracing::info!(player_id = %player_id, ?conclusion, "Encounter concluded");
        }
        for quest in &quests_completed {
            tracing::info!(player_id = %player_id, quest = %quest, "Quest completed");
        }

        Ok(AppliedOutcome {
            health,
            alive,
            gold: record.gold,
            items_gained: outcome.items_dropped.clone(),
            conclusion,
            quests_completed,
            record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::MockPlayerRepo;
    use chrono::Utc;
    use shadowfire_domain::{
        CharacterClass, EnemyInstance, EnemyKind, PlayerName, QuestId, LOOT_ITEM,
    };

    fn pid() -> PlayerId {
        PlayerId::new("7").unwrap()
    }

    fn warrior() -> PlayerRecord {
        PlayerRecord::new(
            pid(),
            PlayerName::new("Bran").unwrap(),
            CharacterClass::Warrior,
            Utc::now(),
        )
    }

    fn outcome(taken: u32, killed: bool, remaining: u32) -> RoundOutcome {
        RoundOutcome {
            damage_dealt: 26,
            enemy_killed: killed,
            target: EnemyKind::Goblin,
            player_damage_taken: taken,
            gold_awarded: if killed { 7 } else { 0 },
            items_dropped: if killed { vec![LOOT_ITEM.to_string()] } else { vec![] },
            remaining_enemies: remaining,
            combat_continues: remaining > 0,
        }
    }

    fn goblins(alive: usize, dead: usize) -> Encounter {
        let mut enemies: Vec<_> = (0..dead + alive)
            .map(|_| EnemyInstance::spawn(EnemyKind::Goblin))
            .collect();
        for enemy in enemies.iter_mut().take(dead) {
            enemy.hp = 0;
        }
        Encounter::new(enemies)
    }

    fn applier(record: Option<PlayerRecord>, saves: usize) -> ApplyOutcome {
        let mut repo = MockPlayerRepo::new();
        repo.expect_get().returning(move |_| Ok(record.clone()));
        repo.expect_save().times(saves).returning(|_| Ok(()));
        ApplyOutcome::new(Arc::new(repo), Arc::new(FixedClock(Utc::now())))
    }

    #[tokio::test]
    async fn continuing_fight_keeps_encounter_and_credits_spoils() {
        let applied = applier(Some(warrior()), 1)
            .execute(&pid(), &outcome(16, true, 2), goblins(2, 1))
            .await
            .unwrap();

        assert!(applied.alive);
        assert_eq!(applied.health, applied.record.health.max() - 16);
        assert_eq!(applied.gold, 25 + 7);
        assert_eq!(applied.record.inventory.count(LOOT_ITEM), 1);
        assert_eq!(applied.conclusion, None);
        assert!(applied.record.in_combat());
    }

    #[tokio::test]
    async fn victory_clears_combat_state() {
        let applied = applier(Some(warrior()), 1)
            .execute(&pid(), &outcome(0, true, 0), goblins(0, 1))
            .await
            .unwrap();

        assert_eq!(applied.conclusion, Some(EncounterConclusion::Victory));
        assert_eq!(applied.record.combat, CombatState::NoEncounter);
    }

    #[tokio::test]
    async fn lethal_damage_is_a_defeat_and_health_stops_at_zero() {
        let mut record = warrior();
        record.health.drain(record.health.max() - 5);

        let applied = applier(Some(record), 1)
            .execute(&pid(), &outcome(16, false, 3), goblins(3, 0))
            .await
            .unwrap();

        assert!(!applied.alive);
        assert_eq!(applied.health, 0);
        assert_eq!(applied.conclusion, Some(EncounterConclusion::Defeat));
        assert!(!applied.record.in_combat());
    }

    #[tokio::test]
    async fn boss_kill_completes_quest_in_the_same_write() {
        let mut record = warrior();
        record.active_quests.insert(QuestId::SlayTheRedWitch);
        let mut round = outcome(0, true, 0);
        round.target = EnemyKind::RedWitch;

        let mut witch = EnemyInstance::spawn(EnemyKind::RedWitch);
        witch.hp = 0;

        let applied = applier(Some(record), 1)
            .execute(&pid(), &round, Encounter::new(vec![witch]))
            .await
            .unwrap();

        assert_eq!(applied.quests_completed, vec!["Lift the Curse from Mirefold"]);
        assert!(applied.record.completed_quests.contains(&QuestId::SlayTheRedWitch));
        assert_eq!(applied.gold, 25 + 7 + 50);
    }

    #[tokio::test]
    async fn encounter_phase_decides_whether_the_fight_goes_on() {
        // The round summary says it is over, but one goblin still stands.
        let applied = applier(Some(warrior()), 1)
            .execute(&pid(), &outcome(0, true, 0), goblins(1, 1))
            .await
            .unwrap();

        assert_eq!(applied.conclusion, None);
        assert!(applied.record.in_combat());
        assert_eq!(applied.record.combat.encounter().unwrap().alive_count(), 1);
    }

    #[tokio::test]
    async fn defeat_wins_over_a_cleared_encounter() {
        let mut record = warrior();
        record.health.drain(record.health.max() - 3);

        let applied = applier(Some(record), 1)
            .execute(&pid(), &outcome(10, true, 0), goblins(0, 1))
            .await
            .unwrap();

        assert_eq!(applied.conclusion, Some(EncounterConclusion::Defeat));
        assert_eq!(applied.record.combat, CombatState::NoEncounter);
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let result = applier(None, 0)
            .execute(&pid(), &outcome(0, false, 1), goblins(1, 0))
            .await;
        assert!(matches!(result, Err(CombatError::NotFound(_))));
    }
}
