//! Combat trigger: start an encounter or fight one round, then narrate.

use std::sync::Arc;

use serde::Serialize;
use shadowfire_domain::{
    resolve_round, start_encounter, CombatState, EncounterConclusion, PlayerId, PlayerRecord,
};

use super::{ApplyOutcome, CombatError};
use crate::infrastructure::ports::{ClockPort, PlayerRepo, RandomPort};
use crate::use_cases::narration::{CombatFacts, NarrationRequest, Narrator};
use crate::use_cases::validation::require_action;

/// Action word that opens a new encounter.
pub const START_ACTION: &str = "start";

/// Reply when `start` is sent mid-fight.
pub const ALREADY_ENGAGED: &str = "You are already locked in battle. Strike, or be struck.";

/// Reply when there is nobody left to fight.
pub const NO_TARGET: &str = "There is nothing here to fight. All is quiet, for now.";

/// Player-visible state after a combat request. Numbers are fine here; only
/// the narration is kept free of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatStatus {
    pub health: u32,
    pub max_health: u32,
    pub gold: u32,
    pub in_combat: bool,
    pub fallen: bool,
    pub enemies_remaining: u32,
    pub conclusion: Option<EncounterConclusion>,
}

impl CombatStatus {
    fn of(record: &PlayerRecord, conclusion: Option<EncounterConclusion>) -> Self {
        Self {
            health: record.health.current(),
            max_health: record.health.max(),
            gold: record.gold,
            in_combat: record.in_combat(),
            fallen: record.is_fallen(),
            enemies_remaining: record.combat.encounter().map_or(0, |e| e.alive_count()),
            conclusion,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatReport {
    pub narration: String,
    pub status: CombatStatus,
}

/// Combat trigger use case.
pub struct Engage {
    players: Arc<dyn PlayerRepo>,
    apply: Arc<ApplyOutcome>,
    narrator: Arc<dyn Narrator>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
    encounter_size: u32,
}

impl Engage {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        apply: Arc<ApplyOutcome>,
        narrator: Arc<dyn Narrator>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
        encounter_size: u32,
    ) -> Self {
        Self {
            players,
            apply,
            narrator,
            random,
            clock,
            encounter_size,
        }
    }

    /// Run one combat request. Mechanical changes are saved before the
    /// narrator is called, so a narration failure never loses progress.
    pub async fn execute(
        &self,
        player_id: &PlayerId,
        action: &str,
    ) -> Result<CombatReport, CombatError> {
        require_action(action)?;

        let record = self
            .players
            .get(player_id)
            .await?
            .ok_or_else(|| CombatError::NotFound(player_id.to_string()))?;

        if record.is_fallen() {
            return Err(CombatError::InvalidInput(
                "You have fallen; rest before fighting again".to_string(),
            ));
        }

        if action.trim().eq_ignore_ascii_case(START_ACTION) {
            self.start(record, action).await
        } else {
            self.round(record, action).await
        }
    }

    async fn start(
        &self,
        mut record: PlayerRecord,
        action: &str,
    ) -> Result<CombatReport, CombatError> {
        if record.in_combat() {
            return Ok(CombatReport {
                narration: ALREADY_ENGAGED.to_string(),
                status: CombatStatus::of(&record, None),
            });
        }

        let table = record.region.region().encounter;
        let encounter = start_encounter(self.encounter_size, table, &*self.random);
        let facts = CombatFacts::encounter_started(&record, action, &encounter);

        tracing::info!(
            player_id = %record.id,
            region = %record.region,
            enemies = encounter.enemies().len(),
            "Encounter started"
        );

        record.combat = CombatState::from_encounter(encounter);
        record.touch(self.clock.now());
        self.players.save(&record).await?;

        let narration = self.narrator.narrate(NarrationRequest::Combat(facts)).await;
        Ok(CombatReport {
            narration,
            status: CombatStatus::of(&record, None),
        })
    }

    async fn round(&self, record: PlayerRecord, action: &str) -> Result<CombatReport, CombatError> {
        let Some(mut encounter) = record.combat.encounter().cloned() else {
            return Ok(CombatReport {
                narration: NO_TARGET.to_string(),
                status: CombatStatus::of(&record, None),
            });
        };

        let outcome = match resolve_round(&record.attributes, &record.weapon, &mut encounter, &*self.random) {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::debug!(player_id = %record.id, "Round requested with no living enemy");
                return Ok(CombatReport {
                    narration: NO_TARGET.to_string(),
                    status: CombatStatus::of(&record, None),
                });
            }
        };

        tracing::debug!(
            player_id = %record.id,
            damage_dealt = outcome.damage_dealt,
            damage_taken = outcome.player_damage_taken,
            killed = outcome.enemy_killed,
            remaining = outcome.remaining_enemies,
            "Round resolved"
        );

        let applied = self.apply.execute(&record.id, &outcome, encounter).await?;
        let facts = CombatFacts::round(&applied.record, action, &outcome, &applied.quests_completed);

        let narration = self.narrator.narrate(NarrationRequest::Combat(facts)).await;
        Ok(CombatReport {
            narration,
            status: CombatStatus::of(&applied.record, applied.conclusion),
        })
    }
}
