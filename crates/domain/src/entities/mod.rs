//! Domain entities - Core business objects with identity

mod encounter;
mod player_record;

pub use encounter::{
    CombatState, EnemyInstance, Encounter, EncounterConclusion, EncounterPhase, GoldRange,
};
pub use player_record::{ChronicleEntry, PlayerRecord, Speaker, MAX_CHRONICLE_ENTRIES};
