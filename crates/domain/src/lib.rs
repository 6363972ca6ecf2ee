//! Shadowfire domain: player records, static catalogs, and the combat engine.
//!
//! No I/O lives here. Randomness and time are passed in by the engine.

pub mod catalog;
pub mod combat;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use catalog::{
    EnemyKind, EnemyTemplate, Npc, Quest, QuestCompletion, QuestId, QuestTrigger, Region,
    RegionId, Ware, HOME_REGION, LOOT_ITEM,
};
pub use combat::{
    resolve_round, start_encounter, Dice, EncounterTable, NoActiveTarget, RoundOutcome,
    MAX_ENCOUNTER_SIZE,
};
pub use entities::{
    ChronicleEntry, CombatState, EnemyInstance, Encounter, EncounterConclusion, EncounterPhase,
    GoldRange, PlayerRecord, Speaker, MAX_CHRONICLE_ENTRIES,
};
pub use error::DomainError;
pub use ids::PlayerId;
pub use value_objects::{
    Attribute, Attributes, CharacterClass, Inventory, PlayerName, ResourcePool,
    DEFAULT_PLAYER_NAME,
};
