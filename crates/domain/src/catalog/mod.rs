//! Static, process-wide game content. Read-only after start-up and freely
//! shared between requests.

pub mod enemies;
pub mod equipment;
pub mod items;
pub mod world;

pub use enemies::{EnemyKind, EnemyTemplate, LOOT_ITEM};
pub use equipment::{
    attack_damage, resolve_weapon, ArmorStats, DamageSchool, WeaponStats, FALLBACK_WEAPON,
};
pub use world::{
    Npc, Quest, QuestCompletion, QuestId, QuestTrigger, Region, RegionId, Ware, HOME_REGION,
};
