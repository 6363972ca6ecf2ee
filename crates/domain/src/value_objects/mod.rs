//! Value objects - Immutable objects defined by their attributes

mod attribute;
mod character_class;
mod inventory;
mod names;
mod resource;

pub use attribute::{Attribute, Attributes};
pub use character_class::{
    derived_max_health, derived_max_mana, CharacterClass, StartingKit, BASE_HEALTH, BASE_MANA,
    HEALTH_PER_STRENGTH, MANA_PER_INTELLECT, STARTING_ATTRIBUTE_POINTS, STARTING_GOLD,
};
pub use inventory::Inventory;
pub use names::{PlayerName, DEFAULT_PLAYER_NAME};
pub use resource::ResourcePool;
