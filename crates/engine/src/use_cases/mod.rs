//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area of the game. Use cases
//! load the player record through the store port, drive the pure domain
//! rules, persist, and only then narrate.

pub mod character;
pub mod combat;
pub mod exploration;
pub mod narration;
pub mod validation;

pub use character::{CharacterError, CharacterOps, CharacterSheet};
pub use combat::{CombatError, CombatUseCases};
pub use exploration::{ExplorationError, ExplorationOps};
pub use narration::{LlmNarrator, Narrator, TemplateNarrator};
