//! Application state and composition.

use std::sync::Arc;

use shadowfire_domain::CharacterClass;

use crate::infrastructure::ports::{ClockPort, PlayerRepo, RandomPort};
use crate::use_cases::{
    self, character::CharacterOps, combat::ApplyOutcome, combat::Engage,
    exploration::ExplorationOps, Narrator,
};

/// Main application state.
///
/// Holds the player store and all use cases. Passed to HTTP handlers via
/// Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for storage ports.
pub struct Repositories {
    pub players: Arc<dyn PlayerRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub character: Arc<CharacterOps>,
    pub combat: use_cases::CombatUseCases,
    pub exploration: Arc<ExplorationOps>,
}

/// Gameplay knobs taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct GameSettings {
    pub encounter_size: u32,
    pub default_class: CharacterClass,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        narrator: Arc<dyn Narrator>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
        settings: GameSettings,
    ) -> Self {
        let character = Arc::new(CharacterOps::new(players.clone(), clock.clone()));

        let apply = Arc::new(ApplyOutcome::new(players.clone(), clock.clone()));
        let engage = Arc::new(Engage::new(
            players.clone(),
            apply,
            narrator.clone(),
            random,
            clock.clone(),
            settings.encounter_size,
        ));

        let exploration = Arc::new(ExplorationOps::new(
            players.clone(),
            narrator,
            clock,
            settings.default_class,
        ));

        Self {
            repositories: Repositories { players },
            use_cases: UseCases {
                character,
                combat: use_cases::CombatUseCases::new(engage),
                exploration,
            },
        }
    }
}
