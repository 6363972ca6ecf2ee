//! Narration: turning game facts into player-facing prose.
//!
//! One [`Narrator`] seam with two implementations: [`LlmNarrator`] calls the
//! text generator through a prompt strategy picked by [`NarrationMode`];
//! [`TemplateNarrator`] renders the same facts locally. Narration never
//! fails; generator problems degrade to fixed labeled lines.

pub mod facts;
pub mod narrator;
pub mod prompts;
pub mod template;
mod text;

use async_trait::async_trait;
use shadowfire_domain::ChronicleEntry;

pub use facts::{CombatFacts, ExplorationFacts, WoundSeverity};
pub use narrator::{degraded, LlmNarrator};
pub use prompts::PromptStrategy;
pub use template::TemplateNarrator;
pub use text::sanitize_player_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationMode {
    Combat,
    Exploration,
}

/// Everything a narrator may see for one reply.
#[derive(Debug, Clone, PartialEq)]
pub enum NarrationRequest {
    Combat(CombatFacts),
    Exploration {
        facts: ExplorationFacts,
        /// Earlier exchanges, oldest first.
        history: Vec<ChronicleEntry>,
        /// The new player action.
        action: String,
    },
}

impl NarrationRequest {
    pub fn mode(&self) -> NarrationMode {
        match self {
            Self::Combat(_) => NarrationMode::Combat,
            Self::Exploration { .. } => NarrationMode::Exploration,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Produce prose for `request`. Never fails.
    async fn narrate(&self, request: NarrationRequest) -> String;
}
