//! Exploration use cases: free-form narration, travel and vendor trade.

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use shadowfire_domain::{
    CharacterClass, DomainError, PlayerId, PlayerName, PlayerRecord, RegionId,
};

use crate::infrastructure::ports::{ClockPort, PlayerRepo, RepoError};
use crate::use_cases::narration::{ExplorationFacts, NarrationRequest, Narrator};
use crate::use_cases::validation::{require_action, ValidationError};

/// Errors that can occur while exploring.
#[derive(Debug, thiserror::Error)]
pub enum ExplorationError {
    #[error("No character for player {0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<DomainError> for ExplorationError {
    fn from(e: DomainError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl From<ValidationError> for ExplorationError {
    fn from(e: ValidationError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplorationReport {
    pub narration: String,
    pub region: String,
    /// True when this request created the character.
    pub created: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TravelReport {
    pub region: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseReport {
    pub item: String,
    pub price: u32,
    pub gold: u32,
    pub quests_started: Vec<String>,
}

/// Exploration operations.
pub struct ExplorationOps {
    players: Arc<dyn PlayerRepo>,
    narrator: Arc<dyn Narrator>,
    clock: Arc<dyn ClockPort>,
    default_class: CharacterClass,
}

impl ExplorationOps {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        narrator: Arc<dyn Narrator>,
        clock: Arc<dyn ClockPort>,
        default_class: CharacterClass,
    ) -> Self {
        Self {
            players,
            narrator,
            clock,
            default_class,
        }
    }

    /// Narrate a free-form action in the player's current region. Creates the
    /// character on first contact.
    pub async fn explore(
        &self,
        player_id: &PlayerId,
        action: &str,
        display_name: Option<&str>,
    ) -> Result<ExplorationReport, ExplorationError> {
        require_action(action)?;

        let (record, created) = match self.players.get(player_id).await? {
            Some(record) => (record, false),
            None => {
                let name = match display_name {
                    Some(name) => PlayerName::new(name)?,
                    None => PlayerName::wanderer(),
                };
                let record =
                    PlayerRecord::new(player_id.clone(), name, self.default_class, self.clock.now());
                tracing::info!(player_id = %player_id, class = %self.default_class, "Character created on first exploration");
                (record, true)
            }
        };

        if record.is_fallen() {
            return Err(ExplorationError::InvalidInput(
                "You have fallen; rest to recover first".to_string(),
            ));
        }
        if record.in_combat() {
            return Err(ExplorationError::InvalidInput(
                "You are in the middle of a fight".to_string(),
            ));
        }

        let action = action.trim();
        let request = NarrationRequest::Exploration {
            facts: ExplorationFacts::for_player(&record),
            history: record.chronicle.clone(),
            action: action.to_string(),
        };
        let narration = self.narrator.narrate(request).await;

        // Other requests may have saved while the narrator was busy; only the
        // chronicle entry belongs to this one.
        let mut record = self.players.get(player_id).await?.unwrap_or(record);

        // degraded narration is stored as-is
        record.record_exchange(action, narration.clone());
        record.touch(self.clock.now());
        self.players.save(&record).await?;

        Ok(ExplorationReport {
            narration,
            region: record.region.region().name.to_string(),
            created,
        })
    }

    /// Move to a neighbouring region.
    pub async fn travel(
        &self,
        player_id: &PlayerId,
        destination: &str,
    ) -> Result<TravelReport, ExplorationError> {
        let destination = RegionId::from_str(destination)?;
        let mut record = self.load(player_id).await?;

        if record.in_combat() {
            return Err(ExplorationError::InvalidInput(
                "You cannot leave in the middle of a fight".to_string(),
            ));
        }
        if record.is_fallen() {
            return Err(ExplorationError::InvalidInput(
                "You have fallen; rest to recover first".to_string(),
            ));
        }
        let here = record.region.region();
        if !here.has_exit_to(destination) {
            return Err(ExplorationError::InvalidInput(format!(
                "No path leads from {} to {}",
                here.name,
                destination.region().name
            )));
        }

        record.region = destination;
        record.touch(self.clock.now());
        self.players.save(&record).await?;

        tracing::info!(player_id = %player_id, from = %here.id, to = %destination, "Player travelled");

        let region = destination.region();
        Ok(TravelReport {
            region: region.name.to_string(),
            description: region.description.to_string(),
        })
    }

    /// Buy one item from a vendor in the current region, then check whether
    /// any quest is now triggered.
    pub async fn purchase(
        &self,
        player_id: &PlayerId,
        item: &str,
    ) -> Result<PurchaseReport, ExplorationError> {
        let mut record = self.load(player_id).await?;

        if record.in_combat() {
            return Err(ExplorationError::InvalidInput(
                "Nobody trades in the middle of a fight".to_string(),
            ));
        }
        let region = record.region.region();
        let ware = region.price_of(item).ok_or_else(|| {
            ExplorationError::InvalidInput(format!(
                "Nobody in {} sells {}",
                region.name,
                item.trim()
            ))
        })?;

        record.spend_gold(ware.price)?;
        record.inventory.add(ware.item, 1);
        let started: Vec<String> = record
            .activate_quests()
            .into_iter()
            .map(|quest| quest.name.to_string())
            .collect();
        record.touch(self.clock.now());
        self.players.save(&record).await?;

        tracing::debug!(player_id = %player_id, item = ware.item, price = ware.price, "Item purchased");
        for quest in &started {
            tracing::info!(player_id = %player_id, quest = %quest, "Quest started");
        }

        Ok(PurchaseReport {
            item: ware.item.to_string(),
            price: ware.price,
            gold: record.gold,
            quests_started: started,
        })
    }

    async fn load(&self, player_id: &PlayerId) -> Result<PlayerRecord, ExplorationError> {
        self.players
            .get(player_id)
            .await?
            .ok_or_else(|| ExplorationError::NotFound(player_id.to_string()))
    }
}
