//! Character use cases: creation, sheet, stat allocation, rest, consumables.

mod sheet;

use std::str::FromStr;
use std::sync::Arc;

use shadowfire_domain::catalog::items::{HEALING_POTION, HEALING_POTION_RESTORES};
use shadowfire_domain::{
    Attribute, CharacterClass, CombatState, DomainError, PlayerId, PlayerName, PlayerRecord,
    HOME_REGION,
};

use crate::infrastructure::ports::{ClockPort, PlayerRepo, RepoError};

pub use sheet::{CharacterSheet, PoolView};

/// Errors that can occur during character operations.
#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("No character for player {0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<DomainError> for CharacterError {
    fn from(e: DomainError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

/// Result of drinking a potion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ItemUse {
    pub item: String,
    pub restored: u32,
    pub remaining: u32,
    pub sheet: CharacterSheet,
}

/// Character operations.
pub struct CharacterOps {
    players: Arc<dyn PlayerRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CharacterOps {
    pub fn new(players: Arc<dyn PlayerRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { players, clock }
    }

    /// Create a character explicitly. Fails if the player already has one.
    pub async fn create(
        &self,
        player_id: &PlayerId,
        name: &str,
        class: &str,
    ) -> Result<CharacterSheet, CharacterError> {
        let name = PlayerName::new(name)?;
        let class = CharacterClass::from_str(class)?;

        if self.players.get(player_id).await?.is_some() {
            return Err(CharacterError::InvalidInput(
                "A character already exists for this player".to_string(),
            ));
        }

        let record = PlayerRecord::new(player_id.clone(), name, class, self.clock.now());
        self.players.save(&record).await?;

        tracing::info!(player_id = %player_id, class = %class, "Character created");
        Ok(CharacterSheet::from(&record))
    }

    pub async fn sheet(&self, player_id: &PlayerId) -> Result<CharacterSheet, CharacterError> {
        let record = self.load(player_id).await?;
        Ok(CharacterSheet::from(&record))
    }

    /// Spend one unspent point on the named attribute.
    pub async fn allocate(
        &self,
        player_id: &PlayerId,
        attribute: &str,
    ) -> Result<CharacterSheet, CharacterError> {
        let attribute = Attribute::from_str(attribute)?;
        let mut record = self.load(player_id).await?;

        record.allocate_point(attribute)?;
        record.touch(self.clock.now());
        self.players.save(&record).await?;

        tracing::debug!(player_id = %player_id, attribute = %attribute, "Attribute point allocated");
        Ok(CharacterSheet::from(&record))
    }

    /// Restore health and mana. A fallen character wakes up at home.
    pub async fn rest(&self, player_id: &PlayerId) -> Result<CharacterSheet, CharacterError> {
        let mut record = self.load(player_id).await?;
        if record.in_combat() {
            return Err(CharacterError::InvalidInput(
                "You cannot rest in the middle of a fight".to_string(),
            ));
        }

        if record.is_fallen() {
            record.region = HOME_REGION;
            record.combat = CombatState::NoEncounter;
            tracing::info!(player_id = %player_id, "Fallen character revived at home");
        }
        record.health.refill();
        record.mana.refill();
        record.touch(self.clock.now());
        self.players.save(&record).await?;

        Ok(CharacterSheet::from(&record))
    }

    /// Use a consumable. Only healing potions can be used, and never mid-fight.
    pub async fn use_item(
        &self,
        player_id: &PlayerId,
        item: &str,
    ) -> Result<ItemUse, CharacterError> {
        if !item.trim().eq_ignore_ascii_case(HEALING_POTION) {
            return Err(CharacterError::InvalidInput(format!(
                "{} cannot be used",
                item.trim()
            )));
        }

        let mut record = self.load(player_id).await?;
        if record.in_combat() {
            return Err(CharacterError::InvalidInput(
                "There is no time for that in the middle of a fight".to_string(),
            ));
        }
        if record.is_fallen() {
            return Err(CharacterError::InvalidInput(
                "You have fallen; rest to recover first".to_string(),
            ));
        }
        if !record.inventory.remove(HEALING_POTION, 1) {
            return Err(CharacterError::InvalidInput(format!(
                "You have no {}",
                HEALING_POTION
            )));
        }

        let restored = record.health.restore(HEALING_POTION_RESTORES);
        record.touch(self.clock.now());
        self.players.save(&record).await?;

        Ok(ItemUse {
            item: HEALING_POTION.to_string(),
            restored,
            remaining: record.inventory.count(HEALING_POTION),
            sheet: CharacterSheet::from(&record),
        })
    }

    async fn load(&self, player_id: &PlayerId) -> Result<PlayerRecord, CharacterError> {
        self.players
            .get(player_id)
            .await?
            .ok_or_else(|| CharacterError::NotFound(player_id.to_string()))
    }
}
