//! Repository port traits for player storage.

use async_trait::async_trait;
use shadowfire_domain::{PlayerId, PlayerRecord};

use super::error::RepoError;

// =============================================================================
// Player Records
// =============================================================================

/// Keyed store of player records. One record per player id; writes replace
/// the whole record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepo: Send + Sync {
    async fn get(&self, id: &PlayerId) -> Result<Option<PlayerRecord>, RepoError>;
    async fn save(&self, record: &PlayerRecord) -> Result<(), RepoError>;
}
