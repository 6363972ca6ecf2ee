//! Process-local player record store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use shadowfire_domain::{PlayerId, PlayerRecord};

use crate::infrastructure::ports::{PlayerRepo, RepoError};

/// [`PlayerRepo`] backed by a map behind an async lock. Records are lost on
/// restart; use the SQLite store when that matters.
#[derive(Default)]
pub struct InMemoryPlayerRepo {
    records: RwLock<HashMap<PlayerId, PlayerRecord>>,
}

impl InMemoryPlayerRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl PlayerRepo for InMemoryPlayerRepo {
    async fn get(&self, id: &PlayerId) -> Result<Option<PlayerRecord>, RepoError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn save(&self, record: &PlayerRecord) -> Result<(), RepoError> {
        self.records
            .write()
            .await
            .insert(record.id.clone(), record.clone());
        Ok(())
    }
}
