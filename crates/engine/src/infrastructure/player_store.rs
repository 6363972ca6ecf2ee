//! SQLite-backed player record storage.
//!
//! Each record is stored whole as JSON, keyed by player id. Additive record
//! fields default on load, so older rows keep working without migrations.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use shadowfire_domain::{PlayerId, PlayerRecord};

use crate::infrastructure::ports::{ClockPort, PlayerRepo, RepoError};

/// SQLite implementation of [`PlayerRepo`].
pub struct SqlitePlayerRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqlitePlayerRepo {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("players", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS players (
                player_id TEXT PRIMARY KEY NOT NULL,
                record_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("players", e))?;

        Ok(Self { pool, clock })
    }
}

#[async_trait]
impl PlayerRepo for SqlitePlayerRepo {
    async fn get(&self, id: &PlayerId) -> Result<Option<PlayerRecord>, RepoError> {
        let row = sqlx::query("SELECT record_json FROM players WHERE player_id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_player", e))?;

        match row {
            Some(row) => {
                let json: String = row.get("record_json");
                let record = serde_json::from_str(&json).map_err(RepoError::serialization)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, record: &PlayerRecord) -> Result<(), RepoError> {
        let json = serde_json::to_string(record).map_err(RepoError::serialization)?;
        let now = self.clock.now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO players (player_id, record_json, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(player_id) DO UPDATE SET
                record_json = excluded.record_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(record.id.as_str())
        .bind(json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("save_player", e))?;

        Ok(())
    }
}
