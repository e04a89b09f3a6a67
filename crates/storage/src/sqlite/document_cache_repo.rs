use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::{SqliteRepository, conn, ser};
use crate::repository::{CachedDocument, DocumentCacheRepository, StorageError};

#[async_trait]
impl DocumentCacheRepository for SqliteRepository {
    async fn save_document(
        &self,
        bytes: &[u8],
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO document_cache (id, body, saved_at)
            VALUES (1, ?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                body = excluded.body,
                saved_at = excluded.saved_at
            ",
        )
        .bind(bytes)
        .bind(saved_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn load_document(&self) -> Result<Option<CachedDocument>, StorageError> {
        let row = sqlx::query("SELECT body, saved_at FROM document_cache WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let bytes: Vec<u8> = row.try_get("body").map_err(ser)?;
        let saved_at: DateTime<Utc> = row.try_get("saved_at").map_err(ser)?;
        Ok(Some(CachedDocument { bytes, saved_at }))
    }
}
