use academy_core::model::{ModuleId, ModuleProgress};
use async_trait::async_trait;
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{completed_from_i64, completed_to_i64, map_progress_row};
use crate::repository::{ProgressRepository, StorageError};

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn list_progress(&self) -> Result<Vec<ModuleProgress>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT module_id, completed
            FROM module_progress
            WHERE completed = 1
            ORDER BY module_id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(map_progress_row).collect()
    }

    async fn get_progress(&self, id: &ModuleId) -> Result<bool, StorageError> {
        let row = sqlx::query("SELECT completed FROM module_progress WHERE module_id = ?1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let Some(row) = row else {
            return Ok(false);
        };
        let flag: i64 = row
            .try_get("completed")
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        completed_from_i64(flag)
    }

    async fn set_completed(&self, id: &ModuleId, completed: bool) -> Result<(), StorageError> {
        if !completed {
            return self.remove_progress(id).await;
        }

        sqlx::query(
            r"
            INSERT INTO module_progress (module_id, completed)
            VALUES (?1, ?2)
            ON CONFLICT(module_id) DO UPDATE SET
                completed = excluded.completed
            ",
        )
        .bind(id.as_str())
        .bind(completed_to_i64(completed))
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn remove_progress(&self, id: &ModuleId) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM module_progress WHERE module_id = ?1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }
}
