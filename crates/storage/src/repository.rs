use academy_core::model::{ModuleId, ModuleProgress};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for per-module completion state.
///
/// Only completed modules are stored; a missing record means "not complete".
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// List every completed module, ordered by module id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn list_progress(&self) -> Result<Vec<ModuleProgress>, StorageError>;

    /// Whether the module is complete. Absent modules are not.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_progress(&self, id: &ModuleId) -> Result<bool, StorageError>;

    /// Overwrite the completion flag. Setting `false` drops the record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn set_completed(&self, id: &ModuleId, completed: bool) -> Result<(), StorageError>;

    /// Drop the record for a module. Dropping a missing record succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn remove_progress(&self, id: &ModuleId) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<HashMap<ModuleId, bool>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            progress: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn list_progress(&self) -> Result<Vec<ModuleProgress>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut entries: Vec<ModuleProgress> = guard
            .iter()
            .filter(|(_, completed)| **completed)
            .map(|(id, _)| ModuleProgress::completed(id.clone()))
            .collect();
        entries.sort_by(|a, b| a.module_id().cmp(b.module_id()));
        Ok(entries)
    }

    async fn get_progress(&self, id: &ModuleId) -> Result<bool, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(id).copied().unwrap_or(false))
    }

    async fn set_completed(&self, id: &ModuleId, completed: bool) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if completed {
            guard.insert(id.clone(), true);
        } else {
            guard.remove(id);
        }
        Ok(())
    }

    async fn remove_progress(&self, id: &ModuleId) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(id);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(InMemoryRepository::new());
        Self { progress }
    }
}
