use std::sync::Arc;

use academy_core::model::catalog::catalog;
use academy_core::model::{ModuleId, ModuleOverview, ModuleProgress, ProgressSummary};
use storage::repository::ProgressRepository;
use tracing::{debug, info};

use crate::error::ProgressServiceError;

/// Boundary over the progress store: validates module ids and shapes
/// responses. Each module's completion is independent of every other module.
#[derive(Clone)]
pub struct ProgressService {
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(repo: Arc<dyn ProgressRepository>) -> Self {
        Self { repo }
    }

    /// Every completed module.
    ///
    /// Modules that were never completed (or were reset) do not appear.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the store cannot be read.
    pub async fn get_all_module_progress(
        &self,
    ) -> Result<Vec<ModuleProgress>, ProgressServiceError> {
        let progress = self.repo.list_progress().await?;
        Ok(progress)
    }

    /// Whether a module is complete; unknown modules are not.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::InvalidModuleId` for a rejected id.
    /// Returns `ProgressServiceError::Storage` if the store cannot be read.
    pub async fn is_module_complete(&self, module_id: &str) -> Result<bool, ProgressServiceError> {
        let id = ModuleId::new(module_id)?;
        let completed = self.repo.get_progress(&id).await?;
        Ok(completed)
    }

    /// Mark a module complete. Marking it again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::InvalidModuleId` for a rejected id.
    /// Returns `ProgressServiceError::Storage` if persistence fails.
    pub async fn mark_module_complete(&self, module_id: &str) -> Result<(), ProgressServiceError> {
        let id = ModuleId::new(module_id)?;
        self.repo.set_completed(&id, true).await?;
        info!(module_id = %id, "module marked complete");
        Ok(())
    }

    /// Clear a module's progress. Resetting an incomplete module is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::InvalidModuleId` for a rejected id.
    /// Returns `ProgressServiceError::Storage` if persistence fails.
    pub async fn reset_module(&self, module_id: &str) -> Result<(), ProgressServiceError> {
        let id = ModuleId::new(module_id)?;
        self.repo.remove_progress(&id).await?;
        info!(module_id = %id, "module progress reset");
        Ok(())
    }

    /// Catalog modules with their completion flags, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the store cannot be read.
    pub async fn module_overview(&self) -> Result<Vec<ModuleOverview>, ProgressServiceError> {
        let progress = self.repo.list_progress().await?;
        Ok(ModuleOverview::build(catalog(), &progress))
    }

    /// Completed / total over the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the store cannot be read.
    pub async fn summary(&self) -> Result<ProgressSummary, ProgressServiceError> {
        let progress = self.repo.list_progress().await?;
        let summary = ProgressSummary::from_progress(catalog(), &progress);
        debug!(%summary, "computed progress summary");
        Ok(summary)
    }
}
