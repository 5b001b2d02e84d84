use serde::Serialize;

use crate::model::{LearningModule, ModuleId};

/// Completion state of one module.
///
/// A module without a record is not complete; stores only hold completed
/// modules, so `completed` is `true` for everything they return.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleProgress {
    module_id: ModuleId,
    completed: bool,
}

impl ModuleProgress {
    #[must_use]
    pub fn new(module_id: ModuleId, completed: bool) -> Self {
        Self {
            module_id,
            completed,
        }
    }

    #[must_use]
    pub fn completed(module_id: ModuleId) -> Self {
        Self::new(module_id, true)
    }

    #[must_use]
    pub fn module_id(&self) -> &ModuleId {
        &self.module_id
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Wire shape: `(moduleId, completed)`.
    #[must_use]
    pub fn into_pair(self) -> (ModuleId, bool) {
        (self.module_id, self.completed)
    }
}

impl From<(ModuleId, bool)> for ModuleProgress {
    fn from((module_id, completed): (ModuleId, bool)) -> Self {
        Self::new(module_id, completed)
    }
}

/// Returns the completion flag for `id`, treating absence as not complete.
#[must_use]
pub fn is_complete_in(progress: &[ModuleProgress], id: &str) -> bool {
    progress
        .iter()
        .find(|entry| entry.module_id.as_str() == id)
        .is_some_and(ModuleProgress::is_completed)
}

/// A catalog module joined with its completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleOverview {
    #[serde(flatten)]
    pub module: LearningModule,
    pub completed: bool,
}

impl ModuleOverview {
    /// Joins every catalog module with the given progress, in catalog order.
    #[must_use]
    pub fn build(catalog: &[LearningModule], progress: &[ModuleProgress]) -> Vec<Self> {
        catalog
            .iter()
            .map(|module| Self {
                module: *module,
                completed: is_complete_in(progress, module.id),
            })
            .collect()
    }
}

/// Completed / total over the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
}

impl ProgressSummary {
    /// Counts catalog modules marked complete. Progress on ids outside the
    /// catalog is ignored.
    #[must_use]
    pub fn from_progress(catalog: &[LearningModule], progress: &[ModuleProgress]) -> Self {
        let completed = catalog
            .iter()
            .filter(|module| is_complete_in(progress, module.id))
            .count();
        Self {
            completed,
            total: catalog.len(),
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

impl std::fmt::Display for ProgressSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}
