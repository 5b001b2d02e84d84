pub mod catalog;
mod ids;
mod progress;

pub use catalog::LearningModule;
pub use ids::{MAX_MODULE_ID_LEN, ModuleId, ModuleIdError};
pub use progress::{ModuleOverview, ModuleProgress, ProgressSummary, is_complete_in};
