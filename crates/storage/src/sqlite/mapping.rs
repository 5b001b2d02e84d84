use academy_core::model::{ModuleId, ModuleProgress};
use sqlx::Row;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn completed_to_i64(completed: bool) -> i64 {
    i64::from(completed)
}

/// Stored flags are 0 or 1; anything else means the row was written outside
/// this crate.
pub(crate) fn completed_from_i64(value: i64) -> Result<bool, StorageError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StorageError::Serialization(format!(
            "invalid completed flag: {other}"
        ))),
    }
}

pub(crate) fn module_id_from_str(raw: String) -> Result<ModuleId, StorageError> {
    ModuleId::new(raw).map_err(ser)
}

pub(crate) fn map_progress_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<ModuleProgress, StorageError> {
    let module_id = module_id_from_str(row.try_get::<String, _>("module_id").map_err(ser)?)?;
    let completed = completed_from_i64(row.try_get::<i64, _>("completed").map_err(ser)?)?;
    Ok(ModuleProgress::new(module_id, completed))
}
