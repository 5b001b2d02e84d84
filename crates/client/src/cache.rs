use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use academy_core::model::{ModuleId, ModuleProgress};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::transport::{HttpTransport, HttpTransportConfig, ProgressTransport};

/// A cached query result. Concurrent callers awaiting the same slot share a
/// single transport call; a failed call leaves the slot empty for the next
/// caller to retry.
type Slot<T> = Arc<OnceCell<T>>;

/// Caching front for a `ProgressTransport`.
///
/// Query keys mirror the read operations: the full progress list, and one
/// completion flag per module. Mutations invalidate every cached read once
/// they succeed.
pub struct ProgressClient<T: ?Sized> {
    transport: Arc<T>,
    all: Mutex<Option<Slot<Vec<ModuleProgress>>>>,
    modules: Mutex<HashMap<ModuleId, Slot<bool>>>,
}

impl ProgressClient<HttpTransport> {
    #[must_use]
    pub fn http(config: HttpTransportConfig) -> Self {
        Self::new(Arc::new(HttpTransport::new(config)))
    }
}

impl<T: ProgressTransport + ?Sized> ProgressClient<T> {
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            all: Mutex::new(None),
            modules: Mutex::new(HashMap::new()),
        }
    }

    fn all_slot(&self) -> Slot<Vec<ModuleProgress>> {
        let mut guard = self.all.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(guard.get_or_insert_with(|| Arc::new(OnceCell::new())))
    }

    fn module_slot(&self, id: &ModuleId) -> Slot<bool> {
        let mut guard = self.modules.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            guard
                .entry(id.clone())
                .or_insert_with(|| Arc::new(OnceCell::new())),
        )
    }

    /// Every completed module, served from cache when possible.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the transport call fails.
    pub async fn all_module_progress(&self) -> Result<Vec<ModuleProgress>, ClientError> {
        let slot = self.all_slot();
        let progress = slot
            .get_or_try_init(|| async {
                debug!("fetching all module progress");
                self.transport.get_all_module_progress().await
            })
            .await?;
        Ok(progress.clone())
    }

    /// Completion flag for one module, served from cache when possible.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the transport call fails.
    pub async fn is_module_complete(&self, id: &ModuleId) -> Result<bool, ClientError> {
        let slot = self.module_slot(id);
        let completed = slot
            .get_or_try_init(|| async {
                debug!(module_id = %id, "fetching module completion");
                self.transport.is_module_complete(id).await
            })
            .await?;
        Ok(*completed)
    }

    /// Completion flag for display: a failed read shows as not completed.
    pub async fn is_module_complete_or_default(&self, id: &ModuleId) -> bool {
        match self.is_module_complete(id).await {
            Ok(completed) => completed,
            Err(err) => {
                warn!(module_id = %id, error = %err, "progress read failed");
                false
            }
        }
    }

    /// Mark a module complete, then drop cached reads.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the transport call fails; the cache is left
    /// untouched in that case so the caller can retry.
    pub async fn mark_module_complete(&self, id: &ModuleId) -> Result<(), ClientError> {
        self.transport.mark_module_complete(id).await?;
        self.invalidate();
        Ok(())
    }

    /// Reset a module, then drop cached reads.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the transport call fails.
    pub async fn reset_module(&self, id: &ModuleId) -> Result<(), ClientError> {
        self.transport.reset_module(id).await?;
        self.invalidate();
        Ok(())
    }

    /// Drop every cached read. In-flight requests finish into detached slots.
    pub fn invalidate(&self) {
        self.all
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.modules
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        debug!("progress cache invalidated");
    }
}
