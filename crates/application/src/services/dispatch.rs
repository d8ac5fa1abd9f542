//! Off-task execution of vendor calls
//!
//! Vendor requests run on their own tokio task so that a slow call never
//! stalls the caller's task. A spawned call runs to completion even when
//! the awaiting future is dropped.

use std::future::Future;

use tracing::error;

use crate::error::ApplicationError;

/// Spawn `task` and wait for its result
///
/// # Errors
///
/// Returns the task's own error, or [`ApplicationError::Internal`] when the
/// task panicked.
pub async fn run_detached<T, F>(task: F) -> Result<T, ApplicationError>
where
    F: Future<Output = Result<T, ApplicationError>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(task).await.map_err(|e| {
        error!(error = %e, "Background task failed");
        ApplicationError::Internal(format!("Background task failed: {e}"))
    })?
}
