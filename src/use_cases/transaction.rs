use std::future::Future;

use crate::domain::errors::OperationError;
use crate::domain::ports::TransactionManager;

// Run `work` inside a transaction: commit on success, roll back on failure.
pub async fn in_transaction<M, T, F, Fut>(manager: &M, work: F) -> Result<T, OperationError>
where
    M: TransactionManager + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, OperationError>>,
{
    tracing::debug!("beginning transaction");
    manager.begin().await.map_err(OperationError::unexpected)?;

    match work().await {
        Ok(value) => {
            tracing::debug!("committing transaction");
            manager.commit().await.map_err(OperationError::unexpected)?;
            Ok(value)
        }
        Err(err) => {
            tracing::debug!(error = %err, "rolling back transaction");
            if let Err(rollback_err) = manager.rollback().await {
                tracing::warn!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}
