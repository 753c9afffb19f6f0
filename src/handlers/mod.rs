pub mod chat;
pub mod credentials;
pub mod health;
pub mod media;
pub mod pages;
pub mod posts;
pub mod salon;

use crate::errors::AppError;
use crate::store::StoreError;

/// Store writes take a file lock and fsync; keep them off the async workers.
pub(crate) async fn run_blocking<F, R>(f: F) -> Result<R, AppError>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Storage(StoreError::from(e)))
}
