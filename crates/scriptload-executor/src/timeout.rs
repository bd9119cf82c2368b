//! Optional per-resource timeout.

use std::future::Future;
use std::time::Duration;

/// A resource did not resolve within the configured limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Timed out after {0:?}")]
pub struct ResourceTimeout(pub Duration);

/// Await `fut`, failing with `ResourceTimeout` once `limit` elapses.
///
/// Without a limit the future is awaited as is, so a hung load blocks
/// indefinitely.
pub async fn with_timeout<F, T>(limit: Option<Duration>, fut: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    let Some(limit) = limit else {
        return fut.await;
    };

    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(ResourceTimeout(limit).into()),
    }
}
