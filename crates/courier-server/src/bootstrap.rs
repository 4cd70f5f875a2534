//! Process bootstrap: store connection with bounded retry.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use courier_core::domain::CourierError;

/// Startup retry policy for the persistence backend. Exhausting the
/// attempts is fatal to process startup.
#[derive(Debug, Clone)]
pub struct BootstrapRetry {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for BootstrapRetry {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay: Duration::from_secs(3),
        }
    }
}

/// Run `factory` until it succeeds or the attempts are exhausted,
/// sleeping a fixed delay between attempts.
pub async fn connect_with_retry<S, F, Fut>(
    retry: &BootstrapRetry,
    mut factory: F,
) -> Result<S, CourierError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<S, CourierError>>,
{
    let mut last_error = None;
    for attempt in 1..=retry.max_attempts {
        match factory(attempt).await {
            Ok(store) => return Ok(store),
            Err(error) => {
                warn!(attempt, max_attempts = retry.max_attempts, %error, "store connection failed");
                last_error = Some(error);
                if attempt < retry.max_attempts {
                    tokio::time::sleep(retry.delay).await;
                }
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| CourierError::Persistence("no connection attempts made".to_string())))
}
