// src/error_recovery.rs
//! Retry on backpressure for outbound calls.

use crate::error::AppError;
use std::time::Duration;

/// Retries an async operation for as long as it reports backpressure.
///
/// A rate-limited attempt sleeps for the server-supplied resume delay plus
/// `grace` and then repeats the same operation. There is no attempt ceiling.
/// Any other error is returned after the first attempt.
pub async fn retry_on_backpressure<F, T, Fut>(
    mut operation: F,
    grace: Duration,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, AppError>>,
{
    let mut attempt: u32 = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => match e.backpressure_delay() {
                Some(resume_after) => {
                    let wait = resume_after + grace;
                    log::warn!(
                        "Rate limited on attempt {}, retrying after {:?}",
                        attempt,
                        wait
                    );
                    tokio::time::sleep(wait).await;
                    attempt = attempt.saturating_add(1);
                }
                None => return Err(e),
            },
        }
    }
}
