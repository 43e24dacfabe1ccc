//! Timeout wrapper for page operations
//!
//! A hung page load would otherwise stall the whole batch.

use anyhow::Result;
use std::future::Future;
use std::time::Duration;

/// Run `operation` with an upper bound of `timeout_secs`.
///
/// A timeout is reported as an ordinary error naming `operation_name`, so
/// callers treat it exactly like the operation failing.
pub async fn with_page_timeout<F, T>(
    operation: F,
    timeout_secs: u64,
    operation_name: &str,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(Duration::from_secs(timeout_secs), operation).await {
        Ok(result) => result,
        Err(_) => Err(anyhow::anyhow!(
            "{operation_name} timeout after {timeout_secs} seconds"
        )),
    }
}
