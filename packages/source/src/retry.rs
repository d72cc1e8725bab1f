//! HTTP fetch with optional retry on transient errors.
//!
//! Every remote resource goes through [`send_text`]. With `max_retries`
//! set to zero (the default configuration) a request is attempted exactly
//! once and any failure is final. With retries enabled, connection
//! failures, timeouts, HTTP 429 and HTTP 5xx are retried with exponential
//! backoff (2s, 4s, 8s, ...). HTTP 4xx other than 429 is never retried.

use std::time::Duration;

use crate::SourceError;

/// Maximum length of the response body preview included in error logs.
const BODY_PREVIEW_LEN: usize = 300;

/// Sends an HTTP request and returns the response body as a `String`.
///
/// The `build_request` closure is called on each attempt to construct a
/// fresh [`reqwest::RequestBuilder`], since builders are consumed by
/// `.send()`.
///
/// # Errors
///
/// Returns [`SourceError::Http`] if the request or body read fails, or
/// [`SourceError::Status`] for a non-success status, after all retries
/// are exhausted.
#[allow(clippy::future_not_send)]
pub async fn send_text<F>(build_request: F, max_retries: u32) -> Result<String, SourceError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut attempt = 0;

    loop {
        if attempt > 0 {
            let delay = backoff(attempt);
            log::warn!("  retry {attempt}/{max_retries} in {delay:?}...");
            tokio::time::sleep(delay).await;
        }

        let can_retry = attempt < max_retries;
        attempt += 1;

        let response = match build_request().send().await {
            Ok(response) => response,
            Err(e) if can_retry && is_transient(&e) => {
                log::warn!("  transient error: {e}");
                continue;
            }
            Err(e) => return Err(SourceError::Http(e)),
        };

        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            return Ok(response.text().await?);
        }

        if can_retry && is_retryable_status(status) {
            log::warn!("  HTTP {status} from {url}");
            continue;
        }

        let body = response.text().await.unwrap_or_default();
        let preview: String = body.chars().take(BODY_PREVIEW_LEN).collect();
        log::error!("HTTP {status} from {url}, giving up.\n  body preview: {preview}");

        return Err(SourceError::Status { url, status });
    }
}

/// Delay before retry number `attempt` (1-based).
fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(1u64 << attempt.min(6))
}

/// Returns `true` if the status code is worth retrying.
fn is_retryable_status(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Returns `true` if the error is likely transient and worth retrying.
fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_body() || e.is_request()
}
