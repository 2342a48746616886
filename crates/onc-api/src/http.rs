//! Shared HTTP response handling for the platform client.
//!
//! Centralizes status-code checks (401 → [`ApiError::Unauthorized`], 429
//! rate limiting with `Retry-After` parsing, other non-success →
//! [`ApiError::Api`]) so resource modules stay focused on request
//! construction and response mapping.

use crate::error::ApiError;

/// Check a backend response for common error conditions; return it
/// unchanged on success.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ApiError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), %message, "platform API returned an error");
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(resp)
}

/// `Retry-After` as seconds, defaulting to 30 s when absent or unparseable.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(30)
}
