//! Provider error classification.

pub use lexilearn_core::error::ProviderError;

/// Classify a transport-level failure.
pub(crate) fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout(timeout_secs)
    } else {
        ProviderError::NetworkError(err.to_string())
    }
}

/// Turn a non-success response into an error, preferring a JSON `error` field
/// over the raw body.
pub(crate) async fn from_response(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or(body);
    ProviderError::ApiError { status, message }
}
