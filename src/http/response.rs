//! Response classification.
//!
//! The service reports failures FastAPI-style as `{"detail": "..."}`, or as a
//! `detail` array of validation entries carrying a `msg` field.

use crate::error::{ApiError, ApiResult};
use reqwest::{Response, StatusCode};
use serde_json::Value;

/// Checks a response for failure statuses.
///
/// Returns the response unchanged on success. Otherwise maps:
/// - **401** → [`ApiError::Unauthenticated`]
/// - **403** → [`ApiError::Forbidden`]
/// - **404** → [`ApiError::NotFound`]
/// - any other non-success status → [`ApiError::Rejected`]
///
/// # Errors
///
/// Returns the mapped [`ApiError`] for non-success statuses.
pub async fn check_response(resp: Response) -> ApiResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let detail = extract_detail(&body);
    tracing::warn!(status = status.as_u16(), %detail, "api request rejected");
    Err(match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthenticated,
        StatusCode::FORBIDDEN => ApiError::Forbidden(detail),
        StatusCode::NOT_FOUND => ApiError::NotFound(detail),
        _ => ApiError::Rejected {
            status: status.as_u16(),
            detail,
        },
    })
}

/// Extracts a human-readable detail from an error body.
///
/// Falls back to the trimmed raw body when it is not a recognised JSON shape.
#[must_use]
pub fn extract_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_owned();
    };
    match value.get("detail") {
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => other.to_string(),
        None => body.trim().to_owned(),
    }
}
