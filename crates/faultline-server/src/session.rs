use axum::Router;
use axum::routing::get;
use faultline_core::Error;
use faultline_http::Failure;
use http::{HeaderMap, StatusCode};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/session", get(check_session))
}

/// Check the shape of the bearer token
///
/// Signatures are not verified; only the header and token layout are.
async fn check_session(headers: HeaderMap) -> Result<StatusCode, Failure> {
    let token = bearer_token(&headers).ok_or_else(Error::no_token)?;

    if !is_compact_token(token) {
        tracing::debug!("rejected malformed bearer token");
        return Err(Error::invalid_token().into());
    }

    Ok(StatusCode::NO_CONTENT)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

// header.payload.signature
fn is_compact_token(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();
    segments.len() == 3
        && segments
            .iter()
            .all(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'))
}
