use std::collections::BTreeMap;

use axum::Json;
use axum::response::{IntoResponse, Response};
use faultline_core::Kind;
use http::StatusCode;
use serde::Serialize;

use crate::failure::Failure;

/// Client-facing projection of a [`Failure`]
///
/// Serialized under a single top-level `error` key. Also stored in the
/// response extensions so the request-id middleware can re-render it.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    #[serde(skip)]
    pub status: StatusCode,
    pub kind: Kind,
    pub message: String,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

#[derive(Serialize)]
struct Envelope<'a> {
    error: &'a ErrorBody,
}

impl ErrorBody {
    /// Project a failure, hiding internal details
    pub fn new(failure: &Failure, request_id: impl Into<String>) -> Self {
        let request_id = request_id.into();
        match failure {
            Failure::Framework { status, message } => Self {
                status: *status,
                kind: Kind::Server,
                message: message.clone(),
                request_id,
                fields: None,
            },
            Failure::App(error) => Self {
                status: error.status(),
                kind: error.kind(),
                message: error.client_message().to_owned(),
                request_id,
                fields: error.fields().cloned(),
            },
        }
    }

    /// JSON bytes of `{"error": {...}}`
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&Envelope { error: self })
    }

    fn to_response(&self) -> Response {
        let mut response = (self.status, Json(Envelope { error: self })).into_response();
        response.extensions_mut().insert(self.clone());
        response
    }
}

/// Render a failure as a JSON error response
///
/// Internal server errors are logged with their cause before the generic
/// message goes out.
pub fn render(failure: &Failure, request_id: &str) -> Response {
    match failure {
        Failure::App(error) if error.is(Kind::InternalServer) => error.log(),
        Failure::App(error) => tracing::debug!(kind = %error.kind(), "{}", error.message()),
        Failure::Framework { status, message } => tracing::debug!(%status, "{message}"),
    }

    ErrorBody::new(failure, request_id).to_response()
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        render(&self, "")
    }
}

/// Fallback for unmatched routes
pub async fn route_not_found() -> Failure {
    Failure::framework(StatusCode::NOT_FOUND, "Not Found")
}

/// Fallback for known routes called with an unsupported method
pub async fn route_method_not_allowed() -> Failure {
    Failure::framework(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
