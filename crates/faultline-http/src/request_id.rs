use axum::Router;
use axum::body::Body;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use http::HeaderName;
use http::header::CONTENT_LENGTH;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::render::ErrorBody;

/// Default correlation header
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Stamp the request id into error bodies
///
/// Runs after the inner service has produced a response. When the response
/// carries an [`ErrorBody`], the body is re-rendered with the value of the
/// already-set request-id response header.
pub async fn stamp_request_id(header: HeaderName, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let Some(mut body) = response.extensions_mut().remove::<ErrorBody>() else {
        return response;
    };

    let request_id = response
        .headers()
        .get(&header)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    if request_id != body.request_id {
        body.request_id = request_id;
        match body.to_json() {
            Ok(bytes) => {
                response.headers_mut().remove(CONTENT_LENGTH);
                *response.body_mut() = Body::from(bytes);
            }
            Err(e) => tracing::warn!(error = %e, "failed to re-render error body"),
        }
    }

    response.extensions_mut().insert(body);
    response
}

/// Wrap a router with request-id generation, propagation and stamping
///
/// Incoming ids are kept; missing ones are generated as UUIDs. The id is
/// copied to the response header before error bodies are stamped.
pub fn with_request_id<S>(router: Router<S>, header: HeaderName) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let stamp_header = header.clone();

    router
        .layer(PropagateRequestIdLayer::new(header.clone()))
        .layer(axum::middleware::from_fn(move |req, next| {
            let header = stamp_header.clone();
            async move { stamp_request_id(header, req, next).await }
        }))
        .layer(SetRequestIdLayer::new(header, MakeRequestUuid))
}
