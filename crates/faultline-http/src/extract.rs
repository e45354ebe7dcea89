use std::fmt::Display;
use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRef, FromRequest, Request};
use faultline_core::Error;
use faultline_validate::{FieldNames, Rules, Validator};
use serde::de::DeserializeOwned;
use validator::ValidateArgs;

use crate::failure::Failure;

/// Invalid-request error for a body that could not be bound to `type_name`
pub fn bind_error(err: &impl Display, type_name: &str) -> Error {
    Error::invalid_request(format!("error binding type {type_name}, {err}"))
}

/// JSON body extractor that also runs the shared [`Validator`]
///
/// Binding failures become invalid-request errors and rule failures become
/// validation errors with a field map.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    Arc<Validator>: FromRef<S>,
    T: DeserializeOwned + Send + FieldNames + for<'a> ValidateArgs<'a, Args = &'a Rules>,
{
    type Rejection = Failure;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rejection| bind_error(&rejection, short_type_name::<T>()))?;

        let validator = Arc::<Validator>::from_ref(state);
        validator.check(&value)?;

        Ok(Self(value))
    }
}

fn short_type_name<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::routing::post;
    use http::StatusCode;
    use serde::Deserialize;
    use serde_json::Value;
    use tower::ServiceExt;
    use validator::Validate;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    #[validate(context = Rules)]
    struct Contact {
        #[validate(email)]
        email: String,
        #[serde(rename = "mobile")]
        #[validate(custom(function = "faultline_validate::telephone", use_context))]
        phone: String,
    }

    impl FieldNames for Contact {
        const SERIALIZED_NAMES: &'static [(&'static str, &'static str)] = &[("phone", "mobile")];
    }

    async fn create(ValidJson(contact): ValidJson<Contact>) -> (StatusCode, String) {
        (StatusCode::CREATED, format!("{} {}", contact.email, contact.phone))
    }

    fn app() -> Router {
        Router::new()
            .route("/contacts", post(create))
            .with_state(Arc::new(Validator::default()))
    }

    fn post_json(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/contacts")
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn bind_error_message() {
        let error = bind_error(&"missing field `email`", "Contact");
        assert_eq!(error.message(), "error binding type Contact, missing field `email`");
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn short_names() {
        assert_eq!(short_type_name::<Contact>(), "Contact");
        assert_eq!(short_type_name::<u8>(), "u8");
    }

    #[tokio::test]
    async fn accepts_valid_body() {
        let response = app()
            .oneshot(post_json(r#"{"email":"jane@example.com","mobile":"+4915112345678"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn rejects_rule_violations_with_fields() {
        let response = app()
            .oneshot(post_json(r#"{"email":"jane","mobile":"555"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["kind"], "input_validation_error");
        assert_eq!(body["error"]["fields"]["email"], "email must be a valid email address");
        assert_eq!(body["error"]["fields"]["mobile"], "mobile must be a valid telephone number");
    }

    #[tokio::test]
    async fn malformed_body_is_bind_error() {
        let response = app().oneshot(post_json("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["kind"], "invalid_request_error");
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .starts_with("error binding type Contact, ")
        );
        assert!(body["error"].get("fields").is_none());
    }
}
