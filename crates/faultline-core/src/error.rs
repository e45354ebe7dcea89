use std::collections::BTreeMap;
use std::fmt;

use http::StatusCode;

use crate::context::LogContext;
use crate::kind::Kind;

/// Boxed underlying cause of an [`Error`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Message shown to clients in place of any internal server error message
pub const INTERNAL_CLIENT_MESSAGE: &str = "Internal server error!";

const INTERNAL_MESSAGE: &str = "this is an internal server error! our team has been notified";
const VALIDATION_MESSAGE: &str = "could not validate one or more of the submitted fields";
const NO_TOKEN_MESSAGE: &str = "No token found in request header.";
const INVALID_TOKEN_MESSAGE: &str = "The provided token is not valid.";
const INVALID_JWT_CLAIMS_MESSAGE: &str = "The JWT claims are not valid.";
const INVALID_API_KEY_MESSAGE: &str = "The provided api key is not valid.";
const INVALID_KEY_ATTRIBUTES_MESSAGE: &str = "The API Key attributes are not valid.";
const INVALID_AUTH_METHOD_MESSAGE: &str = "The authentication method is not supported.";

/// Uniform application error
///
/// Built through one constructor per category so the kind, and with it the
/// HTTP status, is fixed at creation. Only [`Error::validation`] attaches a
/// field map. The cause is kept for logs and [`std::error::Error::source`]
/// and never reaches a client.
#[derive(Debug)]
pub struct Error {
    pub(crate) kind: Kind,
    pub(crate) message: String,
    pub(crate) fields: Option<BTreeMap<String, String>>,
    pub(crate) context: LogContext,
    pub(crate) cause: Option<BoxError>,
}

impl Error {
    fn new(kind: Kind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            fields: None,
            context: LogContext::new(),
            cause: None,
        }
    }

    /// Malformed or unacceptable request (400)
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(Kind::InvalidRequest, message)
    }

    /// Requested resource does not exist (404)
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Kind::NotFound, message)
    }

    /// Request conflicts with existing state (409)
    pub fn resource_conflict(message: impl Into<String>) -> Self {
        Self::new(Kind::ResourceConflict, message)
    }

    /// Unexpected failure (500); the message is never shown to clients
    pub fn internal() -> Self {
        Self::new(Kind::InternalServer, INTERNAL_MESSAGE)
    }

    /// Caller is not authenticated (401)
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(Kind::Unauthorized, message)
    }

    /// Caller is authenticated but not allowed (403)
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(Kind::Forbidden, message)
    }

    /// Request took too long to complete (408)
    pub fn request_timeout(message: impl Into<String>) -> Self {
        Self::new(Kind::RequestTimeout, message)
    }

    /// Request carries no bearer token (401)
    pub fn no_token() -> Self {
        Self::new(Kind::NoToken, NO_TOKEN_MESSAGE)
    }

    /// Bearer token failed verification (401)
    pub fn invalid_token() -> Self {
        Self::new(Kind::InvalidToken, INVALID_TOKEN_MESSAGE)
    }

    /// Token verified but its claims are unacceptable (401)
    pub fn invalid_jwt_claims() -> Self {
        Self::new(Kind::InvalidJwtClaims, INVALID_JWT_CLAIMS_MESSAGE)
    }

    /// API key failed verification (401, reported as an invalid token)
    pub fn invalid_api_key() -> Self {
        Self::new(Kind::InvalidToken, INVALID_API_KEY_MESSAGE)
    }

    /// API key attributes are unacceptable (401, reported as invalid claims)
    pub fn invalid_key_attributes() -> Self {
        Self::new(Kind::InvalidJwtClaims, INVALID_KEY_ATTRIBUTES_MESSAGE)
    }

    /// Unsupported authentication scheme (401, reported as invalid claims)
    pub fn invalid_auth_method() -> Self {
        Self::new(Kind::InvalidJwtClaims, INVALID_AUTH_METHOD_MESSAGE)
    }

    /// Field-level validation failure (400)
    ///
    /// When a field appears more than once the first message wins. An empty
    /// iterator leaves the error without a field map.
    pub fn validation<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (field, message) in fields {
            map.entry(field.into()).or_insert_with(|| message.into());
        }

        let mut error = Self::new(Kind::Validation, VALIDATION_MESSAGE);
        error.fields = (!map.is_empty()).then_some(map);
        error
    }

    /// Attach the underlying cause
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub const fn kind(&self) -> Kind {
        self.kind
    }

    pub const fn status(&self) -> StatusCode {
        self.kind.status()
    }

    /// Message as built, including any context appended to it
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message safe to expose to API consumers
    pub fn client_message(&self) -> &str {
        if self.kind == Kind::InternalServer {
            INTERNAL_CLIENT_MESSAGE
        } else {
            &self.message
        }
    }

    /// Field name to message map, present only on validation errors
    pub const fn fields(&self) -> Option<&BTreeMap<String, String>> {
        self.fields.as_ref()
    }

    pub const fn context(&self) -> &LogContext {
        &self.context
    }

    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn is(&self, kind: Kind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status: {} - message: {}", self.status().as_u16(), self.message)?;
        if let Some(cause) = &self.cause {
            write!(f, " - cause: {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

/// Untyped errors become internal server errors with the original kept as cause
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::internal().with_cause(err)
    }
}
