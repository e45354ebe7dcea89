use http::StatusCode;
use serde::{Serialize, Serializer};

/// Category of an application error
///
/// Each kind has a fixed wire tag and a fixed default HTTP status. The tags
/// are part of the public API contract and must not change, including their
/// historical spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr, strum::EnumIter)]
pub enum Kind {
    #[strum(serialize = "unknown_error")]
    Unknown,
    #[strum(serialize = "invalid_request_error")]
    InvalidRequest,
    #[strum(serialize = "item_not_found_error")]
    NotFound,
    #[strum(serialize = "resource_conflict_error")]
    ResourceConflict,
    #[strum(serialize = "internal_server_error")]
    InternalServer,
    #[strum(serialize = "input_validation_error")]
    Validation,
    #[strum(serialize = "database_error")]
    Database,
    #[strum(serialize = "authorization_error")]
    Unauthorized,
    #[strum(serialize = "forbiden_error")]
    Forbidden,
    #[strum(serialize = "request_timeout_err")]
    RequestTimeout,
    /// Errors raised by the HTTP framework itself (extractor rejections, unknown routes)
    #[strum(serialize = "server_error")]
    Server,
    #[strum(serialize = "no_token_error")]
    NoToken,
    #[strum(serialize = "invalid_token_error")]
    InvalidToken,
    #[strum(serialize = "invalid_jwt_claims_error")]
    InvalidJwtClaims,
}

impl Kind {
    /// Machine-readable tag (e.g. `item_not_found_error`)
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Default HTTP status for this kind
    pub const fn status(self) -> StatusCode {
        match self {
            Self::InvalidRequest | Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ResourceConflict => StatusCode::CONFLICT,
            Self::Unauthorized | Self::NoToken | Self::InvalidToken | Self::InvalidJwtClaims => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            Self::Unknown | Self::InternalServer | Self::Database | Self::Server => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Iterate over every kind
    pub fn iter() -> impl Iterator<Item = Self> {
        <Self as strum::IntoEnumIterator>::iter()
    }
}

impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
