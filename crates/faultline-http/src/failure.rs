use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use faultline_core::Error;
use http::StatusCode;
use thiserror::Error;

/// Everything that can end a request with an error response
///
/// Handlers return `Result<_, Failure>` so `?` works on application
/// errors, storage errors, untyped errors and framework rejections alike.
#[derive(Debug, Error)]
pub enum Failure {
    /// Application error from the service's own layers
    #[error(transparent)]
    App(#[from] Error),

    /// Error raised by the HTTP framework (extractor rejection, unknown route)
    #[error("{status}: {message}")]
    Framework { status: StatusCode, message: String },
}

impl Failure {
    pub fn framework(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Framework {
            status,
            message: message.into(),
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::App(error) => error.status(),
            Self::Framework { status, .. } => *status,
        }
    }
}

impl From<sqlx::Error> for Failure {
    fn from(err: sqlx::Error) -> Self {
        Self::App(Error::database(err))
    }
}

impl From<anyhow::Error> for Failure {
    fn from(err: anyhow::Error) -> Self {
        Self::App(err.into())
    }
}

impl From<JsonRejection> for Failure {
    fn from(rejection: JsonRejection) -> Self {
        Self::framework(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for Failure {
    fn from(rejection: PathRejection) -> Self {
        Self::framework(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for Failure {
    fn from(rejection: QueryRejection) -> Self {
        Self::framework(rejection.status(), rejection.body_text())
    }
}
