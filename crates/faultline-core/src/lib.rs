//! Error taxonomy for HTTP services
//!
//! A closed set of error [`Kind`]s with fixed wire tags and statuses, and a
//! uniform [`Error`] value built through one constructor per kind.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod context;
mod database;
mod error;
mod kind;

pub use context::LogContext;
pub use error::{BoxError, Error, INTERNAL_CLIENT_MESSAGE};
pub use kind::Kind;

pub type Result<T, E = Error> = std::result::Result<T, E>;
