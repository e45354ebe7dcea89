//! Rendering of application errors as JSON HTTP responses
//!
//! Handlers return `Result<_, Failure>`; the response carries
//! `{"error": {"kind", "message", "request_id", "fields"?}}` with the
//! status taken from the error kind.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod extract;
mod failure;
mod render;
mod request_id;

pub use extract::{ValidJson, bind_error};
pub use failure::Failure;
pub use render::{ErrorBody, render, route_method_not_allowed, route_not_found};
pub use request_id::{REQUEST_ID_HEADER, stamp_request_id, with_request_id};

pub type Result<T, E = Failure> = std::result::Result<T, E>;
