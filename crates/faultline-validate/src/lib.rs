//! Struct validation with translated, per-field messages
//!
//! Wraps the `validator` derive with two project rules (telephone number
//! and password strength, plus a numeric PIN and a stricter email check)
//! and English messages for every rule, producing `(field, message)` pairs
//! keyed by the serialized field names a struct declares through
//! [`FieldNames`].

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod adapter;
mod rules;
mod translate;

pub use adapter::{FieldNames, FieldValidationError, Validator, validation_error};
pub use rules::{
    EMAIL_PATTERN, EMAIL_RULE, PASSWORD_MIN_LENGTH, PASSWORD_RULE, PASSWORD_SYMBOLS, PHONE_PATTERN, PIN_PATTERN,
    PIN_RULE, PasswordPolicy, Rules, TEL_RULE, email, password, pin, telephone,
};
pub use translate::Translations;
