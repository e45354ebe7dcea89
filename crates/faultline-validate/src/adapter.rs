use std::fmt;

use faultline_core::Error;
use serde::Serialize;
use validator::{Validate, ValidateArgs, ValidationErrors, ValidationErrorsKind};

use crate::rules::Rules;
use crate::translate::Translations;

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    /// Serialized field name, dotted for nested fields (e.g. `address.city`)
    pub field: String,
    /// Translated message
    pub message: String,
}

impl fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Build a validation-kind error from field failures
pub fn validation_error(violations: impl IntoIterator<Item = FieldValidationError>) -> Error {
    Error::validation(violations.into_iter().map(|v| (v.field, v.message)))
}

/// Wire names of a struct's fields
///
/// The validator derive reports Rust field names. Structs whose serialized
/// names differ list them here, mirroring their `#[serde(rename)]`
/// attributes; a field that is never serialized maps to `""`. Fields not
/// listed keep their Rust name.
///
/// ```
/// use faultline_validate::FieldNames;
///
/// struct SignUp;
///
/// impl FieldNames for SignUp {
///     const SERIALIZED_NAMES: &'static [(&'static str, &'static str)] = &[("phone", "phone_number")];
/// }
///
/// assert_eq!(SignUp::serialized_name("phone"), "phone_number");
/// assert_eq!(SignUp::serialized_name("email"), "email");
/// ```
pub trait FieldNames {
    /// `(rust_name, serialized_name)` pairs
    const SERIALIZED_NAMES: &'static [(&'static str, &'static str)] = &[];

    fn serialized_name(field: &str) -> &str {
        lookup(Self::SERIALIZED_NAMES, field)
    }
}

fn lookup<'a>(names: &[(&str, &'static str)], field: &'a str) -> &'a str {
    names
        .iter()
        .find(|(rust_name, _)| *rust_name == field)
        .map_or(field, |&(_, serialized)| serialized)
}

/// Struct validator with custom rules and English messages
///
/// Top-level field names in the output come from [`FieldNames`]; nested
/// structs are reported under their Rust field names. Only the first
/// failing rule of each field is reported.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: Rules,
    translations: Translations,
}

impl Validator {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            translations: Translations::english(),
        }
    }

    /// Replace the message table
    #[must_use]
    pub fn with_translations(mut self, translations: Translations) -> Self {
        self.translations = translations;
        self
    }

    pub const fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Validate a struct that uses [`Rules`] as its validation context
    ///
    /// Returns `None` when every rule passes.
    pub fn validate<'a, T>(&'a self, value: &T) -> Option<Vec<FieldValidationError>>
    where
        T: ValidateArgs<'a, Args = &'a Rules> + FieldNames,
    {
        let errors = value.validate_with_args(&self.rules).err()?;
        self.translate(&errors, T::SERIALIZED_NAMES)
    }

    /// Validate a struct that needs no custom rules
    pub fn validate_plain<T: Validate + FieldNames>(&self, value: &T) -> Option<Vec<FieldValidationError>> {
        let errors = value.validate().err()?;
        self.translate(&errors, T::SERIALIZED_NAMES)
    }

    /// Validate and wrap any failures into a validation-kind [`Error`]
    pub fn check<'a, T>(&'a self, value: &T) -> Result<(), Error>
    where
        T: ValidateArgs<'a, Args = &'a Rules> + FieldNames,
    {
        self.validate(value).map_or(Ok(()), |violations| Err(validation_error(violations)))
    }

    fn translate(
        &self,
        errors: &ValidationErrors,
        names: &[(&str, &'static str)],
    ) -> Option<Vec<FieldValidationError>> {
        let mut violations = Vec::new();
        self.collect(None, errors, names, &mut violations);

        if violations.is_empty() {
            return None;
        }

        violations.sort_by(|a, b| a.field.cmp(&b.field));
        Some(violations)
    }

    fn collect(
        &self,
        prefix: Option<&str>,
        errors: &ValidationErrors,
        names: &[(&str, &'static str)],
        out: &mut Vec<FieldValidationError>,
    ) {
        for (name, kind) in errors.errors() {
            let name = lookup(names, name);
            let path = prefix.map_or_else(|| name.to_string(), |prefix| format!("{prefix}.{name}"));

            match kind {
                ValidationErrorsKind::Field(field_errors) => {
                    if let Some(first) = field_errors.first() {
                        out.push(FieldValidationError {
                            message: self.translations.translate(name, first),
                            field: path,
                        });
                    }
                }
                ValidationErrorsKind::Struct(nested) => self.collect(Some(&path), nested, &[], out),
                ValidationErrorsKind::List(items) => {
                    for (index, nested) in items {
                        self.collect(Some(&format!("{path}[{index}]")), nested, &[], out);
                    }
                }
            }
        }
    }
}
