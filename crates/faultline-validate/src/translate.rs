use std::borrow::Cow;
use std::collections::HashMap;

use serde_json::Value;
use validator::ValidationError;

use crate::rules::{PASSWORD_RULE, PIN_RULE, TEL_RULE};

/// Rule code to message template table
///
/// Templates use `{field}` for the field name and `{param}` for any rule
/// parameter (e.g. `{min}`, `{max}`, `{other}`).
#[derive(Debug, Clone)]
pub struct Translations {
    templates: HashMap<String, String>,
}

impl Translations {
    /// English messages for the built-in and custom rules
    pub fn english() -> Self {
        let templates = [
            ("required", "{field} is a required field"),
            ("email", "{field} must be a valid email address"),
            ("url", "{field} must be a valid URL"),
            ("length.between", "{field} must be between {min} and {max} characters in length"),
            ("length.min", "{field} must be at least {min} characters in length"),
            ("length.max", "{field} must be a maximum of {max} characters in length"),
            ("length.equal", "{field} must be {equal} characters in length"),
            ("range.between", "{field} must be between {min} and {max}"),
            ("range.min", "{field} must be {min} or greater"),
            ("range.max", "{field} must be {max} or less"),
            ("must_match", "{field} must be equal to {other}"),
            ("contains", "{field} must contain the text '{needle}'"),
            ("does_not_contain", "{field} cannot contain the text '{needle}'"),
            ("regex", "{field} is not in the correct format"),
            ("credit_card", "{field} must be a valid credit card number"),
            ("non_control_character", "{field} cannot contain control characters"),
            (TEL_RULE, "{field} must be a valid telephone number"),
            (
                PASSWORD_RULE,
                "{field} must be at least {min} characters long and contain an uppercase letter, a number and a special character",
            ),
            (PIN_RULE, "{field} must be a 4 to 12 digit PIN"),
        ]
        .into_iter()
        .map(|(rule, template)| (rule.to_string(), template.to_string()))
        .collect();

        Self { templates }
    }

    /// Add or replace the template for a rule
    pub fn register(&mut self, rule: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(rule.into(), template.into());
    }

    /// Render the message for one failed rule on `field`
    ///
    /// An explicit message on the error wins over the table.
    pub fn translate(&self, field: &str, error: &ValidationError) -> String {
        if let Some(message) = &error.message {
            return message.to_string();
        }

        match self.templates.get(template_key(error).as_ref()) {
            Some(template) => render(template, field, &error.params),
            None => format!("{field} failed on the '{}' rule", error.code),
        }
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::english()
    }
}

/// Bounded rules pick a template variant by which bounds are set
fn template_key(error: &ValidationError) -> Cow<'_, str> {
    let code = error.code.as_ref();
    if code != "length" && code != "range" {
        return Cow::Borrowed(code);
    }

    let has = |name: &str| error.params.contains_key(name);
    let variant = if has("equal") {
        "equal"
    } else if has("min") && has("max") {
        "between"
    } else if has("min") {
        "min"
    } else {
        "max"
    };

    Cow::Owned(format!("{code}.{variant}"))
}

fn render(template: &str, field: &str, params: &HashMap<Cow<'static, str>, Value>) -> String {
    let mut message = template.replace("{field}", field);
    for (name, value) in params {
        let placeholder = format!("{{{name}}}");
        if message.contains(&placeholder) {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            message = message.replace(&placeholder, &text);
        }
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_with(code: &'static str, params: &[(&'static str, Value)]) -> ValidationError {
        let mut error = ValidationError::new(code);
        for (name, value) in params {
            error.add_param((*name).into(), value);
        }
        error
    }

    #[test]
    fn required_field() {
        let translations = Translations::english();
        let message = translations.translate("email", &ValidationError::new("required"));
        assert_eq!(message, "email is a required field");
    }

    #[test]
    fn length_variants() {
        let translations = Translations::english();

        let between = error_with("length", &[("min", 2.into()), ("max", 64.into())]);
        assert_eq!(
            translations.translate("name", &between),
            "name must be between 2 and 64 characters in length"
        );

        let min = error_with("length", &[("min", 2.into())]);
        assert_eq!(translations.translate("name", &min), "name must be at least 2 characters in length");

        let max = error_with("length", &[("max", 5.into())]);
        assert_eq!(
            translations.translate("name", &max),
            "name must be a maximum of 5 characters in length"
        );
    }

    #[test]
    fn custom_rules() {
        let translations = Translations::english();
        assert_eq!(
            translations.translate("phone_number", &ValidationError::new(TEL_RULE)),
            "phone_number must be a valid telephone number"
        );

        let password = error_with(PASSWORD_RULE, &[("min", 8.into())]);
        assert!(translations.translate("password", &password).starts_with("password must be at least 8 characters"));
    }

    #[test]
    fn explicit_message_wins() {
        let translations = Translations::english();
        let error = ValidationError::new("email").with_message("use your work address".into());
        assert_eq!(translations.translate("email", &error), "use your work address");
    }

    #[test]
    fn unknown_rule_falls_back() {
        let translations = Translations::english();
        assert_eq!(
            translations.translate("sku", &ValidationError::new("sku_format")),
            "sku failed on the 'sku_format' rule"
        );
    }

    #[test]
    fn registered_template_overrides() {
        let mut translations = Translations::english();
        translations.register("required", "{field} is missing");
        assert_eq!(
            translations.translate("email", &ValidationError::new("required")),
            "email is missing"
        );
    }
}
