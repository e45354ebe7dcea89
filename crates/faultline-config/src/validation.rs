use serde::Deserialize;

/// Overrides for the custom field rules
///
/// Unset values keep the built-in patterns.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Regular expression for telephone numbers
    #[serde(default)]
    pub phone_pattern: Option<String>,
    /// Regular expression for numeric PINs
    #[serde(default)]
    pub pin_pattern: Option<String>,
    /// Minimum password length
    #[serde(default)]
    pub password_min_length: Option<usize>,
    /// Characters of which a password must contain at least one
    #[serde(default)]
    pub password_symbols: Option<String>,
}
