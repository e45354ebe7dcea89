use regex::Regex;
use validator::ValidationError;

pub const EMAIL_PATTERN: &str = r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,4}$";
pub const PHONE_PATTERN: &str = r"^\+?[1-9]\d{10,15}$";
pub const PIN_PATTERN: &str = r"^\d{4,12}$";
pub const PASSWORD_SYMBOLS: &str = "*@$!%#?&";
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Rule code reported for invalid email addresses; shares the built-in
/// rule's message
pub const EMAIL_RULE: &str = "email";
/// Rule code reported for invalid telephone numbers
pub const TEL_RULE: &str = "tel";
/// Rule code reported for weak passwords
pub const PASSWORD_RULE: &str = "password";
/// Rule code reported for invalid PINs
pub const PIN_RULE: &str = "pin";

/// Password strength requirements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum number of characters
    pub min_length: usize,
    /// Characters of which at least one must appear
    pub symbols: String,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: PASSWORD_MIN_LENGTH,
            symbols: PASSWORD_SYMBOLS.to_string(),
        }
    }
}

/// Precompiled patterns backing the custom field rules
///
/// Built once at startup and passed by reference as the validation
/// context of structs using `#[validate(context = Rules)]`.
#[derive(Debug, Clone)]
pub struct Rules {
    email: Regex,
    phone: Regex,
    pin: Regex,
    password: Vec<Regex>,
    password_min_length: usize,
}

impl Rules {
    /// Compile rules from explicit patterns
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is not a valid regular expression
    pub fn new(phone_pattern: &str, pin_pattern: &str, policy: &PasswordPolicy) -> Result<Self, regex::Error> {
        let symbols: String = policy.symbols.chars().map(|c| regex::escape(&c.to_string())).collect();

        // All must match; the regex engine has no look-around
        let password = vec![
            Regex::new(&format!(r"^\S{{{},}}$", policy.min_length))?,
            Regex::new("[A-Za-z]")?,
            Regex::new("[A-Z]")?,
            Regex::new("[0-9]")?,
            Regex::new(&format!("[{symbols}]"))?,
        ];

        Ok(Self {
            email: Regex::new(EMAIL_PATTERN)?,
            phone: Regex::new(phone_pattern)?,
            pin: Regex::new(pin_pattern)?,
            password,
            password_min_length: policy.min_length,
        })
    }

    pub fn is_email(&self, value: &str) -> bool {
        self.email.is_match(value)
    }

    pub fn is_telephone(&self, value: &str) -> bool {
        self.phone.is_match(value)
    }

    pub fn is_pin(&self, value: &str) -> bool {
        self.pin.is_match(value)
    }

    pub fn is_strong_password(&self, value: &str) -> bool {
        self.password.iter().all(|re| re.is_match(value))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new(PHONE_PATTERN, PIN_PATTERN, &PasswordPolicy::default()).expect("built-in patterns must be valid")
    }
}

/// Custom rule: lowercase email address
///
/// Stricter than the derive's `email` check: only the project pattern is
/// accepted.
pub fn email(value: &str, rules: &Rules) -> Result<(), ValidationError> {
    if rules.is_email(value) {
        Ok(())
    } else {
        Err(ValidationError::new(EMAIL_RULE))
    }
}

/// Custom rule: telephone number
///
/// Use as `#[validate(custom(function = "faultline_validate::telephone", use_context))]`.
pub fn telephone(value: &str, rules: &Rules) -> Result<(), ValidationError> {
    if rules.is_telephone(value) {
        Ok(())
    } else {
        Err(ValidationError::new(TEL_RULE))
    }
}

/// Custom rule: password strength
pub fn password(value: &str, rules: &Rules) -> Result<(), ValidationError> {
    if rules.is_strong_password(value) {
        return Ok(());
    }

    let mut error = ValidationError::new(PASSWORD_RULE);
    error.add_param("min".into(), &rules.password_min_length);
    Err(error)
}

/// Custom rule: numeric PIN
pub fn pin(value: &str, rules: &Rules) -> Result<(), ValidationError> {
    if rules.is_pin(value) {
        Ok(())
    } else {
        Err(ValidationError::new(PIN_RULE))
    }
}
