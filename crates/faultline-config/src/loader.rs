use std::path::Path;

use http::HeaderName;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// resolved, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if a placeholder cannot be resolved, TOML parsing
    /// fails, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the request-id header name or a validation
    /// override is unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server_config()?;
        self.validate_rule_overrides()?;
        Ok(())
    }

    fn validate_server_config(&self) -> anyhow::Result<()> {
        HeaderName::try_from(self.server.request_id_header.as_str()).map_err(|e| {
            anyhow::anyhow!(
                "server.request_id_header '{}' is not a valid header name: {e}",
                self.server.request_id_header
            )
        })?;

        if !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }

    fn validate_rule_overrides(&self) -> anyhow::Result<()> {
        let validation = &self.validation;

        for (name, pattern) in [
            ("phone_pattern", &validation.phone_pattern),
            ("pin_pattern", &validation.pin_pattern),
        ] {
            if let Some(pattern) = pattern {
                regex::Regex::new(pattern).map_err(|e| anyhow::anyhow!("invalid validation.{name}: {e}"))?;
            }
        }

        if validation.password_min_length == Some(0) {
            anyhow::bail!("validation.password_min_length must be greater than 0");
        }

        if validation.password_symbols.as_deref().is_some_and(str::is_empty) {
            anyhow::bail!("validation.password_symbols must not be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::{Config, LogFormat};

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert!(config.server.listen_address.is_none());
        assert_eq!(config.server.request_id_header, "x-request-id");
        assert!(config.server.health.enabled);
        assert_eq!(config.server.health.path, "/health");
        assert_eq!(config.telemetry.log_filter, "info");
        assert_eq!(config.telemetry.format, LogFormat::Text);
        assert!(config.validation.phone_pattern.is_none());
    }

    #[test]
    fn full_file() {
        let config = Config::parse(
            r#"
            [server]
            listen_address = "127.0.0.1:8080"
            request_id_header = "x-correlation-id"

            [server.health]
            enabled = false

            [validation]
            phone_pattern = '^\+\d{8,15}$'
            password_min_length = 12
            password_symbols = "-_"

            [telemetry]
            log_filter = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.listen_address, Some("127.0.0.1:8080".parse().unwrap()));
        assert_eq!(config.server.request_id_header, "x-correlation-id");
        assert!(!config.server.health.enabled);
        assert_eq!(config.validation.password_min_length, Some(12));
        assert_eq!(config.telemetry.format, LogFormat::Json);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::parse("[server]\nlisten = \"x\"").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn invalid_header_is_rejected() {
        let err = Config::parse("[server]\nrequest_id_header = \"bad header\"").unwrap_err();
        assert!(err.to_string().contains("request_id_header"));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = Config::parse("[validation]\npin_pattern = \"(\"").unwrap_err();
        assert!(err.to_string().contains("validation.pin_pattern"));
    }

    #[test]
    fn zero_password_length_is_rejected() {
        let err = Config::parse("[validation]\npassword_min_length = 0").unwrap_err();
        assert!(err.to_string().contains("password_min_length"));
    }

    #[test]
    fn load_expands_environment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[telemetry]\nlog_filter = \"{{{{ env.FL_LOAD_FILTER }}}}\"").unwrap();

        temp_env::with_var("FL_LOAD_FILTER", Some("warn"), || {
            let config = Config::load(file.path()).unwrap();
            assert_eq!(config.telemetry.log_filter, "warn");
        });
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::load(std::path::Path::new("/nonexistent/faultline.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/faultline.toml"));
    }
}
