use std::sync::OnceLock;

use regex::{Captures, Regex};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExpandError {
    #[error("environment variable not found: `{0}`")]
    Missing(String),
    #[error("only variables scoped with 'env.' are supported: `{0}`")]
    UnsupportedScope(String),
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `{{ env.NAME }}` or `{{ env.NAME | default("value") }}`
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

/// Substitute `{{ env.VAR }}` placeholders in raw configuration text
///
/// A `| default("...")` suffix supplies the value for unset variables.
/// Commented lines are copied verbatim so disabled settings never require
/// their variables.
pub fn expand_env(input: &str) -> Result<String, ExpandError> {
    let mut lines = Vec::new();

    for line in input.split('\n') {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut failure = None;
        let expanded = placeholder().replace_all(line, |caps: &Captures<'_>| {
            resolve(caps).unwrap_or_else(|e| {
                if failure.is_none() {
                    failure = Some(e);
                }
                String::new()
            })
        });

        if let Some(e) = failure {
            return Err(e);
        }

        lines.push(expanded.into_owned());
    }

    Ok(lines.join("\n"))
}

fn resolve(caps: &Captures<'_>) -> Result<String, ExpandError> {
    let key = &caps[1];
    let Some(name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        return Err(ExpandError::UnsupportedScope(key.to_string()));
    };

    match (std::env::var(name), caps.get(2)) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.as_str().to_string()),
        (Err(_), None) => Err(ExpandError::Missing(name.to_string())),
    }
}
