use serde_json::Value;

use crate::error::Error;

/// Structured key/value pairs logged alongside an error
pub type LogContext = serde_json::Map<String, Value>;

/// Context key whose value is also appended to the error message
const WHAT_KEY: &str = "what";

impl Error {
    /// Attach log context from alternating key/value arguments
    ///
    /// A single argument is treated as a note and appended to the message.
    /// Otherwise arguments are paired up as `key, value`; a trailing key
    /// without a value is recorded as `null`. Non-string keys use their
    /// JSON text. When one of the attached keys is `what`, its value is
    /// appended to the message as well.
    ///
    /// ```
    /// use faultline_core::Error;
    ///
    /// let err = Error::not_found("account missing").with(["what", "id 42", "table", "accounts"]);
    /// assert_eq!(err.message(), "account missing, id 42");
    /// assert_eq!(err.context()["table"], "accounts");
    /// ```
    #[must_use]
    pub fn with<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let args: Vec<Value> = args.into_iter().map(Into::into).collect();

        match args.as_slice() {
            [] => return self,
            [note] => {
                self.append_to_message(&value_text(note));
                return self;
            }
            _ => {}
        }

        let mut what = None;
        let mut args = args.into_iter();
        while let Some(key) = args.next() {
            let key = value_text(&key);
            let value = args.next().unwrap_or(Value::Null);
            if key == WHAT_KEY {
                what = Some(value_text(&value));
            }
            self.context.insert(key, value);
        }

        if let Some(what) = what {
            self.append_to_message(&what);
        }

        self
    }

    /// Attach a single context pair
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        if key == WHAT_KEY {
            self.append_to_message(&value_text(&value));
        }
        self.context.insert(key, value);
        self
    }

    /// Emit the error as a structured log line
    ///
    /// Construction never logs; call sites decide when an error is worth
    /// recording.
    pub fn log(&self) {
        let context = Value::Object(self.context.clone());
        match &self.cause {
            Some(cause) => tracing::error!(
                kind = %self.kind,
                status = self.status().as_u16(),
                context = %context,
                cause = %cause,
                "{}",
                self.message
            ),
            None => tracing::error!(
                kind = %self.kind,
                status = self.status().as_u16(),
                context = %context,
                "{}",
                self.message
            ),
        }
    }

    fn append_to_message(&mut self, text: &str) {
        self.message.push_str(", ");
        self.message.push_str(text);
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
