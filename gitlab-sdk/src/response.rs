// ABOUTME: Response decoding for GitLab API calls
// ABOUTME: Parses JSON bodies and turns error envelopes into readable messages

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{GitlabError, Result};

/// Decode a response body into `T`.
///
/// The server is assumed to return JSON even on failure; a non-2xx status
/// produces an [`GitlabError::Api`] whose message is built from the error
/// envelope (`message` plus optional `errors` entries).
pub fn decode<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T> {
    let status = response.status();
    let text = response.text().map_err(GitlabError::from)?;
    let body: Value = serde_json::from_str(&text)?;

    if !status.is_success() {
        return Err(GitlabError::Api {
            status: status.as_u16(),
            message: envelope_message(&body),
        });
    }

    Ok(serde_json::from_value(body)?)
}

/// Render the GitLab error envelope `{"message": ..., "errors": [...]?}` as
/// text, with each `errors` entry on its own two-space-indented line.
pub fn envelope_message(body: &Value) -> String {
    let mut parts = vec![render_entry(body.get("message").unwrap_or(&Value::Null))];

    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        for entry in errors {
            parts.push(render_entry(entry));
        }
    }

    parts.join("\n  ")
}

fn render_entry(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_message_with_errors() {
        let body = json!({"message": "boom", "errors": ["a", "b"]});
        assert_eq!(envelope_message(&body), "boom\n  a\n  b");
    }

    #[test]
    fn test_envelope_message_without_errors() {
        let body = json!({"message": "404 Not Found"});
        assert_eq!(envelope_message(&body), "404 Not Found");
    }

    #[test]
    fn test_envelope_message_with_structured_errors() {
        let body = json!({"message": "validation failed", "errors": [{"title": "is too long"}]});
        assert_eq!(
            envelope_message(&body),
            "validation failed\n  {\"title\":\"is too long\"}"
        );
    }

    #[test]
    fn test_envelope_message_with_non_string_message() {
        let body = json!({"message": {"title": ["can't be blank"]}});
        assert_eq!(envelope_message(&body), "{\"title\":[\"can't be blank\"]}");
    }
}
