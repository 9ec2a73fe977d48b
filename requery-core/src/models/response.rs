//! Response-side model types.
//!
//! - [`HttpResponse`] - transport-agnostic response record
//! - [`Payload`] - interpreted response body (JSON or plain text)
//! - [`ErrorRecord`] - uniform error surface for every failure class

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

// ============================================================================
// Http Response
// ============================================================================

/// Transport-agnostic record of one HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Status reason phrase; may be empty.
    pub status_text: String,
    /// Response headers with lowercased names.
    pub headers: HashMap<String, String>,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Returns true for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the declared content type, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(String::as_str)
    }

    /// Returns true when the declared content type indicates JSON.
    pub fn is_json(&self) -> bool {
        self.content_type()
            .is_some_and(|value| value.contains("application/json"))
    }

    /// Returns the reason phrase, or a synthesized `HTTP {status}` message.
    pub fn status_message(&self) -> String {
        if self.status_text.is_empty() {
            format!("HTTP {}", self.status)
        } else {
            self.status_text.clone()
        }
    }
}

// ============================================================================
// Payload
// ============================================================================

/// Interpreted response body.
///
/// The branch is chosen from the response's declared content type: JSON
/// content types parse into `Json`, everything else stays `Text`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Structured JSON body.
    Json(Value),
    /// Plain text body.
    Text(String),
}

impl Payload {
    /// Interprets a response body according to its content type.
    ///
    /// # Errors
    ///
    /// Returns a JSON error when the content type indicates JSON but the
    /// body does not parse.
    pub fn from_response(response: &HttpResponse) -> Result<Self, serde_json::Error> {
        if response.is_json() {
            Ok(Self::Json(serde_json::from_str(&response.body)?))
        } else {
            Ok(Self::Text(response.body.clone()))
        }
    }

    /// Returns the JSON value, if this payload is structured.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Returns the text body, if this payload is plain text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}

// ============================================================================
// Error Record
// ============================================================================

/// Uniform error surface for a settled fetch cycle.
///
/// Every failure class ends up here: local validation errors carry only a
/// message, HTTP errors additionally carry the status code and the
/// interpreted error payload, transport and decode faults carry a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRecord {
    /// Human-readable message.
    pub message: String,
    /// HTTP status code, when a response was received.
    pub status: Option<u16>,
    /// Interpreted error payload, when a response body was available.
    pub data: Option<Payload>,
}

impl ErrorRecord {
    /// Creates a local validation error (no network attempt was made).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            data: None,
        }
    }

    /// Creates a transport or decode fault.
    pub fn fault(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            data: None,
        }
    }

    /// Creates an HTTP-level error from a non-2xx response.
    ///
    /// The error payload follows the same content-type branch as the
    /// success path.
    pub fn http(response: &HttpResponse, data: Payload) -> Self {
        Self {
            message: response.status_message(),
            status: Some(response.status),
            data: Some(data),
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status {status})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, content_type: &str, body: &str) -> HttpResponse {
        let mut headers = HashMap::new();
        if !content_type.is_empty() {
            headers.insert("content-type".to_string(), content_type.to_string());
        }
        HttpResponse {
            status,
            status_text: String::new(),
            headers,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_json_content_type_parses_body() {
        let payload =
            Payload::from_response(&response(200, "application/json; charset=utf-8", r#"{"a":1}"#))
                .unwrap();
        assert_eq!(payload.as_json().unwrap(), &json!({"a": 1}));
    }

    #[test]
    fn test_text_content_type_stays_text() {
        let payload = Payload::from_response(&response(200, "text/plain", "hello")).unwrap();
        assert_eq!(payload.as_text().unwrap(), "hello");
    }

    #[test]
    fn test_missing_content_type_stays_text() {
        let payload = Payload::from_response(&response(200, "", r#"{"a":1}"#)).unwrap();
        assert!(payload.as_json().is_none());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Payload::from_response(&response(200, "application/json", "not json")).is_err());
    }

    #[test]
    fn test_status_message_synthesized_when_reason_missing() {
        assert_eq!(response(418, "", "").status_message(), "HTTP 418");

        let mut with_reason = response(404, "", "");
        with_reason.status_text = "Not Found".to_string();
        assert_eq!(with_reason.status_message(), "Not Found");
    }

    #[test]
    fn test_http_error_record_carries_status_and_payload() {
        let resp = response(404, "application/json", r#"{"detail":"missing"}"#);
        let payload = Payload::from_response(&resp).unwrap();
        let record = ErrorRecord::http(&resp, payload);

        assert_eq!(record.status, Some(404));
        assert_eq!(record.message, "HTTP 404");
        assert_eq!(
            record.data.unwrap().as_json().unwrap()["detail"],
            "missing"
        );
    }
}
