//! Request-side model types.
//!
//! This module contains everything needed to describe one HTTP request:
//! - [`Method`] - HTTP method with canonical uppercase tokens
//! - [`Body`] - structured, text, or opaque binary request body
//! - [`RequestConfig`] - base configuration, immutable after construction
//! - [`RequestOverrides`] - per-call partial override of the base config
//! - [`RequestPlan`] - the merged config, ready for assembly
//! - [`HttpRequest`] - the assembled wire request handed to a transport

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::resolver::UrlResolver;

// ============================================================================
// Method
// ============================================================================

/// HTTP request method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// GET request. Never carries a body.
    #[default]
    Get,
    /// POST request.
    Post,
    /// PUT request.
    Put,
    /// PATCH request.
    Patch,
    /// DELETE request.
    Delete,
    /// HEAD request.
    Head,
    /// OPTIONS request.
    Options,
}

impl Method {
    /// Returns the canonical uppercase token for this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Method {
    type Err = CoreError;

    /// Parses a method token in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            other => Err(CoreError::InvalidMethod(other.to_string())),
        }
    }
}

// ============================================================================
// Body
// ============================================================================

/// Request body.
///
/// `Json` bodies are serialized to JSON text at assembly time and receive a
/// JSON content-type header unless the caller supplied one. `Text` and
/// `Bytes` bodies pass through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Structured value, serialized to JSON at assembly time.
    Json(Value),
    /// Pre-rendered text body.
    Text(String),
    /// Opaque binary payload (multipart, file upload, etc.).
    Bytes(Vec<u8>),
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

// ============================================================================
// Request Config & Overrides
// ============================================================================

/// Base request configuration for a fetch controller.
///
/// Immutable after construction; individual fields can be overridden per
/// call via [`RequestOverrides`].
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Path (e.g. `/users`) or full URL.
    pub url: String,
    /// HTTP method.
    pub method: Method,
    /// Optional request body.
    pub body: Option<Body>,
    /// Additional headers.
    pub headers: HashMap<String, String>,
    /// Run one fetch when the owning context mounts.
    pub fetch_on_mount: bool,
}

impl RequestConfig {
    /// Creates a GET configuration for the given path or URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Merges per-call overrides over this configuration.
    ///
    /// URL, method, and body are replaced wholesale when overridden;
    /// override headers take precedence over base headers key by key.
    pub fn merge(&self, overrides: RequestOverrides) -> RequestPlan {
        let mut headers = self.headers.clone();
        headers.extend(overrides.headers);

        RequestPlan {
            url: overrides.url.unwrap_or_else(|| self.url.clone()),
            method: overrides.method.unwrap_or(self.method),
            body: overrides.body.or_else(|| self.body.clone()),
            headers,
        }
    }
}

/// Partial override of a [`RequestConfig`] for a single execute call.
#[derive(Debug, Clone, Default)]
pub struct RequestOverrides {
    /// Replacement URL.
    pub url: Option<String>,
    /// Replacement method.
    pub method: Option<Method>,
    /// Replacement body.
    pub body: Option<Body>,
    /// Headers merged over the base headers.
    pub headers: HashMap<String, String>,
}

impl RequestOverrides {
    /// Creates an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Overrides the method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Overrides the body.
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a header that takes precedence over the base headers.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

// ============================================================================
// Request Plan & Assembly
// ============================================================================

/// The merge of a base configuration and per-call overrides.
///
/// Produced by [`RequestConfig::merge`]; turned into an [`HttpRequest`] by
/// [`RequestPlan::assemble`].
#[derive(Debug, Clone)]
pub struct RequestPlan {
    /// Path or full URL.
    pub url: String,
    /// HTTP method.
    pub method: Method,
    /// Optional body.
    pub body: Option<Body>,
    /// Merged headers.
    pub headers: HashMap<String, String>,
}

impl RequestPlan {
    /// Returns true if the plan carries a usable URL.
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Assembles the wire request.
    ///
    /// Resolves the URL against the given resolver and negotiates the body:
    /// a `Json` body on a non-GET request is serialized to JSON text and a
    /// JSON content-type header is added unless the caller supplied one.
    /// GET requests never send a body, regardless of configuration.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Serialization` if a `Json` body cannot be
    /// serialized.
    pub fn assemble(self, resolver: &UrlResolver) -> Result<HttpRequest, CoreError> {
        let url = resolver.resolve(&self.url);
        let mut headers = self.headers;

        let body = match self.body {
            Some(body) if self.method != Method::Get => match body {
                Body::Json(value) => {
                    let text = serde_json::to_string(&value)?;
                    if !has_header(&headers, "content-type") {
                        headers.insert("Content-Type".to_string(), "application/json".to_string());
                    }
                    Some(text.into_bytes())
                }
                Body::Text(text) => Some(text.into_bytes()),
                Body::Bytes(bytes) => Some(bytes),
            },
            _ => None,
        };

        Ok(HttpRequest {
            url,
            method: self.method,
            headers,
            body,
        })
    }
}

/// Case-insensitive header presence check.
fn has_header(headers: &HashMap<String, String>, name: &str) -> bool {
    headers.keys().any(|key| key.eq_ignore_ascii_case(name))
}

// ============================================================================
// Http Request
// ============================================================================

/// Assembled wire request handed to a transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Fully resolved URL.
    pub url: String,
    /// HTTP method.
    pub method: Method,
    /// Headers; a transport sends none when this is empty.
    pub headers: HashMap<String, String>,
    /// Request body, already serialized.
    pub body: Option<Vec<u8>>,
}

// ============================================================================
// Tests
// ============================================================================
