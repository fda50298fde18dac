//! HTTP request descriptor

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// HTTP method of a request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// PATCH
    Patch,
    /// HEAD
    Head,
    /// Any other method, sent verbatim
    Custom(String),
}

impl Method {
    /// Method name as sent on the wire
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Custom(method) => method.as_str(),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Method {
    fn from(method: &str) -> Self {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "PATCH" => Method::Patch,
            "HEAD" => Method::Head,
            other => Method::Custom(other.to_string()),
        }
    }
}

/// Request payload
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    /// No payload
    #[default]
    Empty,
    /// Key/value pairs sent as `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// Serialized JSON document, sent as is
    Json(Vec<u8>),
}

impl Body {
    /// Build a form body from key/value pairs
    pub fn form<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Body::Form(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Whether the body is absent
    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }
}

/// Predicate deciding whether a status code counts as success
pub type StatusValidator = Arc<dyn Fn(u16) -> bool + Send + Sync>;

/// Default status policy: any 2xx status is a success
pub fn default_validate_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Description of a single request
///
/// `path` is appended to the client's base URL. Headers set here are sent as is,
/// except that a form body always forces its own `Content-Type`.
#[derive(Clone, Default)]
pub struct Opts {
    /// Path appended to the client's base URL
    pub path: String,
    /// Request headers; a later insert for the same name overwrites
    pub headers: BTreeMap<String, String>,
    /// Request payload
    pub body: Body,
    /// Query parameters, encoded sorted by name
    pub params: BTreeMap<String, String>,
    /// Optional status validator, falls back to the client's and then to 2xx
    pub validate_status: Option<StatusValidator>,
    body_error: Option<String>,
}

impl fmt::Debug for Opts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opts")
            .field("path", &self.path)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("params", &self.params)
            .field("validate_status", &self.validate_status.is_some())
            .finish()
    }
}

impl Opts {
    /// Create options targeting `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set a header, replacing any earlier value for the same name in any case
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.force_header(&key.into(), &value.into());
        self
    }

    /// Add several headers
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in headers {
            self.force_header(&key.into(), &value.into());
        }
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add several query parameters
    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set the body
    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self.body_error = None;
        self
    }

    /// Set the body as JSON
    ///
    /// A value that cannot be serialized is remembered and reported when the
    /// request is executed, before anything is sent.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        match serde_json::to_vec(body) {
            Ok(bytes) => {
                self.body = Body::Json(bytes);
                self.body_error = None;
            }
            Err(e) => {
                self.body = Body::Empty;
                self.body_error = Some(e.to_string());
            }
        }
        self
    }

    /// Set the body as form data
    pub fn form<I, K, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.body(Body::form(pairs))
    }

    /// Set the status validator
    pub fn validate_status<F>(mut self, validator: F) -> Self
    where
        F: Fn(u16) -> bool + Send + Sync + 'static,
    {
        self.validate_status = Some(Arc::new(validator));
        self
    }

    /// Whether a header is set, compared case-insensitively
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.keys().any(|key| key.eq_ignore_ascii_case(name))
    }

    /// Set `name` to `value`, replacing every spelling of the same name
    pub(crate) fn force_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Set `name` to `value` unless it is already set
    pub(crate) fn default_header(&mut self, name: &str, value: &str) {
        if !self.has_header(name) {
            self.headers.insert(name.to_string(), value.to_string());
        }
    }

    pub(crate) fn body_error(&self) -> Option<&str> {
        self.body_error.as_deref()
    }
}
