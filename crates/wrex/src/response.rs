//! HTTP response types

use std::fmt;

use serde::de::DeserializeOwned;

use crate::error::HttpError;

/// HTTP Response type - generic over the body type R and error type E
/// This is the primary return type for all HTTP operations
pub type Response<R, E = HttpError> = Result<R, E>;

/// Fully read HTTP response
///
/// The body is captured in memory before the status is validated, so it can be
/// inspected any number of times, including when the request failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    status: u16,
    headers: Vec<(String, String)>,
    data: Vec<u8>,
}

/// Short alias for [`RawResponse`]
pub type Resp = RawResponse;

impl RawResponse {
    /// Create a response from its parts
    pub fn new(status: u16, headers: Vec<(String, String)>, data: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            data,
        }
    }

    /// Get the HTTP status code, `0` if no response was received
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// Check if the response status is a success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the response status is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if the response status is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Response headers in the order the transport reported them
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First value of the header `name`, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Raw body bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the response and return the body bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Body as text, invalid UTF-8 sequences are replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Response<T, serde_json::Error> {
        serde_json::from_slice(&self.data)
    }
}

impl fmt::Display for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.data))
    }
}
