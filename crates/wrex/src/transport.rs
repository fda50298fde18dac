//! HTTP Transport trait

use std::fmt::Debug;

use futures::stream::{self, BoxStream, StreamExt};
use url::Url;

use crate::error::TransportError;
use crate::request::Method;

/// Stream of response body chunks
pub type BodyStream = BoxStream<'static, Result<Vec<u8>, TransportError>>;

/// Fully encoded request handed to a [`Transport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Target URL including the query string
    pub url: Url,
    /// Headers to send
    pub headers: Vec<(String, String)>,
    /// Encoded payload, empty when there is no body
    pub body: Vec<u8>,
}

/// Response returned by a [`Transport`] before its body is read
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Vec<(String, String)>,
    /// Body chunks
    pub body: BodyStream,
}

impl Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl TransportResponse {
    /// Response whose body is already in memory
    pub fn from_bytes(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body: stream::once(async move { Ok::<_, TransportError>(body) }).boxed(),
        }
    }

    /// Read the remaining body into memory
    pub async fn read_body(&mut self) -> Result<Vec<u8>, TransportError> {
        let mut data = Vec::new();
        while let Some(chunk) = self.body.next().await {
            data.extend_from_slice(&chunk?);
        }
        Ok(data)
    }
}

/// Sends requests on behalf of a [`Client`](crate::Client)
///
/// Implementations must be safe to share between concurrent calls; pooling and
/// connection reuse are their business.
#[async_trait::async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Send `request` and return the status, headers and body stream
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
