//! bitreq-based Transport implementation

use std::sync::Arc;

use bitreq::RequestExt;

use crate::error::TransportError;
use crate::request::Method;
use crate::transport::{Transport, TransportRequest, TransportResponse};

/// Number of connections the shared bitreq client keeps around
const CONNECTION_CAPACITY: usize = 10;

/// Transport backed by a shared `bitreq::Client`
#[derive(Clone)]
pub struct BitreqTransport {
    client: Arc<bitreq::Client>,
}

impl std::fmt::Debug for BitreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitreqTransport").finish_non_exhaustive()
    }
}

impl Default for BitreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl BitreqTransport {
    /// Create a transport with default settings
    pub fn new() -> Self {
        Self {
            client: Arc::new(bitreq::Client::new(CONNECTION_CAPACITY)),
        }
    }
}

#[async_trait::async_trait]
impl Transport for BitreqTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = request.url.to_string();
        let inner = match &request.method {
            Method::Get => bitreq::get(url),
            Method::Post => bitreq::post(url),
            Method::Put => bitreq::put(url),
            Method::Delete => bitreq::delete(url),
            Method::Patch => bitreq::patch(url),
            Method::Head => bitreq::head(url),
            Method::Custom(method) => {
                bitreq::Request::new(bitreq::Method::Custom(method.clone()), url)
            }
        };

        let inner = request
            .headers
            .iter()
            .fold(inner, |req, (key, value)| req.with_header(key.as_str(), value.as_str()))
            .with_body(request.body);

        let response = inner
            .send_async_with_client(&self.client)
            .await
            .map_err(TransportError::from)?;

        let status = u16::try_from(response.status_code).map_err(|_| {
            TransportError::Other(format!("invalid status code: {}", response.status_code))
        })?;
        let headers = response
            .headers
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(TransportResponse::from_bytes(
            status,
            headers,
            response.into_bytes(),
        ))
    }
}
