//! reqwest-based Transport implementation

use futures::stream::{self, StreamExt};

use crate::error::{HttpError, TransportError};
use crate::response::Response;
use crate::transport::{Transport, TransportRequest, TransportResponse};

/// Transport backed by a shared `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport builder
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// Create a transport from an existing reqwest::Client
    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|e| TransportError::Other(e.to_string()))?;

        let mut builder = self.inner.request(method, request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(key, value)| {
                (
                    key.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = stream::try_unfold(response, |mut response| async move {
            match response.chunk().await {
                Ok(Some(chunk)) => Ok(Some((chunk.to_vec(), response))),
                Ok(None) => Ok(None),
                Err(e) => Err(TransportError::from(e)),
            }
        })
        .boxed();

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

/// Builder for [`ReqwestTransport`] with proxy settings
#[derive(Debug, Default)]
pub struct ReqwestTransportBuilder {
    proxy: Option<ProxyConfig>,
}

#[derive(Debug)]
struct ProxyConfig {
    url: url::Url,
    matcher: Option<regex::Regex>,
}

impl ReqwestTransportBuilder {
    /// Send every request through the proxy at `url`
    pub fn proxy(mut self, url: url::Url) -> Self {
        self.proxy = Some(ProxyConfig { url, matcher: None });
        self
    }

    /// Send requests whose host matches `pattern` through the proxy at `url`
    pub fn proxy_with_matcher(mut self, url: url::Url, pattern: &str) -> Response<Self> {
        let matcher = regex::Regex::new(pattern)
            .map_err(|e| TransportError::Other(format!("Invalid proxy pattern: {}", e)))?;
        self.proxy = Some(ProxyConfig {
            url,
            matcher: Some(matcher),
        });
        Ok(self)
    }

    /// Build the transport
    pub fn build(self) -> Response<ReqwestTransport> {
        let mut builder = reqwest::Client::builder();

        if let Some(proxy_config) = self.proxy {
            let proxy_url = proxy_config.url.to_string();
            let proxy = if let Some(matcher) = proxy_config.matcher {
                reqwest::Proxy::custom(move |url| {
                    if matcher.is_match(url.host_str().unwrap_or("")) {
                        Some(proxy_url.clone())
                    } else {
                        None
                    }
                })
            } else {
                reqwest::Proxy::all(&proxy_url)
                    .map_err(|e| TransportError::Other(format!("Invalid proxy: {}", e)))?
            };
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| HttpError::from(TransportError::from(e)))?;
        Ok(ReqwestTransport { inner: client })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_new() {
        let transport = ReqwestTransport::new();
        let _ = format!("{:?}", transport);
    }

    #[test]
    fn test_builder_build() {
        let result = ReqwestTransportBuilder::default().build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_from_reqwest() {
        let transport = ReqwestTransport::from_reqwest(reqwest::Client::new());
        let _ = format!("{:?}", transport);
    }

    #[test]
    fn test_builder_proxy() {
        let proxy_url = url::Url::parse("http://localhost:8080").expect("Valid proxy URL");
        let result = ReqwestTransport::builder().proxy(proxy_url).build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_builder_proxy_with_valid_matcher() {
        let proxy_url = url::Url::parse("http://localhost:8080").expect("Valid proxy URL");
        let builder = ReqwestTransport::builder()
            .proxy_with_matcher(proxy_url, r".*\.example\.com$")
            .expect("Valid matcher should succeed");
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_builder_proxy_with_invalid_matcher() {
        let proxy_url = url::Url::parse("http://localhost:8080").expect("Valid proxy URL");
        let result = ReqwestTransport::builder().proxy_with_matcher(proxy_url, r"[invalid");

        match result {
            Err(HttpError::Transport(TransportError::Other(msg))) => {
                assert!(msg.contains("Invalid proxy pattern"));
            }
            _ => panic!("Expected a transport error"),
        }
    }
}
