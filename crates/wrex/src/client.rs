//! HTTP client wrapper

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::instrument;
use url::Url;

use crate::context::Context;
use crate::error::HttpError;
use crate::request::{default_validate_status, Body, Method, Opts, StatusValidator};
use crate::response::{RawResponse, Response};
use crate::transport::{Transport, TransportRequest};

pub(crate) const CONTENT_TYPE: &str = "Content-Type";
pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP client bound to a base URL and default request options
///
/// The client holds no per-request state. Cloning is cheap and clones share the
/// same transport, so one client can serve many concurrent calls.
#[derive(Debug, Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    base_url: String,
    default_opts: Opts,
}

impl Client {
    /// Create a client on the default transport
    #[cfg(any(feature = "reqwest", feature = "bitreq"))]
    pub fn new(base_url: impl Into<String>, default_opts: Opts) -> Self {
        Self::with_transport(
            base_url,
            default_opts,
            Arc::new(crate::backends::DefaultTransport::default()),
        )
    }

    /// Create a client on a caller supplied transport
    pub fn with_transport(
        base_url: impl Into<String>,
        default_opts: Opts,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            default_opts,
        }
    }

    /// Create a new client builder
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Prefix prepended to every request path
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Options used for values a request does not set
    pub fn default_opts(&self) -> &Opts {
        &self.default_opts
    }

    /// GET request
    pub async fn get(&self, ctx: &Context, opts: Opts) -> Response<RawResponse> {
        self.request(ctx, Method::Get, opts).await
    }

    /// POST request
    pub async fn post(&self, ctx: &Context, opts: Opts) -> Response<RawResponse> {
        self.request(ctx, Method::Post, opts).await
    }

    /// PUT request
    pub async fn put(&self, ctx: &Context, opts: Opts) -> Response<RawResponse> {
        self.request(ctx, Method::Put, opts).await
    }

    /// DELETE request
    pub async fn delete(&self, ctx: &Context, opts: Opts) -> Response<RawResponse> {
        self.request(ctx, Method::Delete, opts).await
    }

    /// PATCH request
    pub async fn patch(&self, ctx: &Context, opts: Opts) -> Response<RawResponse> {
        self.request(ctx, Method::Patch, opts).await
    }

    /// Send a request with an arbitrary method
    ///
    /// The body is read in full before the status is checked. When the status
    /// validator rejects the response, the returned [`HttpError::Status`] still
    /// carries the whole response.
    #[instrument(skip_all, fields(method = %method, path = %opts.path))]
    pub async fn request(
        &self,
        ctx: &Context,
        method: Method,
        opts: Opts,
    ) -> Response<RawResponse> {
        let (request, validate) = self.prepare(method, opts)?;

        tracing::debug!(url = %request.url, "Sending request");
        let mut response = ctx.run(self.transport.send(request)).await?;
        let status = response.status;
        let data = ctx.run(response.read_body()).await?;
        let response = RawResponse::new(status, std::mem::take(&mut response.headers), data);

        if !validate(status) {
            tracing::debug!(status, "Response status rejected");
            return Err(HttpError::Status {
                status,
                response: Box::new(response),
            });
        }

        tracing::debug!(status, bytes = response.data().len(), "Request complete");
        Ok(response)
    }

    /// Encode `opts` into the request handed to the transport
    fn prepare(
        &self,
        method: Method,
        opts: Opts,
    ) -> Response<(TransportRequest, StatusValidator)> {
        if let Some(err) = opts.body_error() {
            return Err(HttpError::Serialization(err.to_string()));
        }

        let caller_params = !opts.params.is_empty();
        let mut opts = self.with_defaults(opts);

        let body = match std::mem::take(&mut opts.body) {
            Body::Empty => Vec::new(),
            Body::Form(pairs) => {
                let encoded = serde_urlencoded::to_string(&pairs)
                    .map_err(|e| HttpError::Serialization(e.to_string()))?;
                opts.force_header(CONTENT_TYPE, FORM_CONTENT_TYPE);
                encoded.into_bytes()
            }
            Body::Json(bytes) => bytes,
        };

        let url = self.url_for(&opts, caller_params)?;
        let validate = opts
            .validate_status
            .take()
            .unwrap_or_else(|| Arc::new(default_validate_status));

        let request = TransportRequest {
            method,
            url,
            headers: opts.headers.into_iter().collect(),
            body,
        };

        Ok((request, validate))
    }

    /// Fill headers, params and the validator the request leaves unset
    fn with_defaults(&self, mut opts: Opts) -> Opts {
        for (key, value) in &self.default_opts.headers {
            opts.default_header(key, value);
        }
        for (key, value) in &self.default_opts.params {
            opts.params
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        if opts.validate_status.is_none() {
            opts.validate_status = self.default_opts.validate_status.clone();
        }
        opts
    }

    /// Join base URL and path, then encode the query parameters
    ///
    /// A query in the path only conflicts with params the caller set. Client
    /// default params are appended to it, except for names it already has.
    fn url_for(&self, opts: &Opts, caller_params: bool) -> Response<Url> {
        let target = format!("{}{}", self.base_url, opts.path);
        let mut url =
            Url::parse(&target).map_err(|e| HttpError::InvalidUrl(format!("{}: {}", target, e)))?;

        if opts.params.is_empty() {
            return Ok(url);
        }
        if caller_params && url.query().is_some() {
            return Err(HttpError::Serialization(format!(
                "query string given in both path and params: {}",
                target
            )));
        }

        let present: BTreeSet<String> = url
            .query_pairs()
            .map(|(key, _)| key.into_owned())
            .collect();
        let missing: Vec<_> = opts
            .params
            .iter()
            .filter(|(key, _)| !present.contains(key.as_str()))
            .collect();
        if !missing.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in missing {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

/// Builder for [`Client`]
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: String,
    default_opts: Opts,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the default request options
    pub fn default_opts(mut self, opts: Opts) -> Self {
        self.default_opts = opts;
        self
    }

    /// Add a header sent with every request
    pub fn default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_opts = self.default_opts.header(key, value);
        self
    }

    /// Set the transport
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client, falling back to the default transport
    pub fn build(self) -> Response<Client> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => default_transport()?,
        };
        Ok(Client::with_transport(
            self.base_url,
            self.default_opts,
            transport,
        ))
    }
}

#[cfg(any(feature = "reqwest", feature = "bitreq"))]
fn default_transport() -> Response<Arc<dyn Transport>> {
    Ok(Arc::new(crate::backends::DefaultTransport::default()))
}

#[cfg(not(any(feature = "reqwest", feature = "bitreq")))]
fn default_transport() -> Response<Arc<dyn Transport>> {
    Err(crate::error::TransportError::Other("no transport configured".to_string()).into())
}
