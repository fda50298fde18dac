//! Client configuration

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::request::Opts;
use crate::response::Response;

/// Settings for building a [`Client`]
///
/// ```toml
/// base_url = "https://api.example.com"
/// proxy = "http://localhost:8080"
///
/// [headers]
/// user-agent = "wrex"
///
/// [params]
/// api_key = "secret"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Prefix prepended to every request path
    #[serde(default)]
    pub base_url: String,
    /// Headers sent with every request unless overridden
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Query parameters sent with every request unless overridden
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    /// Proxy URL for all requests
    #[serde(default)]
    pub proxy: Option<String>,
}

impl ClientConfig {
    /// Load the configuration from a file; the format follows the extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()
    }

    /// Load the configuration from a TOML string
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Default request options described by this configuration
    pub fn default_opts(&self) -> Opts {
        Opts::default()
            .headers(self.headers.clone())
            .params(self.params.clone())
    }

    /// Build a client on the default transport
    pub fn build(&self) -> Response<Client> {
        let builder = Client::builder()
            .base_url(self.base_url.clone())
            .default_opts(self.default_opts());

        match &self.proxy {
            Some(proxy) => builder.transport(proxy_transport(proxy)?).build(),
            None => builder.build(),
        }
    }
}

#[cfg(feature = "reqwest")]
fn proxy_transport(proxy: &str) -> Response<Arc<dyn crate::transport::Transport>> {
    let url = url::Url::parse(proxy)
        .map_err(|e| crate::error::HttpError::InvalidUrl(format!("{}: {}", proxy, e)))?;
    let transport = crate::backends::ReqwestTransport::builder()
        .proxy(url)
        .build()?;
    Ok(Arc::new(transport))
}

#[cfg(not(feature = "reqwest"))]
fn proxy_transport(proxy: &str) -> Response<Arc<dyn crate::transport::Transport>> {
    Err(crate::error::TransportError::Other(format!(
        "proxy {} requires the reqwest backend",
        proxy
    ))
    .into())
}
