//! HTTP request/response layer with typed JSON decoding
//!
//! A [`Client`] binds a base URL and default [`Opts`] to a shared [`Transport`].
//! Each call takes a request descriptor, encodes its body (JSON or
//! form-urlencoded), sends it, reads the whole body into a [`RawResponse`] and
//! then checks the status. The `*_json` methods also decode the body into a
//! caller supplied value.
//!
//! The free functions ([`get`], [`post_json`], ...) use a process-wide client
//! with an empty base URL.
//!
//! # Example
//!
//! ```no_run
//! use serde::Deserialize;
//! use wrex::{Client, Context, Opts};
//!
//! #[derive(Default, Deserialize)]
//! struct Item {
//!     name: String,
//! }
//!
//! async fn example() -> wrex::Response<Item> {
//!     let client = Client::new("https://api.example.com", Opts::default());
//!     let mut item = Item::default();
//!     client
//!         .get_json(&Context::background(), Opts::new("/items/1"), Some(&mut item))
//!         .await?;
//!     Ok(item)
//! }
//! ```

mod backends;
mod client;
mod config;
mod context;
mod error;
#[cfg(any(feature = "reqwest", feature = "bitreq"))]
mod global;
mod json;
mod request;
mod response;
mod transport;

#[cfg(feature = "bitreq")]
pub use backends::BitreqTransport;
#[cfg(any(feature = "reqwest", feature = "bitreq"))]
pub use backends::DefaultTransport;
#[cfg(feature = "reqwest")]
pub use backends::{ReqwestTransport, ReqwestTransportBuilder};
pub use client::{Client, ClientBuilder};
pub use self::config::ClientConfig;
pub use context::Context;
pub use error::{ErrorKind, HttpError, TransportError};
#[cfg(any(feature = "reqwest", feature = "bitreq"))]
pub use global::{
    default_client, delete, delete_json, get, get_json, patch, patch_json, post, post_json, put,
    put_json, request, request_json,
};
pub use request::{default_validate_status, Body, Method, Opts, StatusValidator};
pub use response::{RawResponse, Resp, Response};
pub use tokio_util::sync::CancellationToken;
pub use transport::{BodyStream, Transport, TransportRequest, TransportResponse};
