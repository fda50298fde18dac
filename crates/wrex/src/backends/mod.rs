//! HTTP transport backends

#[cfg(feature = "bitreq")]
pub mod bitreq_backend;

#[cfg(feature = "reqwest")]
pub mod reqwest_backend;

#[cfg(feature = "bitreq")]
pub use bitreq_backend::BitreqTransport;
#[cfg(feature = "reqwest")]
pub use reqwest_backend::{ReqwestTransport, ReqwestTransportBuilder};

/// Transport used by [`Client::new`](crate::Client::new) and the default client
#[cfg(feature = "reqwest")]
pub type DefaultTransport = ReqwestTransport;

/// Transport used by [`Client::new`](crate::Client::new) and the default client
#[cfg(all(feature = "bitreq", not(feature = "reqwest")))]
pub type DefaultTransport = BitreqTransport;
