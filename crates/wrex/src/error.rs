//! HTTP error types

use thiserror::Error;

use crate::response::RawResponse;

/// Broad failure category of an [`HttpError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request could not be encoded; nothing was sent
    Serialization,
    /// The exchange failed before a usable status code was obtained
    Transport,
    /// A response arrived but its status was rejected by the validator
    Status,
    /// A response arrived but its body could not be decoded
    Decode,
}

/// Failures raised by a [`Transport`](crate::Transport) or while reading a body
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Connection error (DNS, refused, reset)
    #[error("Connection error: {0}")]
    Connection(String),
    /// Deadline of the request context elapsed
    #[error("Request timeout")]
    Timeout,
    /// Request context was cancelled
    #[error("Request cancelled")]
    Cancelled,
    /// Response body could not be read
    #[error("Body read error: {0}")]
    Body(String),
    /// Other transport error
    #[error("{0}")]
    Other(String),
}

/// HTTP errors that can occur during requests
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request body or query could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Target URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// Network level failure
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Response status failed validation
    #[error("Invalid status code: {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Fully read response, kept for diagnostics
        response: Box<RawResponse>,
    },
    /// Response body could not be decoded into the destination type
    #[error("Decode error: {source}")]
    Decode {
        /// Underlying JSON error
        source: serde_json::Error,
        /// Fully read response
        response: Box<RawResponse>,
    },
}

impl HttpError {
    /// Failure category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            HttpError::Serialization(_) | HttpError::InvalidUrl(_) => ErrorKind::Serialization,
            HttpError::Transport(_) => ErrorKind::Transport,
            HttpError::Status { .. } => ErrorKind::Status,
            HttpError::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// Response received before the failure, if any
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            HttpError::Status { response, .. } | HttpError::Decode { response, .. } => {
                Some(response)
            }
            _ => None,
        }
    }

    /// Take the response out of the error, if any
    pub fn into_response(self) -> Option<RawResponse> {
        match self {
            HttpError::Status { response, .. } | HttpError::Decode { response, .. } => {
                Some(*response)
            }
            _ => None,
        }
    }

    /// Status code of the response, `0` when none was received
    pub fn status(&self) -> u16 {
        self.response().map(RawResponse::status_code).unwrap_or(0)
    }

    /// Whether the request was abandoned because its context was cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, HttpError::Transport(TransportError::Cancelled))
    }

    /// Whether the request hit its deadline
    pub fn is_timeout(&self) -> bool {
        matches!(self, HttpError::Transport(TransportError::Timeout))
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

#[cfg(feature = "bitreq")]
impl From<bitreq::Error> for TransportError {
    fn from(err: bitreq::Error) -> Self {
        use std::io;

        use bitreq::Error;

        match err {
            Error::IoError(io_err) => {
                if io_err.kind() == io::ErrorKind::TimedOut {
                    TransportError::Timeout
                } else if io_err.kind() == io::ErrorKind::ConnectionRefused
                    || io_err.kind() == io::ErrorKind::ConnectionReset
                    || io_err.kind() == io::ErrorKind::ConnectionAborted
                    || io_err.kind() == io::ErrorKind::NotConnected
                {
                    TransportError::Connection(io_err.to_string())
                } else {
                    TransportError::Other(io_err.to_string())
                }
            }
            Error::AddressNotFound => TransportError::Connection(err.to_string()),
            _ => TransportError::Other(err.to_string()),
        }
    }
}
