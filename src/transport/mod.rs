//! HTTP transport: one request descriptor in, one raw response out.
//!
//! Authentication policy lives in [`crate::client`]; this layer only attaches
//! whatever bearer token it is handed.

mod http;

pub use http::{HttpTransport, RawResponse, REQUEST_ID_HEADER};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
