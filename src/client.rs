//! Authenticated request client for the VideoQ API.
//!
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
mod error_message;
mod execution;
mod refresh;
pub mod request;

pub use builder::ApiClientBuilder;
pub use core::ApiClient;
pub use request::{ApiRequest, Attempt, FormPart, MultipartForm, RequestBody};
