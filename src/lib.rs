//! # videoq-client
//!
//! Async client for the VideoQ API (video transcription and chat over
//! uploaded videos).
//!
//! ## Overview
//!
//! Every call goes to `<base_url><endpoint>` with `Authorization: Bearer
//! <access token>` when one is stored. A 401 response triggers exactly one
//! token refresh and one re-issue of the request. If that does not resolve it,
//! stored credentials are cleared and the injected [`SessionObserver`] is told
//! to send the user back to the login page.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use videoq_client::{ApiClient, ChatMessage, ChatRequest};
//!
//! #[tokio::main]
//! async fn main() -> videoq_client::Result<()> {
//!     let client = ApiClient::builder()
//!         .base_url("https://videoq.example/api")
//!         .build()?;
//!
//!     client.login("alice", "secret").await?;
//!     for video in client.list_videos().await? {
//!         println!("{} ({:?})", video.title, video.status);
//!     }
//!
//!     let answer = client
//!         .send_chat(&ChatRequest::new(vec![ChatMessage::user("What is covered?")]))
//!         .await?;
//!     println!("{}", answer.content);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Request client, builder, request descriptors |
//! | [`credentials`] | Token storage backends and the credential pair |
//! | [`session`] | Login redirect notifications |
//! | [`config`] | Base URL, endpoints and HTTP settings |
//! | [`transport`] | Raw HTTP exchange |
//! | [`api`] | Typed auth, video and chat endpoints |
//! | [`types`] | VideoQ resource types |

pub mod api;
pub mod client;
pub mod config;
pub mod credentials;
pub mod session;
pub mod transport;
pub mod types;

pub use client::{ApiClient, ApiClientBuilder, ApiRequest, Attempt, MultipartForm};
pub use config::ClientConfig;
pub use credentials::{
    CredentialPair, CredentialStore, KeyringTokenStorage, MemoryTokenStorage, TokenStorage,
};
pub use session::{LoginRedirect, NoopSessionObserver, SessionObserver};
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, SignupRequest, User, Video, VideoStatus,
    VideoUpdate, VideoUpload,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
