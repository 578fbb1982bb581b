//! Resource types exchanged with the VideoQ API.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`auth`] | Users, login and signup payloads |
//! | [`video`] | Uploaded videos and their transcription status |
//! | [`chat`] | Questions over video groups and their answers |

pub mod auth;
pub mod chat;
pub mod video;

pub use auth::{LoginRequest, SignupRequest, User};
pub use chat::{ChatLog, ChatMessage, ChatRequest, ChatResponse, ChatRole, RelatedVideo};
pub use video::{Video, VideoStatus, VideoUpdate, VideoUpload};
