//! Typed VideoQ endpoints.
//!
//! Each submodule adds methods to [`crate::ApiClient`]; all of them go through
//! [`crate::ApiClient::request`] and therefore share its refresh handling.

pub mod auth;
pub mod chat;
pub mod videos;

pub const LOGIN_PATH: &str = "/auth/login/";
pub const SIGNUP_PATH: &str = "/auth/signup/";
pub const ME_PATH: &str = "/auth/me/";
pub const VIDEOS_PATH: &str = "/videos/";
pub const CHAT_PATH: &str = "/chat/";
pub const CHAT_HISTORY_PATH: &str = "/chat/history/";
