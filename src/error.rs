use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for configuration and storage failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Configuration key or storage key involved (e.g., "base_url", "refresh_token")
    pub field_path: Option<String>,
    /// Additional detail about the failure (e.g., the rejected value)
    pub details: Option<String>,
    /// Component that raised the error (e.g., "config", "keyring")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for VideoQ API calls.
///
/// The three request-level categories are [`Error::Network`] (the exchange never
/// produced a response), [`Error::Http`] (a non-2xx, non-401 response) and
/// [`Error::Auth`] (a 401 that token refresh could not resolve).
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(#[from] TransportError),

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Authentication error: {message}")]
    Auth { message: String },

    #[error("Credential storage error: {message}{}", format_context(.context))]
    Storage {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn auth(msg: impl Into<String>) -> Self {
        Error::Auth {
            message: msg.into(),
        }
    }

    pub fn http(status: u16, msg: impl Into<String>) -> Self {
        Error::Http {
            status,
            message: msg.into(),
        }
    }

    pub fn storage_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Storage {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// True for 401s that survived the refresh-and-retry cycle.
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth { .. })
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::Auth { .. } => Some(401),
            _ => None,
        }
    }

    /// Human-readable message suitable for an error banner.
    pub fn user_message(&self) -> String {
        match self {
            Error::Http { message, .. } | Error::Auth { message } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Storage { context, .. } | Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_rendered_in_display() {
        let err = Error::configuration_with_context(
            "invalid base URL",
            ErrorContext::new()
                .with_field_path("base_url")
                .with_source("config"),
        );
        assert_eq!(
            err.to_string(),
            "Configuration error: invalid base URL (field: base_url, source: config)"
        );
        assert_eq!(err.context().unwrap().field_path.as_deref(), Some("base_url"));
    }

    #[test]
    fn empty_context_adds_nothing() {
        let err = Error::storage_with_context("keyring locked", ErrorContext::new());
        assert_eq!(err.to_string(), "Credential storage error: keyring locked");
    }

    #[test]
    fn status_and_user_message() {
        let err = Error::http(404, "Video not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.user_message(), "Video not found");
        assert!(!err.is_auth());

        let err = Error::auth("Session expired");
        assert!(err.is_auth());
        assert_eq!(err.status(), Some(401));
    }
}
