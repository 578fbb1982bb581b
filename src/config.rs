//! Client configuration.
//!
//! Defaults target a local development backend. Every field can be overridden
//! through the environment (see [`ClientConfig::from_env`]) or the builder.

use crate::{Error, ErrorContext, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_REFRESH_PATH: &str = "/auth/refresh/";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root; endpoints are appended to it verbatim.
    pub base_url: String,
    /// Endpoint used to exchange a refresh token for a new access token.
    /// Either a path under `base_url` or an absolute http(s) URL.
    pub refresh_path: String,
    /// Where the application should send the user once the session is gone.
    pub login_path: String,
    pub timeout: Duration,
    pub proxy_url: Option<String>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            proxy_url: None,
            user_agent: format!("videoq-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with environment variables:
    ///
    /// - `VIDEOQ_API_URL`
    /// - `VIDEOQ_REFRESH_PATH`
    /// - `VIDEOQ_LOGIN_PATH`
    /// - `VIDEOQ_HTTP_TIMEOUT_SECS`
    /// - `VIDEOQ_PROXY_URL`
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(url) = env::var("VIDEOQ_API_URL") {
            cfg.base_url = url;
        }
        if let Ok(path) = env::var("VIDEOQ_REFRESH_PATH") {
            cfg.refresh_path = path;
        }
        if let Ok(path) = env::var("VIDEOQ_LOGIN_PATH") {
            cfg.login_path = path;
        }
        if let Some(secs) = env::var("VIDEOQ_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            cfg.timeout = Duration::from_secs(secs.max(1));
        }
        cfg.proxy_url = env::var("VIDEOQ_PROXY_URL").ok();
        cfg
    }

    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid base URL: {}", e),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(self.base_url.clone())
                    .with_source("config"),
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                format!("unsupported scheme '{}'", parsed.scheme()),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_source("config"),
            ));
        }
        if !self.refresh_path.starts_with('/') && !is_absolute(&self.refresh_path) {
            return Err(Error::configuration_with_context(
                "refresh path must start with '/' or be an absolute URL",
                ErrorContext::new()
                    .with_field_path("refresh_path")
                    .with_details(self.refresh_path.clone())
                    .with_source("config"),
            ));
        }
        if self.timeout.is_zero() {
            return Err(Error::configuration_with_context(
                "timeout must be non-zero",
                ErrorContext::new()
                    .with_field_path("timeout")
                    .with_source("config"),
            ));
        }
        Ok(())
    }

    /// Joins the base URL and an endpoint with exactly one `/` between them.
    /// Absolute http(s) endpoints are returned as given.
    pub fn url_for(&self, endpoint: &str) -> String {
        if is_absolute(endpoint) {
            return endpoint.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        if endpoint.is_empty() {
            base.to_string()
        } else if endpoint.starts_with('/') {
            format!("{}{}", base, endpoint)
        } else {
            format!("{}/{}", base, endpoint)
        }
    }
}

fn is_absolute(endpoint: &str) -> bool {
    endpoint.starts_with("http://") || endpoint.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_for_joins_with_single_slash() {
        let cfg = ClientConfig {
            base_url: "https://videoq.example/api/".into(),
            ..Default::default()
        };
        assert_eq!(cfg.url_for("/videos/"), "https://videoq.example/api/videos/");
        assert_eq!(cfg.url_for("videos/3/"), "https://videoq.example/api/videos/3/");
        assert_eq!(cfg.url_for(""), "https://videoq.example/api");
        assert_eq!(
            cfg.url_for("https://auth.videoq.example/refresh/"),
            "https://auth.videoq.example/refresh/"
        );
    }

    #[test]
    fn default_config_is_valid() {
        assert!(ClientConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_base_url() {
        let cfg = ClientConfig {
            base_url: "not a url".into(),
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("base_url")
        );

        let cfg = ClientConfig {
            base_url: "ftp://videoq.example/api".into(),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_relative_refresh_path() {
        let cfg = ClientConfig {
            refresh_path: "auth/refresh/".into(),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ClientConfig {
            refresh_path: "https://auth.videoq.example/refresh/".into(),
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }
}
