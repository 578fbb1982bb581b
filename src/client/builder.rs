use super::core::ApiClient;
use super::refresh::TokenRefresher;
use crate::config::ClientConfig;
use crate::credentials::{CredentialStore, TokenStorage};
use crate::session::SessionObserver;
use crate::transport::HttpTransport;
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// Builder for [`ApiClient`].
///
/// Starts from [`ClientConfig::from_env`]; explicit setters win over the
/// environment.
pub struct ApiClientBuilder {
    config: ClientConfig,
    credentials: Option<CredentialStore>,
    observer: Arc<dyn SessionObserver>,
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::from_env(),
            credentials: None,
            observer: crate::session::noop_observer(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn refresh_path(mut self, path: impl Into<String>) -> Self {
        self.config.refresh_path = path.into();
        self
    }

    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.config.login_path = path.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.config.proxy_url = Some(proxy_url.into());
        self
    }

    /// Persist tokens in `storage`. Default is in-memory storage.
    pub fn token_storage(mut self, storage: Arc<dyn TokenStorage>) -> Self {
        self.credentials = Some(CredentialStore::new(storage));
        self
    }

    /// Share an existing credential store (e.g. with another client).
    pub fn credential_store(mut self, store: CredentialStore) -> Self {
        self.credentials = Some(store);
        self
    }

    /// Inject the observer notified on login redirects. Default is a no-op.
    pub fn session_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        self.config.validate()?;

        let transport = Arc::new(HttpTransport::new(&self.config)?);
        let credentials = self.credentials.unwrap_or_else(CredentialStore::in_memory);
        let refresher = Arc::new(TokenRefresher::new(
            transport.clone(),
            credentials.clone(),
            self.config.refresh_path.clone(),
        ));

        tracing::debug!(
            base_url = %self.config.base_url,
            storage = credentials.backend_name(),
            "api client ready"
        );

        Ok(ApiClient {
            config: Arc::new(self.config),
            transport,
            credentials,
            observer: self.observer,
            refresher,
        })
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
