use super::refresh::TokenRefresher;
use crate::config::ClientConfig;
use crate::credentials::CredentialStore;
use crate::session::SessionObserver;
use crate::transport::HttpTransport;
use std::sync::Arc;

/// Client for the VideoQ API.
///
/// Cheap to clone; clones share the HTTP connection pool, the credential
/// store and the refresh coordination.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) config: Arc<ClientConfig>,
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) credentials: CredentialStore,
    pub(crate) observer: Arc<dyn SessionObserver>,
    pub(crate) refresher: Arc<TokenRefresher>,
}

impl ApiClient {
    pub fn builder() -> super::ApiClientBuilder {
        super::ApiClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Number of successful token refreshes performed by this client.
    pub fn refresh_count(&self) -> u64 {
        self.refresher.completed()
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("credentials", &self.credentials)
            .finish()
    }
}
