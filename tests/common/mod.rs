//! Mock VideoQ backend shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::sync::{Arc, Mutex};
use videoq_client::{
    ApiClient, ApiClientBuilder, CredentialPair, CredentialStore, LoginRedirect,
    MemoryTokenStorage, SessionObserver, TokenStorage,
};

pub const REFRESH_PATH: &str = "/api/auth/refresh/";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Records every login redirect it receives.
#[derive(Default)]
pub struct RecordingObserver {
    redirects: Mutex<Vec<LoginRedirect>>,
}

impl RecordingObserver {
    pub fn redirects(&self) -> Vec<LoginRedirect> {
        self.redirects.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionObserver for RecordingObserver {
    async fn session_expired(&self, redirect: &LoginRedirect) {
        self.redirects.lock().unwrap().push(redirect.clone());
    }
}

/// Mock server plus a client pointed at `<server>/api`.
pub struct Fixture {
    pub server: ServerGuard,
    pub client: ApiClient,
    pub store: CredentialStore,
    pub observer: Arc<RecordingObserver>,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::custom(Arc::new(MemoryTokenStorage::new()), |builder| builder).await
    }

    /// Fixture over `storage`, with `configure` applied after the defaults.
    pub async fn custom(
        storage: Arc<dyn TokenStorage>,
        configure: impl FnOnce(ApiClientBuilder) -> ApiClientBuilder,
    ) -> Self {
        init_tracing();
        let server = Server::new_async().await;
        let store = CredentialStore::new(storage);
        let observer = Arc::new(RecordingObserver::default());
        let builder = ApiClient::builder()
            .base_url(format!("{}/api", server.url()))
            .refresh_path("/auth/refresh/")
            .login_path("/login")
            .credential_store(store.clone())
            .session_observer(observer.clone());
        let client = configure(builder).build().expect("client builds");
        Self {
            server,
            client,
            store,
            observer,
        }
    }

    /// Fixture whose store already holds `access` / `refresh`.
    pub async fn logged_in(access: &str, refresh: &str) -> Self {
        let fixture = Self::new().await;
        fixture.seed(access, refresh).await;
        fixture
    }

    pub async fn seed(&self, access: &str, refresh: &str) {
        self.store
            .save(&CredentialPair::new(access, refresh))
            .await
            .expect("seed credentials");
    }

    /// Endpoint answering `status`/`body` to requests bearing `token`.
    pub async fn mock_with_token(
        &mut self,
        method: &str,
        path: &str,
        token: &str,
        status: usize,
        body: &str,
    ) -> Mock {
        self.server
            .mock(method, path)
            .match_header("authorization", format!("Bearer {}", token).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Refresh endpoint accepting `refresh` and answering `status`/`body`.
    pub async fn mock_refresh(&mut self, refresh: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", REFRESH_PATH)
            .match_header("authorization", Matcher::Missing)
            .match_body(Matcher::Json(serde_json::json!({ "refresh": refresh })))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}
