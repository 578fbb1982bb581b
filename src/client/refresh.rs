//! Access token refresh.
//!
//! Refreshes are serialized behind an async mutex. A caller that was rejected
//! with a token someone else has already replaced reuses the new token instead
//! of spending the refresh token again, so a burst of concurrent 401s costs a
//! single refresh call.
//!
//! A failed refresh clears the stored credentials before the gate is released,
//! and the rejected token is remembered, so callers queued behind a failure
//! fail too instead of spending the refresh token again.

use super::error_message::server_message;
use super::request::ApiRequest;
use crate::credentials::CredentialStore;
use crate::transport::HttpTransport;
use crate::{Error, Result};
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

pub(crate) struct TokenRefresher {
    transport: Arc<HttpTransport>,
    credentials: CredentialStore,
    refresh_path: String,
    /// Holds the access token whose refresh last failed.
    gate: Mutex<Option<String>>,
    completed: AtomicU64,
}

impl TokenRefresher {
    pub(crate) fn new(
        transport: Arc<HttpTransport>,
        credentials: CredentialStore,
        refresh_path: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            credentials,
            refresh_path: refresh_path.into(),
            gate: Mutex::new(None),
            completed: AtomicU64::new(0),
        }
    }

    /// Number of successful calls to the refresh endpoint.
    pub(crate) fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    /// Makes sure the stored access token is newer than `rejected`.
    ///
    /// On failure both tokens are already cleared when this returns.
    pub(crate) async fn refresh(&self, rejected: Option<&str>) -> Result<()> {
        let mut failed = self.gate.lock().await;

        let current = self.credentials.access_token().await?;
        if current.is_some() && current.as_deref() != rejected {
            debug!("access token already replaced by a concurrent refresh");
            return Ok(());
        }
        if rejected.is_some() && failed.as_deref() == rejected {
            return Err(Error::auth("token refresh already failed for this session"));
        }

        match self.exchange().await {
            Ok(()) => {
                *failed = None;
                Ok(())
            }
            Err(e) => {
                *failed = rejected.map(str::to_string);
                if let Err(clear_err) = self.credentials.clear().await {
                    warn!(error = %clear_err, "failed to clear credentials after refresh failure");
                }
                Err(e)
            }
        }
    }

    async fn exchange(&self) -> Result<()> {
        let refresh_token = self
            .credentials
            .refresh_token()
            .await?
            .ok_or_else(|| Error::auth("no refresh token stored"))?;

        let request = ApiRequest::post(self.refresh_path.as_str())
            .anonymous()
            .json_value(serde_json::json!({ "refresh": refresh_token }));
        let request_id = Uuid::new_v4().to_string();
        let response = self.transport.send(&request, None, &request_id).await?;

        if !response.status.is_success() {
            return Err(Error::auth(format!(
                "token refresh rejected: {}",
                server_message(response.status, &response.body)
            )));
        }

        let tokens: RefreshResponse = serde_json::from_slice(&response.body)?;
        self.credentials.set_access_token(&tokens.access).await?;
        if let Some(rotated) = tokens.refresh.as_deref() {
            self.credentials.set_refresh_token(rotated).await?;
        }
        self.completed.fetch_add(1, Ordering::Relaxed);

        info!(
            request_id = %request_id,
            rotated = tokens.refresh.is_some(),
            "access token refreshed"
        );
        Ok(())
    }
}
