//! Request execution with bearer authentication and one-shot token refresh.

use super::core::ApiClient;
use super::error_message::server_message;
use super::request::{ApiRequest, Attempt};
use crate::session::LoginRedirect;
use crate::transport::RawResponse;
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

impl ApiClient {
    /// Executes `request` and deserializes the JSON response into `T`.
    pub async fn request<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let value = self.request_json(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Executes `request` and returns the JSON response.
    ///
    /// A 401 triggers one token refresh followed by one re-issue of the same
    /// request. If the refresh fails or the re-issued request is rejected too,
    /// stored credentials are cleared, the session observer receives a login
    /// redirect, and [`Error::Auth`] is returned. Other failures surface as
    /// [`Error::Http`] or [`Error::Network`] without touching credentials.
    pub async fn request_json(&self, request: ApiRequest) -> Result<serde_json::Value> {
        let request_id = Uuid::new_v4().to_string();
        let mut attempt = Attempt::Fresh;

        loop {
            let bearer = if request.is_authenticated() {
                self.credentials.access_token().await?
            } else {
                None
            };

            debug!(
                request_id = %request_id,
                method = %request.method(),
                endpoint = request.endpoint(),
                attempt = attempt.as_str(),
                has_token = bearer.is_some(),
                "sending request"
            );

            let response = self
                .transport
                .send(&request, bearer.as_deref(), &request_id)
                .await?;

            if !response.is_unauthorized() {
                return parse_response(response);
            }

            if !request.is_authenticated() {
                return Err(Error::auth(server_message(response.status, &response.body)));
            }

            match attempt.next() {
                Some(next) => {
                    if let Err(e) = self.refresher.refresh(bearer.as_deref()).await {
                        return Err(self
                            .expire_session(format!("token refresh failed: {}", e))
                            .await);
                    }
                    attempt = next;
                }
                None => {
                    return Err(self
                        .expire_session("request rejected after token refresh")
                        .await);
                }
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request(ApiRequest::get(endpoint)).await
    }

    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(ApiRequest::post(endpoint).json(body)?).await
    }

    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(ApiRequest::put(endpoint).json(body)?).await
    }

    pub async fn patch<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(ApiRequest::patch(endpoint).json(body)?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request(ApiRequest::delete(endpoint)).await
    }

    /// Refreshes the access token now, independent of any rejected request.
    pub async fn refresh_session(&self) -> Result<()> {
        let current = self.credentials.access_token().await?;
        self.refresher.refresh(current.as_deref()).await
    }

    async fn expire_session(&self, reason: impl Into<String>) -> Error {
        let reason = reason.into();
        warn!(reason = %reason, "session expired, redirecting to login");

        if let Err(e) = self.credentials.clear().await {
            warn!(error = %e, "failed to clear stored credentials");
        }

        let redirect = LoginRedirect {
            login_path: self.config.login_path.clone(),
            reason: reason.clone(),
        };
        self.observer.session_expired(&redirect).await;

        Error::auth(reason)
    }
}

fn parse_response(response: RawResponse) -> Result<serde_json::Value> {
    if !response.status.is_success() {
        return Err(Error::http(
            response.status.as_u16(),
            server_message(response.status, &response.body),
        ));
    }
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::Value::Null);
    }
    Ok(serde_json::from_slice(&response.body)?)
}
