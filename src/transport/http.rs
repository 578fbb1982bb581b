use super::TransportError;
use crate::client::request::{ApiRequest, RequestBody};
use crate::config::ClientConfig;
use crate::{ErrorContext, Result};
use bytes::Bytes;
use reqwest::{Proxy, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Correlation header attached to every outgoing request.
pub const REQUEST_ID_HEADER: &str = "x-videoq-request-id";

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .pool_max_idle_per_host(8)
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                crate::Error::configuration_with_context(
                    format!("invalid proxy URL: {}", e),
                    ErrorContext::new()
                        .with_field_path("proxy_url")
                        .with_details(proxy_url.clone())
                        .with_source("config"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| crate::Error::Network(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub async fn send(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
        request_id: &str,
    ) -> Result<RawResponse> {
        let url = self.config.url_for(request.endpoint());
        let mut req = self
            .client
            .request(request.method().clone(), &url)
            .header(REQUEST_ID_HEADER, request_id);

        for (name, value) in request.headers() {
            // The stored token wins over a caller-supplied authorization header.
            if bearer.is_some() && name.eq_ignore_ascii_case("authorization") {
                continue;
            }
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }

        req = match request.body() {
            RequestBody::Empty => req,
            RequestBody::Json(value) => req.json(value),
            RequestBody::Multipart(form) => req.multipart(form.to_form()?),
        };

        let response = req
            .send()
            .await
            .map_err(|e| crate::Error::Network(TransportError::Http(e)))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| crate::Error::Network(TransportError::Http(e)))?;

        debug!(
            request_id,
            method = %request.method(),
            endpoint = request.endpoint(),
            status = status.as_u16(),
            "response received"
        );

        Ok(RawResponse { status, body })
    }
}
