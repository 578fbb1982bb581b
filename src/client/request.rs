//! Request descriptors.
//!
//! An [`ApiRequest`] is a plain value, so the client can issue it a second
//! time after refreshing the access token. Multipart bodies are therefore kept
//! as an owned [`MultipartForm`] and turned into a `reqwest` form per attempt.

use crate::{Error, ErrorContext, Result};
use bytes::Bytes;
use reqwest::Method;
use serde::Serialize;

/// Position of a logical request in the refresh-and-retry cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// First issue of the request.
    Fresh,
    /// Re-issued after a token refresh; another 401 ends the session.
    RetriedOnce,
}

impl Attempt {
    /// The attempt that follows this one, if any remains.
    pub fn next(self) -> Option<Attempt> {
        match self {
            Attempt::Fresh => Some(Attempt::RetriedOnce),
            Attempt::RetriedOnce => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Attempt::Fresh => "fresh",
            Attempt::RetriedOnce => "retried_once",
        }
    }
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

#[derive(Debug, Clone)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: Option<String>,
        data: Bytes,
    },
}

/// Owned `multipart/form-data` body.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            mime: None,
            data: data.into(),
        });
        self
    }

    pub fn file_with_mime(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            mime: Some(mime.into()),
            data: data.into(),
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub(crate) fn to_form(&self) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in &self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
                FormPart::File {
                    name,
                    file_name,
                    mime,
                    data,
                } => {
                    let mut p = reqwest::multipart::Part::bytes(data.to_vec())
                        .file_name(file_name.clone());
                    if let Some(mime) = mime {
                        p = p.mime_str(mime).map_err(|e| {
                            Error::configuration_with_context(
                                format!("invalid mime type: {}", e),
                                ErrorContext::new()
                                    .with_field_path(name.clone())
                                    .with_details(mime.clone())
                                    .with_source("multipart"),
                            )
                        })?;
                    }
                    form.part(name.clone(), p)
                }
            };
        }
        Ok(form)
    }
}

/// Endpoint, method, headers and body of one logical API call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    endpoint: String,
    method: Method,
    headers: Vec<(String, String)>,
    body: RequestBody,
    authenticated: bool,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            headers: Vec::new(),
            body: RequestBody::Empty,
            authenticated: true,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    pub fn patch(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PATCH, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json_value(mut self, value: serde_json::Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    /// Serializes `body` as the JSON payload.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self> {
        Ok(self.json_value(serde_json::to_value(body)?))
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// Sends without a bearer token and without refresh handling.
    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attempt_allows_exactly_one_retry() {
        assert_eq!(Attempt::Fresh.next(), Some(Attempt::RetriedOnce));
        assert_eq!(Attempt::RetriedOnce.next(), None);
    }

    #[test]
    fn builder_collects_parts() {
        let req = ApiRequest::post("/videos/")
            .header("x-trace", "1")
            .json(&json!({"title": "Lecture"}))
            .unwrap();
        assert_eq!(req.method(), &Method::POST);
        assert_eq!(req.endpoint(), "/videos/");
        assert_eq!(req.headers(), &[("x-trace".to_string(), "1".to_string())]);
        assert!(req.is_authenticated());
        match req.body() {
            RequestBody::Json(v) => assert_eq!(v["title"], "Lecture"),
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[test]
    fn multipart_survives_clone_for_retry() {
        let form = MultipartForm::new()
            .text("title", "Lecture 1")
            .file_with_mime("file", "lecture.mp4", "video/mp4", vec![1u8, 2, 3]);
        let req = ApiRequest::post("/videos/").multipart(form);
        let retry = req.clone();
        match retry.body() {
            RequestBody::Multipart(form) => {
                assert_eq!(form.parts().len(), 2);
                assert!(form.to_form().is_ok());
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[test]
    fn invalid_mime_is_a_configuration_error() {
        let form = MultipartForm::new().file_with_mime("file", "a.bin", "not a mime", vec![0u8]);
        match form.to_form() {
            Err(err) => assert!(matches!(err, Error::Configuration { .. })),
            Ok(_) => panic!("expected mime validation to fail"),
        }
    }
}
