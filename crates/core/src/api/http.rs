use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::settings::Settings;

use super::request::{ApiRequest, HttpMethod};
use super::traits::ApiTransport;

/// REST transport for the budget backend.
///
/// - **Base URL**: `Settings::api_base_url` (default `http://localhost:8083/api`)
/// - **Auth**: `Authorization: Bearer {token}` on every call that has one
/// - **Bodies**: JSON in, JSON (or plain text) out
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(settings: &Settings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: settings.base_url().to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Human-readable message from an error body.
///
/// The backend answers errors either with plain text or with a JSON object
/// carrying a `message` field.
pub fn error_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        match value {
            Value::String(s) if !s.trim().is_empty() => return s,
            Value::Object(map) => {
                for key in ["message", "error"] {
                    if let Some(Value::String(s)) = map.get(key) {
                        if !s.trim().is_empty() {
                            return s.clone();
                        }
                    }
                }
            }
            _ => {}
        }
    }
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Request failed")
        .to_string()
}

/// Interpret a successful response body.
pub fn parse_body(body: &str) -> Value {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string()))
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ApiTransport for HttpTransport {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn send(&self, request: &ApiRequest, token: Option<&str>) -> Result<Value, CoreError> {
        let url = self.url_for(&request.path);
        debug!(method = %request.method, path = %request.path, "sending request");

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(path = %request.path, status = status.as_u16(), "request rejected");
            return Err(CoreError::Unauthorized(error_message(status.as_u16(), &body)));
        }
        if !status.is_success() {
            warn!(path = %request.path, status = status.as_u16(), "request failed");
            return Err(CoreError::Api {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &body),
            });
        }

        Ok(parse_body(&body))
    }
}
