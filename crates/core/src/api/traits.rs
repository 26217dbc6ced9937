use async_trait::async_trait;
use serde_json::Value;

use crate::errors::CoreError;

use super::request::ApiRequest;

/// Trait abstraction over the wire to the budget backend.
///
/// [`HttpTransport`](super::http::HttpTransport) is the production
/// implementation; tests plug in in-memory fakes. Typed endpoint calls
/// live in [`BudgetClient`](super::client::BudgetClient), so an
/// implementation only has to move JSON.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ApiTransport: Send + Sync {
    /// Human-readable name of this transport (for logs/errors).
    fn name(&self) -> &str;

    /// Send one request, attaching `Authorization: Bearer {token}` when a
    /// token is given.
    ///
    /// Returns the response body as JSON: `Value::Null` for an empty body
    /// and `Value::String` for a non-JSON text body. Non-2xx responses are
    /// errors (`Unauthorized` for 401/403, `Api` otherwise).
    async fn send(&self, request: &ApiRequest, token: Option<&str>) -> Result<Value, CoreError>;
}
