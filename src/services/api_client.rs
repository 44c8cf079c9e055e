// ============================================================================
// API CLIENT - HTTP only, no state
// ============================================================================
// Sends a request through the injected transport and turns the raw response
// into a typed payload or an `ApiError`.
// ============================================================================

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::http::{HttpRequest, HttpResponse, HttpTransport, LocalFuture};
use crate::error::ApiError;

#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn HttpTransport>,
}

impl ApiClient {
    pub fn new(transport: Rc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Sends `request` and decodes the JSON body as `T`
    pub fn request<T>(&self, request: HttpRequest) -> LocalFuture<Result<T, ApiError>>
    where
        T: DeserializeOwned + 'static,
    {
        let method = request.method;
        let path = request.path.clone();
        log::info!("📡 [API] {} {} {:?}", method, path, request.query);

        let pending = self.transport.send(request);
        Box::pin(async move {
            let result = pending.await.and_then(decode::<T>);
            match &result {
                Ok(_) => log::info!("✅ [API] {} {} ok", method, path),
                Err(e) => log::error!("❌ [API] {} {} failed: {}", method, path, e),
            }
            result
        })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<serde_json::Value>,
}

/// Status check + JSON decoding. Non-2xx bodies are searched for an `error` field.
pub fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(ApiError::Http {
            status: response.status,
            message: error_message(&response.body),
        });
    }

    // Empty 2xx bodies decode as JSON null
    let body = if response.body.trim().is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    serde_json::from_str(body).map_err(ApiError::from)
}

fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.error? {
        serde_json::Value::String(message) => Some(message),
        serde_json::Value::Null => None,
        serde_json::Value::Object(map) => map
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string),
        other => Some(other.to_string()),
    }
}
