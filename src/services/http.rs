// ============================================================================
// HTTP TRANSPORT - Seam between the data layer and the browser fetch API
// ============================================================================
// Everything above this trait is plain Rust and runs on the host in tests.
// On wasm32 the gloo-net transport performs the real request.
// ============================================================================

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::error::ApiError;
use crate::models::UploadFile;

/// Boxed non-Send future (single-threaded browser event loop)
pub type LocalFuture<T> = Pin<Box<dyn Future<Output = T>>>;

/// Query string parameters, in insertion order
pub type QueryParams = Vec<(String, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    /// Single file sent as the `file` part of a multipart form
    Multipart(UploadFile),
}

impl RequestBody {
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, ApiError> {
        serde_json::to_value(value)
            .map(RequestBody::Json)
            .map_err(|e| ApiError::Serialization(e.to_string()))
    }
}

/// One request against `base_url + path`. Credentials (cookies) are always included.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: QueryParams,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Option<RequestBody>) -> Self {
        self.body = body;
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs HTTP requests. Implementations must not interpret the status code.
pub trait HttpTransport {
    fn send(&self, request: HttpRequest) -> LocalFuture<Result<HttpResponse, ApiError>>;
}

#[cfg(target_arch = "wasm32")]
pub use gloo::GlooTransport;

#[cfg(target_arch = "wasm32")]
mod gloo {
    use gloo_net::http::Request;
    use wasm_bindgen::JsValue;
    use web_sys::{Blob, BlobPropertyBag, FormData, RequestCredentials};

    use super::*;

    /// Browser transport built on gloo-net (`fetch` with `credentials: include`)
    #[derive(Clone)]
    pub struct GlooTransport {
        base_url: String,
    }

    impl GlooTransport {
        pub fn new(base_url: &str) -> Self {
            Self {
                base_url: base_url.trim_end_matches('/').to_string(),
            }
        }
    }

    impl HttpTransport for GlooTransport {
        fn send(&self, request: HttpRequest) -> LocalFuture<Result<HttpResponse, ApiError>> {
            let url = format!("{}{}", self.base_url, request.path);
            Box::pin(async move {
                let builder = match request.method {
                    Method::Get => Request::get(&url),
                    Method::Post => Request::post(&url),
                }
                .credentials(RequestCredentials::Include);

                let builder = if request.query.is_empty() {
                    builder
                } else {
                    builder.query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                };

                let prepared = match &request.body {
                    None => builder.build(),
                    Some(RequestBody::Json(value)) => builder.json(value),
                    Some(RequestBody::Multipart(file)) => builder.body(form_data(file)?),
                }
                .map_err(|e| ApiError::Serialization(e.to_string()))?;

                let response = prepared
                    .send()
                    .await
                    .map_err(|e| ApiError::Network(e.to_string()))?;
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .map_err(|e| ApiError::Network(e.to_string()))?;

                Ok(HttpResponse { status, body })
            })
        }
    }

    fn form_data(file: &UploadFile) -> Result<FormData, ApiError> {
        let to_err = |e: JsValue| ApiError::Serialization(format!("{:?}", e));

        let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&file.mime_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(to_err)?;

        let form = FormData::new().map_err(to_err)?;
        form.append_with_blob_and_filename("file", &blob, &file.file_name)
            .map_err(to_err)?;
        Ok(form)
    }
}
