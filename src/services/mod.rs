pub mod api_client;
pub mod endpoints;
pub mod http;

pub use api_client::ApiClient;
pub use endpoints::Endpoint;
pub use http::{HttpRequest, HttpResponse, HttpTransport, LocalFuture, Method, QueryParams, RequestBody};

#[cfg(target_arch = "wasm32")]
pub use http::GlooTransport;
