// ============================================================================
// API ERROR - Transport, HTTP and decoding failures
// ============================================================================

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request never produced a response (offline, CORS, DNS...)
    #[error("Network Error: {0}")]
    Network(String),

    /// Non-2xx response. `message` is the body's `error` field when present.
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("no error message"))]
    Http { status: u16, message: Option<String> },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Normalized, human-readable message stored in `ResourceState::error`.
    ///
    /// Server-provided `error` wins; otherwise a transport-level message is used.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message: Some(message), .. } if !message.trim().is_empty() => {
                message.clone()
            }
            ApiError::Http { status, .. } => format!("Request failed with status code {}", status),
            ApiError::Network(_) => "Network Error".to_string(),
            ApiError::Parse(detail) => format!("Malformed server response: {}", detail),
            ApiError::Serialization(detail) => format!("Could not encode request: {}", detail),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_field_wins() {
        let err = ApiError::Http {
            status: 409,
            message: Some("Course already exists".to_string()),
        };
        assert_eq!(err.user_message(), "Course already exists");
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn falls_back_to_transport_message() {
        let blank = ApiError::Http { status: 500, message: Some("  ".to_string()) };
        assert_eq!(blank.user_message(), "Request failed with status code 500");

        let offline = ApiError::Network("TypeError: Failed to fetch".to_string());
        assert_eq!(offline.user_message(), "Network Error");
        assert!(offline.is_transport());
    }
}
