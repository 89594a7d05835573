//! Error types for ksi-client

use thiserror::Error;

/// Errors that can occur talking to remote services
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure (connection, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-success HTTP status
    #[error("API error: {0}")]
    Api(String),

    /// Malformed response body
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Protocol-level failure reported by the service
    #[error("{}", service_message(.status, .message))]
    Service { status: u64, message: Option<String> },

    /// A required service is not configured
    #[error("{0} not configured")]
    NotConfigured(&'static str),

    /// Configuration could not be read
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Publications file error
    #[error(transparent)]
    Publications(#[from] ksi_publications::Error),
}

fn service_message(status: &u64, message: &Option<String>) -> String {
    match message {
        Some(message) => format!("service returned error 0x{:x}: {}", status, message),
        None => format!("service returned error 0x{:x}", status),
    }
}

/// Result type for service operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display() {
        let with_message = Error::Service {
            status: 0x101,
            message: Some("time not found".into()),
        };
        assert_eq!(
            with_message.to_string(),
            "service returned error 0x101: time not found"
        );
        let bare = Error::Service {
            status: 1,
            message: None,
        };
        assert_eq!(bare.to_string(), "service returned error 0x1");
    }
}
