//! Error types for the HTTP adapter

use thiserror::Error;

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur when talking to the chat server
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Build a `Status` error from a response, consuming its body as the
    /// message (truncated; server error bodies can be HTML pages).
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(200)
            .collect();
        ApiError::Status { status, message }
    }
}

impl From<ApiError> for ragchat_application::GatewayError {
    fn from(e: ApiError) -> Self {
        use ragchat_application::GatewayError;
        match e {
            ApiError::Transport(inner) => {
                if inner.is_connect() {
                    GatewayError::ConnectionError(inner.to_string())
                } else {
                    GatewayError::RequestFailed(inner.to_string())
                }
            }
            ApiError::Status { status, message } => GatewayError::Status { status, message },
            ApiError::Decode(msg) => GatewayError::DecodeError(msg),
            ApiError::InvalidBaseUrl(msg) => GatewayError::ConnectionError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_maps_to_gateway_status() {
        let err = ApiError::Status {
            status: 404,
            message: "not found".to_string(),
        };
        match ragchat_application::GatewayError::from(err) {
            ragchat_application::GatewayError::Status { status, .. } => assert_eq!(status, 404),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
