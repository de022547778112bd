//! REST response error types

/// Errors that can occur while reading a REST list response.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// The body was not a valid list response.
    #[error("Response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API reported `success: false`.
    #[error("Request was not successful: {}", .message.as_deref().unwrap_or("no message"))]
    Unsuccessful {
        /// Message reported by the API, if any.
        message: Option<String>,
    },
}

impl ResponseError {
    /// Creates a new unsuccessful response error.
    pub fn unsuccessful(message: Option<String>) -> Self {
        Self::Unsuccessful { message }
    }
}
