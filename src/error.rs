use std::fmt;

/// Failure reported by a [`RestaurantApi`](crate::RestaurantApi) call.
///
/// Every variant collapses into [`LoadStatus::Failed`](crate::LoadStatus::Failed)
/// at the catalog boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport failed: connection refused, timeout, TLS, non-2xx status.
    Network(String),
    /// The response body could not be decoded.
    Decoding(String),
    /// The requested resource does not exist.
    NotFound(String),
    /// The service answered but refused the request.
    Rejected { code: i64, message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(message) => write!(f, "network error: {}", message),
            ApiError::Decoding(message) => write!(f, "decoding error: {}", message),
            ApiError::NotFound(what) => write!(f, "not found: {}", what),
            ApiError::Rejected { code, message } => {
                write!(f, "request rejected ({}): {}", code, message)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decoding(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decoding(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
