//! Error types for the library layer.

use std::fmt;

use marketplace_api::ApiError;

use crate::store::StoreError;

/// Errors produced by the library layer, wrapping classified API errors
/// and adding store and input validation failures.
#[derive(Debug)]
pub enum MarketplaceError {
    /// A classified error from the API client.
    Api(ApiError),
    /// Reading or writing the key-value store failed.
    Store(StoreError),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl MarketplaceError {
    /// Message suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message(),
            Self::Store(e) => format!("Could not access local storage: {}", e),
            Self::InvalidInput(msg) => format!("Invalid input: {}", msg),
        }
    }
}

impl fmt::Display for MarketplaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Store(e) => write!(f, "Store error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for MarketplaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ApiError> for MarketplaceError {
    fn from(e: ApiError) -> Self {
        Self::Api(e)
    }
}

impl From<StoreError> for MarketplaceError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_classify_back_through_source() {
        let err = MarketplaceError::from(ApiError::from_http_code(404, None));
        assert_eq!(
            ApiError::classify(&err),
            ApiError::from_http_code(404, None)
        );
        assert_eq!(
            err.user_message(),
            ApiError::from_http_code(404, None).user_message()
        );
    }

    #[test]
    fn invalid_input_is_unknown_to_the_classifier() {
        let err = MarketplaceError::InvalidInput("bad city".to_string());
        assert!(matches!(
            ApiError::classify(&err),
            ApiError::UnknownError { .. }
        ));
    }
}
