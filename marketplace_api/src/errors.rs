//! Error taxonomy for the API client.
//!
//! Every failure the client can observe (a non-2xx status, a transport
//! error, a body that does not decode) is classified into exactly one
//! [`ApiError`] variant. Classification is total: it never fails and never
//! panics, unrecognized errors degrade to [`ApiError::UnknownError`].

use std::collections::BTreeMap;
use std::error::Error as StdError;

/// A classified API failure.
///
/// Each variant carries a `message` that doubles as its `Display` output.
/// Underlying causes are kept as rendered strings so the error stays
/// `Clone` and can be stored in long-lived state.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request target could not be built.
    #[error("{message}")]
    InvalidURL { message: String },
    /// Success status, but the body was empty.
    #[error("{message}")]
    InvalidResponse { message: String },
    /// The payload did not match the expected shape.
    #[error("{message}")]
    DecodingError { cause: String, message: String },
    /// HTTP 401: auth token missing or expired.
    #[error("{message}")]
    Unauthorized { message: String },
    /// HTTP 403: authenticated but not permitted.
    #[error("{message}")]
    Forbidden { message: String },
    /// HTTP 404.
    #[error("{message}")]
    NotFound { message: String },
    /// HTTP 5xx.
    #[error("{message}")]
    ServerError { http_code: u16, message: String },
    /// Any other non-2xx status.
    #[error("{message}")]
    HttpError {
        http_code: u16,
        server_message: Option<String>,
        message: String,
    },
    /// Transport-level failure (DNS, connect, I/O).
    #[error("{message}")]
    NetworkError { cause: String, message: String },
    /// HTTP 422: the server rejected the request's fields.
    #[error("{message}")]
    ValidationError {
        field_errors: BTreeMap<String, String>,
        message: String,
    },
    /// The request exceeded its deadline (transport timeout or HTTP 408).
    #[error("{message}")]
    TimeoutError { message: String },
    /// Anything the classifier does not recognize.
    #[error("{message}")]
    UnknownError { cause: String, message: String },
}

impl ApiError {
    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::InvalidURL {
            message: message.into(),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    pub fn decoding(cause: impl Into<String>) -> Self {
        let cause = cause.into();
        Self::DecodingError {
            message: format!("Failed to decode response: {}", cause),
            cause,
        }
    }

    pub fn network(cause: impl Into<String>) -> Self {
        let cause = cause.into();
        Self::NetworkError {
            message: format!("Network error: {}", cause),
            cause,
        }
    }

    pub fn timeout() -> Self {
        Self::TimeoutError {
            message: "Request timed out".to_string(),
        }
    }

    pub fn unknown(cause: impl Into<String>) -> Self {
        let cause = cause.into();
        Self::UnknownError {
            message: format!("Unexpected error: {}", cause),
            cause,
        }
    }

    /// Builds a validation error from per-field messages.
    pub fn validation(field_errors: BTreeMap<String, String>) -> Self {
        Self::ValidationError {
            field_errors,
            message: "Validation failed".to_string(),
        }
    }

    /// Classifies a failed HTTP status.
    ///
    /// Callers only pass non-2xx codes here. 422 yields an empty
    /// `field_errors` map; parsing a structured body is the caller's job.
    pub fn from_http_code(code: u16, server_message: Option<&str>) -> Self {
        match code {
            401 => Self::Unauthorized {
                message: "Unauthorized".to_string(),
            },
            403 => Self::Forbidden {
                message: "Forbidden".to_string(),
            },
            404 => Self::NotFound {
                message: "Not found".to_string(),
            },
            408 => Self::timeout(),
            422 => Self::validation(BTreeMap::new()),
            500..=599 => Self::ServerError {
                http_code: code,
                message: format!("Server error {}", code),
            },
            _ => Self::HttpError {
                http_code: code,
                server_message: server_message.map(str::to_string),
                message: format!("Request failed with status {}", code),
            },
        }
    }

    /// Classifies an arbitrary error.
    ///
    /// Walks the `source()` chain looking for a recognizable cause. An
    /// `ApiError` anywhere in the chain is returned unchanged, so classifying
    /// an already classified error is the identity.
    pub fn classify(err: &(dyn StdError + 'static)) -> Self {
        let mut current: Option<&(dyn StdError + 'static)> = Some(err);
        while let Some(e) = current {
            if let Some(api) = e.downcast_ref::<ApiError>() {
                return api.clone();
            }
            if let Some(re) = e.downcast_ref::<reqwest::Error>() {
                return Self::from_reqwest(re);
            }
            if let Some(io) = e.downcast_ref::<std::io::Error>() {
                return Self::from_io(io);
            }
            if let Some(json) = e.downcast_ref::<serde_json::Error>() {
                return Self::decoding(json.to_string());
            }
            if let Some(parse) = e.downcast_ref::<url::ParseError>() {
                return Self::invalid_url(format!("Invalid URL: {}", parse));
            }
            current = e.source();
        }
        Self::unknown(err.to_string())
    }

    fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::timeout();
        }
        if err.is_builder() {
            return Self::invalid_url(format!("Invalid request: {}", err));
        }
        if err.is_decode() {
            return Self::decoding(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::from_http_code(status.as_u16(), None);
        }
        // reqwest hides hyper's io errors behind its own source chain
        let mut source = err.source();
        while let Some(e) = source {
            if let Some(io) = e.downcast_ref::<std::io::Error>() {
                return Self::from_io(io);
            }
            source = e.source();
        }
        if err.is_connect() || err.is_request() || err.is_body() {
            return Self::network(err.to_string());
        }
        Self::unknown(err.to_string())
    }

    fn from_io(err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::TimedOut => Self::timeout(),
            _ => Self::network(err.to_string()),
        }
    }

    /// The HTTP status this error was classified from, if any.
    pub fn http_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::ValidationError { .. } => Some(422),
            Self::ServerError { http_code, .. } | Self::HttpError { http_code, .. } => {
                Some(*http_code)
            }
            _ => None,
        }
    }

    /// Whether repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NetworkError { .. } | Self::TimeoutError { .. } | Self::ServerError { .. } => {
                true
            }
            Self::HttpError { http_code, .. } => *http_code == 429,
            _ => false,
        }
    }

    /// Whether the session layer should force re-authentication.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// A fixed, user-facing English message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidURL { .. } => "Something went wrong building the request.".to_string(),
            Self::InvalidResponse { .. } => "The server returned an empty response.".to_string(),
            Self::DecodingError { .. } => {
                "We couldn't read the server's response. Please update the app.".to_string()
            }
            Self::Unauthorized { .. } => "Your session has expired. Please sign in again.".to_string(),
            Self::Forbidden { .. } => "You don't have permission to do that.".to_string(),
            Self::NotFound { .. } => "We couldn't find what you were looking for.".to_string(),
            Self::ServerError { .. } => {
                "The server is having trouble right now. Please try again later.".to_string()
            }
            Self::HttpError {
                http_code,
                server_message,
                ..
            } => match server_message.as_deref().map(str::trim) {
                Some(msg) if !msg.is_empty() => msg.to_string(),
                _ => format!("Error {}", http_code),
            },
            Self::NetworkError { .. } => {
                "No connection. Check your internet and try again.".to_string()
            }
            Self::ValidationError { field_errors, .. } => match field_errors.values().next() {
                Some(first) => first.clone(),
                None => "Some of the information you entered is invalid.".to_string(),
            },
            Self::TimeoutError { .. } => "The request timed out. Please try again.".to_string(),
            Self::UnknownError { .. } => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::from_reqwest(&e)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::decoding(e.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(e: url::ParseError) -> Self {
        Self::invalid_url(format!("Invalid URL: {}", e))
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        Self::from_io(&e)
    }
}
