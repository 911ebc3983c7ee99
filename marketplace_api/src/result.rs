//! Three-state result used by callers that render request progress.

use crate::ApiError;

/// Outcome of an API call as seen by a caller rendering it.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    Success(T),
    Error(ApiError),
    /// Request in flight; no payload yet.
    Loading,
}

impl<T> ApiResult<T> {
    /// Transforms the success payload, leaving the other variants untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResult<U> {
        match self {
            Self::Success(data) => ApiResult::Success(f(data)),
            Self::Error(e) => ApiResult::Error(e),
            Self::Loading => ApiResult::Loading,
        }
    }

    /// Runs `f` on the payload if this is a success.
    pub fn on_success<F: FnOnce(&T)>(self, f: F) -> Self {
        if let Self::Success(data) = &self {
            f(data);
        }
        self
    }

    /// Runs `f` on the error if this is a failure.
    pub fn on_error<F: FnOnce(&ApiError)>(self, f: F) -> Self {
        if let Self::Error(e) = &self {
            f(e);
        }
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Converts back to a `Result`; `Loading` has none yet.
    pub fn into_result(self) -> Option<Result<T, ApiError>> {
        match self {
            Self::Success(data) => Some(Ok(data)),
            Self::Error(e) => Some(Err(e)),
            Self::Loading => None,
        }
    }
}

impl<T> From<Result<T, ApiError>> for ApiResult<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(e) => Self::Error(e),
        }
    }
}
