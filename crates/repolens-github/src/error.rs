//! Error taxonomy for the wire layer.

use thiserror::Error;

/// Failure talking to the GitHub API.
///
/// `Unauthorized`, `RateLimited` and `NotFound` are split out because callers
/// degrade differently for each (re-prompt for a token, soften to "unknown",
/// show missing-resource copy). Everything else keeps its raw status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication required or token rejected")]
    Unauthorized,
    #[error("API rate limit exceeded")]
    RateLimited,
    #[error("resource not found")]
    NotFound,
    #[error("API returned status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Transport(String),
    #[error("failed to decode API response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Map a non-success HTTP status to a variant. `rate_limit_exhausted`
    /// distinguishes a 403 from quota exhaustion (GitHub reports both the
    /// same way, differing only in the `x-ratelimit-remaining` header).
    pub fn from_status(status: u16, rate_limit_exhausted: bool) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            403 | 429 if rate_limit_exhausted => ApiError::RateLimited,
            429 => ApiError::RateLimited,
            404 => ApiError::NotFound,
            other => ApiError::Status(other),
        }
    }

    /// Whether retrying the same request later can reasonably succeed.
    /// Client errors (4xx) are not retryable: the request itself is wrong.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::RateLimited | ApiError::Transport(_) => true,
            ApiError::Status(status) => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(matches!(ApiError::from_status(401, false), ApiError::Unauthorized));
        assert!(matches!(ApiError::from_status(403, true), ApiError::RateLimited));
        assert!(matches!(ApiError::from_status(403, false), ApiError::Status(403)));
        assert!(matches!(ApiError::from_status(429, false), ApiError::RateLimited));
        assert!(matches!(ApiError::from_status(404, false), ApiError::NotFound));
        assert!(matches!(ApiError::from_status(500, false), ApiError::Status(500)));
    }

    #[test]
    fn retryable_classification() {
        assert!(ApiError::RateLimited.is_retryable());
        assert!(ApiError::Transport("timeout".into()).is_retryable());
        assert!(ApiError::Status(500).is_retryable());
        assert!(ApiError::Status(503).is_retryable());
        assert!(!ApiError::Status(400).is_retryable());
        assert!(!ApiError::Status(422).is_retryable());
        assert!(!ApiError::Unauthorized.is_retryable());
        assert!(!ApiError::NotFound.is_retryable());
    }
}
