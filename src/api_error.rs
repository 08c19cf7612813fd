//! Errors reported by the HTTP layer and how the client reacts to them.

use thiserror::Error;

use crate::duration::format_duration_seconds;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never got a response.
    #[error("Error while fetching API: {0}")]
    Fetch(String),
    /// The server answered with a non-success status.
    #[error("HTTP Error {status} {reason} : {message}")]
    Http {
        status: u16,
        reason: String,
        message: String,
        /// Seconds to wait before retrying, sent along with 429 responses.
        retry_after: Option<u64>,
    },
}

/// What the client should do about an unexpected [`ApiError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDisposition {
    /// The session token is no longer accepted; log the user out.
    SessionExpired,
    /// Show this message to the user.
    Notice(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Fetch(_) => None,
            ApiError::Http { status, .. } => Some(*status),
        }
    }

    pub fn disposition(&self) -> ErrorDisposition {
        match self {
            ApiError::Fetch(cause) => {
                ErrorDisposition::Notice(format!("Could not reach the server: {cause}"))
            }
            ApiError::Http { status: 401, .. } => ErrorDisposition::SessionExpired,
            ApiError::Http { status: 403, .. } => ErrorDisposition::Notice(
                "You do not have the rights required to perform this action.".to_string(),
            ),
            ApiError::Http {
                status: 429,
                retry_after,
                ..
            } => {
                let when = match retry_after {
                    Some(secs) if *secs > 0 => format!("in {}", format_duration_seconds(*secs)),
                    _ => "later".to_string(),
                };
                ErrorDisposition::Notice(format!("Too many requests, please try again {when}"))
            }
            ApiError::Http { .. } => ErrorDisposition::Notice(self.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, retry_after: Option<u64>) -> ApiError {
        ApiError::Http {
            status,
            reason: "Reason".to_string(),
            message: "details".to_string(),
            retry_after,
        }
    }

    #[test]
    fn test_unauthorized_expires_session() {
        assert_eq!(http(401, None).disposition(), ErrorDisposition::SessionExpired);
    }

    #[test]
    fn test_forbidden_notice() {
        assert!(matches!(
            http(403, None).disposition(),
            ErrorDisposition::Notice(msg) if msg.contains("rights")
        ));
    }

    #[test]
    fn test_rate_limited_with_retry_hint() {
        assert_eq!(
            http(429, Some(125)).disposition(),
            ErrorDisposition::Notice(
                "Too many requests, please try again in 2 minutes 5 seconds".to_string()
            )
        );
    }

    #[test]
    fn test_rate_limited_without_retry_hint() {
        assert_eq!(
            http(429, None).disposition(),
            ErrorDisposition::Notice("Too many requests, please try again later".to_string())
        );
    }

    #[test]
    fn test_other_status_uses_error_message() {
        assert_eq!(
            http(500, None).disposition(),
            ErrorDisposition::Notice("HTTP Error 500 Reason : details".to_string())
        );
        assert_eq!(http(500, None).status(), Some(500));
    }

    #[test]
    fn test_fetch_failure_notice() {
        let error = ApiError::Fetch("connection refused".to_string());
        assert_eq!(error.status(), None);
        assert_eq!(
            error.disposition(),
            ErrorDisposition::Notice("Could not reach the server: connection refused".to_string())
        );
    }
}
