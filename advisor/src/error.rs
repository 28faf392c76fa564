//! Advisor error types
//!
//! Service failures (the request never produced a usable HTTP answer) are kept
//! apart from reply failures (the service answered, but not with anything we
//! can use), so callers can tell "service down" from "service talked nonsense".

use serde::Serialize;
use thiserror::Error;

pub type AdvisorResult<T> = Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("No API key configured (set OPENAI_API_KEY)")]
    MissingApiKey,

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Authentication failed ({status})")]
    Authentication { status: u16 },

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Service unavailable")]
    ServiceUnavailable,

    #[error("Server error: {status}")]
    Server { status: u16 },

    #[error("Model returned no content")]
    EmptyReply,

    #[error("Malformed reply: {message}")]
    MalformedReply { message: String },

    #[error("Reply is not the expected JSON: {message}")]
    UnparsableJson { message: String },
}

/// Coarse classification of an `AdvisorError`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Request never got a usable answer: config, network, auth, limits, 5xx
    Service,
    /// Service answered with something we could not use
    Reply,
}

impl AdvisorError {
    /// Map a non-success HTTP status
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => AdvisorError::Authentication { status },
            429 => AdvisorError::RateLimited,
            503 => AdvisorError::ServiceUnavailable,
            _ => AdvisorError::Server { status },
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            AdvisorError::EmptyReply
            | AdvisorError::MalformedReply { .. }
            | AdvisorError::UnparsableJson { .. } => FailureKind::Reply,
            _ => FailureKind::Service,
        }
    }

    /// Text shown in place of the advice when the call fails
    pub fn inline_message(&self) -> String {
        format!("AI Error: {}", self)
    }
}

impl From<reqwest::Error> for AdvisorError {
    fn from(e: reqwest::Error) -> Self {
        AdvisorError::Network {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(AdvisorError::from_status(401), AdvisorError::Authentication { status: 401 }));
        assert!(matches!(AdvisorError::from_status(403), AdvisorError::Authentication { status: 403 }));
        assert!(matches!(AdvisorError::from_status(429), AdvisorError::RateLimited));
        assert!(matches!(AdvisorError::from_status(503), AdvisorError::ServiceUnavailable));
        assert!(matches!(AdvisorError::from_status(500), AdvisorError::Server { status: 500 }));
        assert!(matches!(AdvisorError::from_status(404), AdvisorError::Server { status: 404 }));
    }

    #[test]
    fn test_kind_separates_service_from_reply() {
        assert_eq!(AdvisorError::RateLimited.kind(), FailureKind::Service);
        assert_eq!(AdvisorError::MissingApiKey.kind(), FailureKind::Service);
        assert_eq!(AdvisorError::EmptyReply.kind(), FailureKind::Reply);
        assert_eq!(
            AdvisorError::UnparsableJson { message: "x".into() }.kind(),
            FailureKind::Reply
        );
    }

    #[test]
    fn test_inline_message() {
        assert_eq!(AdvisorError::RateLimited.inline_message(), "AI Error: Rate limit exceeded");
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&FailureKind::Reply).unwrap(), "\"reply\"");
    }
}
