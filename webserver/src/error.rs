//! WebServer-specific error types

use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("HTTP server startup failed: {0}")]
    ServerStartup(String),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Need more data: {buckets} month(s) of orders, at least {required} required")]
    InsufficientHistory { buckets: usize, required: usize },

    #[error("Invalid request format: {details}")]
    InvalidRequest { details: String },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl WebServerError {
    pub fn config(message: impl Into<String>) -> Self {
        WebServerError::Config {
            message: message.into(),
        }
    }

    pub fn invalid_request(details: impl Into<String>) -> Self {
        WebServerError::InvalidRequest {
            details: details.into(),
        }
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;
