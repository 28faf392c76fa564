//! Shared error types for the operations dashboard

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid row id: {input}")]
    InvalidRowId { input: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Invalid field update: {message}")]
    InvalidFieldUpdate { message: String },

    #[error("Serialization failed: {message}")]
    SerializationError { message: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
