//! Order store error types

use shared::{RowId, SharedError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderbookError {
    #[error("Order file not found: {path}")]
    StoreMissing { path: String },

    #[error("Failed to read order file {path}: {source}")]
    StoreRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write order file {path}: {source}")]
    StoreWrite {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Order file header is unusable: {reason}")]
    MalformedHeader { reason: String },

    #[error("Row {row_id} not found")]
    RowNotFound { row_id: RowId },

    #[error("Column '{column}' cannot be edited")]
    ProtectedColumn { column: String },

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type OrderbookResult<T> = Result<T, OrderbookError>;
