//! Service trait definitions for dependency injection
//!
//! File I/O is abstracted behind `OrderStore` so the loader and the mutation
//! gateway can be exercised against mocks.

use async_trait::async_trait;

use crate::core::table::RawTable;
use crate::error::OrderbookResult;

/// Persistence for the whole order table.
///
/// There is no per-row access: every mutation is a full read-modify-write
/// cycle and nothing serialises concurrent writers. Two writers racing on the
/// same file lose one update (last write wins).
#[mockall::automock]
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Read and parse the current table, skipping malformed lines.
    ///
    /// A file that does not exist yields `OrderbookError::StoreMissing`.
    async fn read_table(&self) -> OrderbookResult<RawTable>;

    /// Replace the stored table with `table`
    async fn write_table(&self, table: &RawTable) -> OrderbookResult<()>;

    /// Human-readable location, for logs
    fn location(&self) -> String;
}
