//! Row mutation gateway
//!
//! Update, delete and create are each a full read-modify-write of the order
//! file. Nothing is shared with the loader: the file is re-read on every call
//! so a stale snapshot is never written back. Rows are addressed by their
//! durable `Order_ID`, so deleting one row does not shift the others.
//!
//! Callers are expected to reload after a successful mutation.

use std::sync::Arc;

use shared::{
    FieldUpdates, MutationOutcome, OrderDraft, ProcessId, RowId, columns, process_info, process_warn,
};

use crate::core::table::RawTable;
use crate::error::{OrderbookError, OrderbookResult};
use crate::traits::OrderStore;

pub struct MutationGateway<S: OrderStore> {
    store: Arc<S>,
}

impl<S: OrderStore> Clone for MutationGateway<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: OrderStore> MutationGateway<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Overwrite the given fields of one row; other fields are untouched.
    ///
    /// Unknown columns are added to the file. `Order_ID` and load-time
    /// derived columns are rejected.
    pub async fn update(&self, row_id: RowId, updates: &FieldUpdates) -> MutationOutcome {
        match self.try_update(row_id, updates).await {
            Ok(()) => {
                process_info!(ProcessId::current(), "✏️ Updated order {} ({} field(s))", row_id, updates.len());
                MutationOutcome::succeeded("Updated.", row_id)
            }
            Err(e) => self.failure("update", row_id, e),
        }
    }

    /// Remove one row
    pub async fn delete(&self, row_id: RowId) -> MutationOutcome {
        match self.try_delete(row_id).await {
            Ok(()) => {
                process_info!(ProcessId::current(), "🗑️ Deleted order {}", row_id);
                MutationOutcome::succeeded("Deleted.", row_id)
            }
            Err(e) => self.failure("delete", row_id, e),
        }
    }

    /// Append a new row built from an order form; returns the minted id
    pub async fn create(&self, draft: &OrderDraft) -> MutationOutcome {
        match self.try_create(draft).await {
            Ok(row_id) => {
                process_info!(ProcessId::current(), "💾 Saved order {} for {}", row_id, draft.customer_name);
                MutationOutcome::succeeded(format!("Saved order for {}.", draft.customer_name), row_id)
            }
            Err(e) => {
                process_warn!(ProcessId::current(), "Create failed on {}: {}", self.store.location(), e);
                MutationOutcome::failed(e.to_string())
            }
        }
    }

    async fn try_update(&self, row_id: RowId, updates: &FieldUpdates) -> OrderbookResult<()> {
        if let Some((column, _)) = updates.iter().find(|(column, _)| is_protected_column(column)) {
            return Err(OrderbookError::ProtectedColumn {
                column: column.to_string(),
            });
        }

        let mut table = self.read_with_ids().await?;
        let position = table
            .position_of(row_id)
            .ok_or(OrderbookError::RowNotFound { row_id })?;
        if updates.is_empty() {
            return Ok(());
        }

        for (column, value) in updates.iter() {
            table.set_cell(position, column, value);
        }
        self.store.write_table(&table).await
    }

    async fn try_delete(&self, row_id: RowId) -> OrderbookResult<()> {
        let mut table = self.read_with_ids().await?;
        let position = table
            .position_of(row_id)
            .ok_or(OrderbookError::RowNotFound { row_id })?;

        table.remove_row(position);
        self.store.write_table(&table).await
    }

    async fn try_create(&self, draft: &OrderDraft) -> OrderbookResult<RowId> {
        let mut table = match self.store.read_table().await {
            Ok(table) if !table.headers.is_empty() => table,
            Ok(_) | Err(OrderbookError::StoreMissing { .. }) => RawTable::canonical(),
            Err(e) => return Err(e),
        };
        table.assign_row_ids();

        let row_id = table.next_row_id();
        let mut cells = draft.to_cells();
        cells.push((columns::ORDER_ID, row_id.to_string()));
        table.push_row(&cells);

        self.store.write_table(&table).await?;
        Ok(row_id)
    }

    async fn read_with_ids(&self) -> OrderbookResult<RawTable> {
        let mut table = self.store.read_table().await?;
        table.assign_row_ids();
        Ok(table)
    }

    fn failure(&self, action: &str, row_id: RowId, error: OrderbookError) -> MutationOutcome {
        match error {
            OrderbookError::RowNotFound { .. } => MutationOutcome::not_found(),
            rejected @ OrderbookError::ProtectedColumn { .. } => MutationOutcome::rejected(rejected.to_string()),
            other => {
                process_warn!(
                    ProcessId::current(),
                    "{} of order {} failed on {}: {}",
                    action,
                    row_id,
                    self.store.location(),
                    other
                );
                MutationOutcome::failed(other.to_string())
            }
        }
    }
}

/// Columns `update` refuses to touch: the row id and load-time derived values
fn is_protected_column(column: &str) -> bool {
    column == columns::ORDER_ID || columns::DERIVED.contains(&column)
}
