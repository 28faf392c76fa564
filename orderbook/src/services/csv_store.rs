//! File-backed order store
//!
//! Writes go to a temporary file next to the target and are renamed over it,
//! so a reader never sees a half-written table.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::core::table::RawTable;
use crate::error::{OrderbookError, OrderbookResult};
use crate::traits::OrderStore;
use shared::{ProcessId, process_debug};

#[derive(Debug, Clone)]
pub struct RealCsvStore {
    path: PathBuf,
}

impl RealCsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `.orders.csv.tmp` beside `orders.csv`
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "orders".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }
}

#[async_trait]
impl OrderStore for RealCsvStore {
    async fn read_table(&self) -> OrderbookResult<RawTable> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OrderbookError::StoreMissing { path: self.display() });
            }
            Err(e) => {
                return Err(OrderbookError::StoreRead {
                    path: self.display(),
                    source: e,
                });
            }
        };

        let table = RawTable::parse_csv(&bytes)?;
        process_debug!(
            ProcessId::current(),
            "📖 Read {} records from {}",
            table.len(),
            self.display()
        );
        Ok(table)
    }

    async fn write_table(&self, table: &RawTable) -> OrderbookResult<()> {
        let bytes = table.to_csv_bytes()?;
        let temp = self.temp_path();

        if let Err(e) = fs::write(&temp, &bytes).await {
            let _ = fs::remove_file(&temp).await;
            return Err(OrderbookError::StoreWrite {
                path: self.display(),
                source: e,
            });
        }

        if let Err(e) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(OrderbookError::StoreWrite {
                path: self.display(),
                source: e,
            });
        }

        process_debug!(
            ProcessId::current(),
            "💾 Wrote {} records to {}",
            table.len(),
            self.display()
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.display()
    }
}
