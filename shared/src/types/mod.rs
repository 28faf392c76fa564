//! Core types used throughout the dashboard

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::errors::SharedError;

pub mod columns;
pub mod event;

pub use event::EventType;

/// Global process ID singleton - set once at startup
static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Identifies which binary is emitting logs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    /// The HTTP dashboard
    Dashboard,
    /// The operator command line tool
    Cli,
}

impl ProcessId {
    /// Initialize the global process ID for the dashboard
    pub fn init_dashboard() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Dashboard)
    }

    /// Initialize the global process ID for the CLI
    pub fn init_cli() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Cli)
    }

    /// Get the global process ID.
    ///
    /// Library code may log before a binary has called `init_*` (tests do this
    /// all the time), so an uninitialised id falls back to `Dashboard`.
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Dashboard)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::Dashboard => write!(f, "dashboard"),
            ProcessId::Cli => write!(f, "cli"),
        }
    }
}

/// Durable identity of an order row, persisted in the `Order_ID` column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u64);

impl RowId {
    /// Stored ids must stay below this (2^53, exact in JSON numbers and f64)
    pub const LIMIT: u64 = 1 << 53;

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Next id in sequence; `None` once it would reach `LIMIT`
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).filter(|id| *id < Self::LIMIT).map(Self)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RowId {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(RowId)
            .map_err(|_| SharedError::InvalidRowId { input: s.to_string() })
    }
}

impl From<u64> for RowId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_id_display() {
        assert_eq!(ProcessId::Dashboard.to_string(), "dashboard");
        assert_eq!(ProcessId::Cli.to_string(), "cli");
    }

    #[test]
    fn test_row_id_parse() {
        assert_eq!(" 42 ".parse::<RowId>().unwrap(), RowId(42));
        assert!("-1".parse::<RowId>().is_err());
        assert!("abc".parse::<RowId>().is_err());
        assert_eq!(RowId(7).next(), Some(RowId(8)));
    }

    #[test]
    fn test_row_id_next_stops_at_limit() {
        assert_eq!(RowId(RowId::LIMIT - 2).next(), Some(RowId(RowId::LIMIT - 1)));
        assert_eq!(RowId(RowId::LIMIT - 1).next(), None);
        assert_eq!(RowId(u64::MAX).next(), None);
    }

    #[test]
    fn test_row_id_serializes_as_number() {
        let json = serde_json::to_string(&RowId(3)).unwrap();
        assert_eq!(json, "3");
    }
}
