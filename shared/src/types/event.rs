//! Event types and the per-guest revenue estimate table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-guest rate for any event type not in the table
pub const FALLBACK_RATE: f64 = 15.0;

/// Kind of catering event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Wedding,
    Corporate,
    Packet,
    Buffet,
    Other(String),
}

impl EventType {
    /// Classify a raw cell. Matching is exact on the trimmed text.
    pub fn from_cell(cell: &str) -> Self {
        match cell.trim() {
            "Wedding" => EventType::Wedding,
            "Corporate" => EventType::Corporate,
            "Packet" => EventType::Packet,
            "Buffet" => EventType::Buffet,
            other => EventType::Other(other.to_string()),
        }
    }

    /// Per-guest rate used to estimate missing revenue
    pub fn per_guest_rate(&self) -> f64 {
        match self {
            EventType::Wedding => 18.0,
            EventType::Corporate => 25.0,
            EventType::Packet => 10.0,
            EventType::Buffet => 22.0,
            EventType::Other(_) => FALLBACK_RATE,
        }
    }

    /// Choices offered by the order forms
    pub fn form_choices() -> [&'static str; 5] {
        ["Wedding", "Corporate", "Packet", "Buffet", "Other"]
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Wedding => write!(f, "Wedding"),
            EventType::Corporate => write!(f, "Corporate"),
            EventType::Packet => write!(f, "Packet"),
            EventType::Buffet => write!(f, "Buffet"),
            EventType::Other(raw) => write!(f, "{raw}"),
        }
    }
}
