//! Order entry and mutation messages

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::messages::advisor::ExtractedOrder;
use crate::types::{columns, RowId};

/// Column → new cell text for a single row.
///
/// Values arrive from JSON as strings, numbers or booleans; all are stored as
/// their textual form since the order file is text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldUpdates(BTreeMap<String, String>);

impl FieldUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl ToString) {
        self.0.insert(column.into(), value.to_string());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'de> Deserialize<'de> for FieldUpdates {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let fields = raw
            .into_iter()
            .map(|(column, value)| {
                let text = match value {
                    serde_json::Value::Null => String::new(),
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (column, text)
            })
            .collect();
        Ok(Self(fields))
    }
}

/// Why a mutation did not happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationFailure {
    /// No row carries the requested id
    NotFound,
    /// The request itself is not allowed, e.g. editing `Order_ID`
    Rejected,
    /// Reading or writing the order file failed
    Storage,
}

/// Result of a create, update or delete against the order file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationOutcome {
    pub success: bool,
    pub message: String,
    pub row_id: Option<RowId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<MutationFailure>,
}

impl MutationOutcome {
    pub const NOT_FOUND: &'static str = "ID not found.";

    pub fn succeeded(message: impl Into<String>, row_id: RowId) -> Self {
        Self {
            success: true,
            message: message.into(),
            row_id: Some(row_id),
            failure: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::failure_of(MutationFailure::Storage, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::failure_of(MutationFailure::Rejected, message)
    }

    pub fn not_found() -> Self {
        Self::failure_of(MutationFailure::NotFound, Self::NOT_FOUND)
    }

    fn failure_of(failure: MutationFailure, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            row_id: None,
            failure: Some(failure),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.failure == Some(MutationFailure::NotFound)
    }

    pub fn is_rejected(&self) -> bool {
        self.failure == Some(MutationFailure::Rejected)
    }
}

/// A new order as entered on the order form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub date: NaiveDate,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub order_title: String,
    #[serde(default)]
    pub pax: i64,
    #[serde(default)]
    pub staff_count: i64,
    #[serde(default = "default_event_type")]
    pub event_type: String,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub location: String,
    /// Free-text menu, stored both in `Details` and as a pseudo-list in `Menu_Items`
    #[serde(default)]
    pub menu: String,
}

fn default_event_type() -> String {
    "Wedding".to_string()
}

impl OrderDraft {
    /// Empty draft for the given day
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            date,
            customer_name: String::new(),
            phone_number: String::new(),
            order_title: String::new(),
            pax: 100,
            staff_count: 0,
            event_type: default_event_type(),
            revenue: 0.0,
            location: String::new(),
            menu: String::new(),
        }
    }

    /// Pre-fill a draft from an extraction result, falling back to `today`
    /// when the extracted date is missing or not `YYYY-MM-DD`.
    pub fn from_extracted(extracted: &ExtractedOrder, today: NaiveDate) -> Self {
        let date = extracted
            .date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
            .unwrap_or(today);
        let event_type = extracted
            .event_type
            .clone()
            .filter(|t| crate::types::EventType::form_choices().contains(&t.as_str()))
            .unwrap_or_else(default_event_type);

        Self {
            date,
            customer_name: extracted.customer_name.clone().unwrap_or_default(),
            phone_number: extracted.phone_number.clone().unwrap_or_default(),
            order_title: extracted.order_title.clone().unwrap_or_default(),
            pax: extracted.pax.unwrap_or(100),
            staff_count: extracted.staff_count.unwrap_or(0).max(0),
            event_type,
            revenue: extracted.total_price.unwrap_or(0.0).max(0.0),
            location: extracted.location.clone().unwrap_or_default(),
            menu: extracted.menu_items.join(", "),
        }
    }

    /// Cells for the persisted row, keyed by column name
    pub fn to_cells(&self) -> Vec<(&'static str, String)> {
        vec![
            (columns::DATE, self.date.format("%Y-%m-%d").to_string()),
            (columns::CUSTOMER_NAME, self.customer_name.clone()),
            (columns::PHONE_NUMBER, self.phone_number.clone()),
            (columns::ORDER_TITLE, self.order_title.clone()),
            (columns::DETAILS, format!("AI: {}", self.menu)),
            (columns::PAX, self.pax.to_string()),
            (columns::PRAMUSAJI, self.staff_count.to_string()),
            (columns::EVENT_TYPE, self.event_type.clone()),
            (columns::LOCATION, self.location.clone()),
            (columns::MENU_ITEMS, format!("['{}']", self.menu)),
            (columns::REVENUE, self.revenue.to_string()),
        ]
    }

    /// Same cells as an update set, used by the edit form
    pub fn to_updates(&self) -> FieldUpdates {
        let mut updates = FieldUpdates::new();
        for (column, value) in self.to_cells() {
            updates.set(column, value);
        }
        updates
    }
}
