//! Language-model exchange types

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Which kind of commentary to request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceMode {
    Analytics,
    Forecast,
}

impl fmt::Display for AdviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdviceMode::Analytics => write!(f, "analytics"),
            AdviceMode::Forecast => write!(f, "forecast"),
        }
    }
}

/// Structured order pulled out of free text (e.g. a pasted chat message).
///
/// Model output is loosely typed: numbers may arrive as strings and the menu
/// may arrive as one comma-separated string, so every field is lenient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedOrder {
    #[serde(rename = "Date", default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(rename = "Customer_Name", default, deserialize_with = "lenient_text")]
    pub customer_name: Option<String>,
    #[serde(rename = "Phone_Number", default, deserialize_with = "lenient_text")]
    pub phone_number: Option<String>,
    #[serde(rename = "Order_Title", default, deserialize_with = "lenient_text")]
    pub order_title: Option<String>,
    #[serde(rename = "Pax", default, deserialize_with = "lenient_int")]
    pub pax: Option<i64>,
    #[serde(rename = "Staff_Count", default, deserialize_with = "lenient_int")]
    pub staff_count: Option<i64>,
    #[serde(rename = "Event_Type", default, deserialize_with = "lenient_text")]
    pub event_type: Option<String>,
    #[serde(rename = "Location", default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(rename = "Menu_Items", default, deserialize_with = "lenient_list")]
    pub menu_items: Vec<String>,
    #[serde(rename = "Total_Price", default, deserialize_with = "lenient_float")]
    pub total_price: Option<f64>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.trim().is_empty() => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn lenient_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => {
            let cleaned: String = s.chars().filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-').collect();
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_float(deserializer).map(|v| v.map(|f| f.trunc() as i64))
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let items = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        serde_json::Value::String(s) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };
    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}
