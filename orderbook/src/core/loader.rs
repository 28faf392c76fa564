//! Dataset loader & normalizer
//!
//! Reads the whole order file fresh on every call and turns it into an
//! identity-tagged, typed snapshot. Loading never fails from the caller's
//! point of view: any read or parse catastrophe is logged and an empty table
//! is returned.

use std::collections::BTreeMap;
use std::sync::Arc;

use shared::{EventType, ProcessId, columns, process_debug, process_error, process_warn};

use crate::core::dates::parse_date;
use crate::core::order::{Order, OrderTable};
use crate::core::phone::normalize_phone;
use crate::core::table::RawTable;
use crate::traits::OrderStore;

pub struct DatasetLoader<S: OrderStore> {
    store: Arc<S>,
}

impl<S: OrderStore> Clone for DatasetLoader<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: OrderStore> DatasetLoader<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Fresh snapshot of the order file; empty on any failure
    pub async fn load(&self) -> OrderTable {
        let raw = match self.store.read_table().await {
            Ok(raw) => raw,
            Err(e) => {
                process_error!(
                    ProcessId::current(),
                    "❌ Error loading orders from {}: {}",
                    self.store.location(),
                    e
                );
                return OrderTable::empty();
            }
        };

        if !raw.skipped_lines.is_empty() {
            process_warn!(
                ProcessId::current(),
                "⚠️ Skipped {} malformed line(s) in {}: {:?}",
                raw.skipped_lines.len(),
                self.store.location(),
                raw.skipped_lines
            );
        }

        let table = normalize(raw);
        process_debug!(
            ProcessId::current(),
            "📋 Loaded {} orders ({} with invalid dates)",
            table.len(),
            table.invalid().count()
        );
        table
    }
}

/// Turn a raw table into typed orders.
///
/// - every record gets a durable id (see `RawTable::assign_row_ids`)
/// - missing columns read as 0 (numeric) or "" (text)
/// - unparsable `Pax`/`Pramusaji` become 0; negative values are kept
/// - `Revenue` that is missing, unparsable or ≤ 0 is estimated as
///   `pax × per-guest rate(event type)`, floored at 0
/// - unparsable dates are kept and flagged, and sort after every valid date
pub fn normalize(mut raw: RawTable) -> OrderTable {
    raw.assign_row_ids();

    let known: Vec<&str> = columns::CANONICAL.to_vec();
    let extra_columns: Vec<(usize, String)> = raw
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !known.contains(&h.as_str()))
        .map(|(i, h)| (i, h.clone()))
        .collect();

    let mut orders: Vec<Order> = (0..raw.len())
        .map(|index| normalize_row(&raw, index, &extra_columns))
        .collect();

    // Stable: equal dates keep file order
    orders.sort_by(|a, b| match (a.date, b.date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    for (position, order) in orders.iter_mut().enumerate() {
        order.position = position;
    }

    OrderTable::new(orders, raw.skipped_lines.len())
}

fn normalize_row(raw: &RawTable, index: usize, extra_columns: &[(usize, String)]) -> Order {
    let text = |column: &str| raw.cell(index, column).unwrap_or("").to_string();

    let date = raw.cell(index, columns::DATE).and_then(parse_date);
    let pax = parse_count(raw.cell(index, columns::PAX).unwrap_or(""));
    let staff_count = parse_count(raw.cell(index, columns::PRAMUSAJI).unwrap_or(""));
    let event_type = text(columns::EVENT_TYPE);
    let phone_number = text(columns::PHONE_NUMBER);

    let (revenue, revenue_estimated) = match raw.cell(index, columns::REVENUE).and_then(parse_number) {
        Some(value) if value > 0.0 => (value, false),
        _ => (estimate_revenue(pax, &EventType::from_cell(&event_type)), true),
    };

    let extra: BTreeMap<String, String> = extra_columns
        .iter()
        .map(|(column, name)| (name.clone(), raw.rows[index][*column].clone()))
        .collect();

    Order {
        row_id: raw.row_id_at(index).unwrap_or_default(),
        position: index,
        date,
        date_valid: date.is_some(),
        customer_name: text(columns::CUSTOMER_NAME),
        phone_clean: normalize_phone(&phone_number),
        phone_number,
        order_title: text(columns::ORDER_TITLE),
        details: text(columns::DETAILS),
        location: text(columns::LOCATION),
        event_type,
        menu_items: text(columns::MENU_ITEMS),
        pax,
        staff_count,
        revenue,
        revenue_estimated,
        extra,
    }
}

/// Display-time revenue estimate; never persisted
pub fn estimate_revenue(pax: i64, event_type: &EventType) -> f64 {
    (pax as f64 * event_type.per_guest_rate()).max(0.0)
}

fn parse_number(cell: &str) -> Option<f64> {
    let value = cell.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

fn parse_count(cell: &str) -> i64 {
    parse_number(cell).map(|v| v.trunc() as i64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::RowId;

    fn table(text: &str) -> OrderTable {
        normalize(RawTable::parse_csv(text.as_bytes()).unwrap())
    }

    #[test]
    fn test_revenue_backfill_uses_rate_table() {
        let orders = table(
            "Date,Pax,Event_Type,Revenue\n\
             2025-01-01,100,Wedding,\n\
             2025-01-02,100,Corporate,0\n\
             2025-01-03,100,Packet,abc\n\
             2025-01-04,100,Buffet,-5\n\
             2025-01-05,100,Tahlil,\n\
             2025-01-06,100,Wedding,4200\n",
        );
        let revenues: Vec<f64> = orders.iter().map(|o| o.revenue).collect();
        assert_eq!(revenues, vec![1800.0, 2500.0, 1000.0, 2200.0, 1500.0, 4200.0]);
        assert!(orders.orders()[0].revenue_estimated);
        assert!(!orders.orders()[5].revenue_estimated);
    }

    #[test]
    fn test_negative_pax_never_yields_negative_revenue() {
        let orders = table("Date,Pax,Event_Type,Revenue\n2025-01-01,-20,Wedding,\n");
        let order = &orders.orders()[0];
        assert_eq!(order.pax, -20);
        assert_eq!(order.revenue, 0.0);
    }

    #[test]
    fn test_counts_default_to_zero() {
        let orders = table("Date,Pax,Pramusaji\n2025-01-01,,lots\n2025-01-02,12.7,3\n");
        assert_eq!(orders.orders()[0].pax, 0);
        assert_eq!(orders.orders()[0].staff_count, 0);
        assert_eq!(orders.orders()[1].pax, 12);
        assert_eq!(orders.orders()[1].staff_count, 3);
    }

    #[test]
    fn test_missing_columns_are_defaulted() {
        let orders = table("Date,Customer_Name\n2025-01-01,Aisyah\n");
        let order = &orders.orders()[0];
        assert_eq!(order.pax, 0);
        assert_eq!(order.staff_count, 0);
        assert_eq!(order.revenue, 0.0);
        assert_eq!(order.location, "");
        assert_eq!(order.menu_items, "");
        assert_eq!(order.event_type, "");
    }

    #[test]
    fn test_missing_date_column_flags_every_row() {
        let orders = table("Customer_Name,Pax\nAisyah,10\nBala,20\n");
        assert_eq!(orders.len(), 2);
        assert_eq!(orders.invalid().count(), 2);
    }

    #[test]
    fn test_invalid_dates_sort_last_and_keep_ids() {
        let orders = table(
            "Date,Customer_Name\n\
             2025-03-01,c\n\
             someday,x\n\
             2025-01-01,a\n\
             2025-02-01,b\n",
        );
        let names: Vec<&str> = orders.iter().map(|o| o.customer_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "x"]);
        assert_eq!(orders.invalid().count(), 1);
        assert!(!orders.orders()[3].date_valid);
        // ids follow file position, positions follow sort order
        assert_eq!(orders.orders()[3].row_id, RowId(1));
        assert_eq!(orders.orders()[3].position, 3);
        assert_eq!(orders.orders()[0].row_id, RowId(2));
    }

    #[test]
    fn test_phone_clean_and_extra_columns() {
        let orders = table("Date,Phone_Number,Deposit_Paid\n2025-01-01,+60 12-345 6789,yes\n");
        let order = &orders.orders()[0];
        assert_eq!(order.phone_clean, "60123456789");
        assert_eq!(order.phone_number, "+60 12-345 6789");
        assert_eq!(order.extra.get("Deposit_Paid").map(String::as_str), Some("yes"));
        assert!(!order.extra.contains_key("Order_ID"));
    }

    #[test]
    fn test_display_title_prefers_known_customer() {
        let orders = table(
            "Date,Customer_Name,Order_Title\n\
             2025-01-01,Unknown,Majlis Tahlil\n\
             2025-01-02,Aisyah,Kenduri\n",
        );
        assert_eq!(orders.orders()[0].display_title(), "Majlis Tahlil");
        assert_eq!(orders.orders()[1].display_title(), "Aisyah");
    }
}
