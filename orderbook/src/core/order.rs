//! Normalized, identity-tagged orders handed to every view

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use shared::{EventType, RowId};

use crate::core::menu::parse_menu_items;

/// One cleaned order row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    /// Durable id from the `Order_ID` column; the key for update/delete
    pub row_id: RowId,
    /// Index within this loaded snapshot (date-sorted, invalid dates last)
    pub position: usize,
    pub date: Option<NaiveDate>,
    pub date_valid: bool,
    pub customer_name: String,
    /// As stored; mask before display
    pub phone_number: String,
    /// Digits only
    pub phone_clean: String,
    pub order_title: String,
    pub details: String,
    pub location: String,
    pub event_type: String,
    /// Raw pseudo-list text
    pub menu_items: String,
    pub pax: i64,
    /// Service-staff count (`Pramusaji`)
    pub staff_count: i64,
    /// Never negative; estimated from pax when the stored value is missing or ≤ 0
    pub revenue: f64,
    pub revenue_estimated: bool,
    /// Columns outside the known schema, verbatim
    pub extra: BTreeMap<String, String>,
}

impl Order {
    pub fn event(&self) -> EventType {
        EventType::from_cell(&self.event_type)
    }

    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }

    /// Calendar month, 1-12
    pub fn month(&self) -> Option<u32> {
        self.date.map(|d| d.month())
    }

    /// `(year, month)` bucket key
    pub fn year_month(&self) -> Option<(i32, u32)> {
        self.date.map(|d| (d.year(), d.month()))
    }

    /// Name shown on schedule cards: the customer, unless recorded as "Unknown"
    pub fn display_title(&self) -> &str {
        if self.customer_name == "Unknown" {
            &self.order_title
        } else {
            &self.customer_name
        }
    }

    pub fn dishes(&self) -> Vec<String> {
        parse_menu_items(&self.menu_items)
    }
}

/// A loaded snapshot.
///
/// An empty snapshot is also what a failed load looks like; callers treat
/// both as "nothing to show".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderTable {
    orders: Vec<Order>,
    /// Malformed source lines dropped while reading
    pub skipped_lines: usize,
}

impl OrderTable {
    pub fn new(orders: Vec<Order>, skipped_lines: usize) -> Self {
        Self { orders, skipped_lines }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// Orders whose date parsed, for chronological views
    pub fn valid(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(|o| o.date_valid)
    }

    pub fn invalid(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(|o| !o.date_valid)
    }

    pub fn get(&self, row_id: RowId) -> Option<&Order> {
        self.orders.iter().find(|o| o.row_id == row_id)
    }

    pub fn into_orders(self) -> Vec<Order> {
        self.orders
    }
}
