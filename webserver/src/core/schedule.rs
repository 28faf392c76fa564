//! Upcoming and past order lists

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use orderbook::{Order, OrderTable, core::format_date, mask_phone_number};
use shared::RowId;

/// Orders shown as cards above the list
pub const HIGHLIGHT_CARDS: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleView {
    #[default]
    Upcoming,
    #[serde(alias = "history")]
    Past,
}

impl ScheduleView {
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleView::Upcoming => "upcoming",
            ScheduleView::Past => "past",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntry {
    pub row_id: RowId,
    pub position: usize,
    /// YYYY-MM-DD
    pub date: String,
    pub title: String,
    pub customer_name: String,
    pub order_title: String,
    /// Masked, last four digits visible
    pub phone: String,
    pub location: String,
    pub event_type: String,
    pub pax: i64,
    pub staff_count: i64,
    pub revenue: f64,
    pub revenue_estimated: bool,
    pub dishes: Vec<String>,
    pub details: String,
    pub highlight: bool,
}

impl ScheduleEntry {
    fn from_order(order: &Order, index: usize) -> Option<Self> {
        let date = order.date?;
        Some(Self {
            row_id: order.row_id,
            position: order.position,
            date: format_date(date),
            title: order.display_title().to_string(),
            customer_name: order.customer_name.clone(),
            order_title: order.order_title.clone(),
            phone: mask_phone_number(&order.phone_number),
            location: order.location.clone(),
            event_type: order.event_type.clone(),
            pax: order.pax,
            staff_count: order.staff_count,
            revenue: order.revenue,
            revenue_estimated: order.revenue_estimated,
            dishes: order.dishes(),
            details: order.details.clone(),
            highlight: index < HIGHLIGHT_CARDS,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub view: ScheduleView,
    pub today: String,
    pub entries: Vec<ScheduleEntry>,
    /// Shown instead of the list when there are no entries
    pub message: Option<String>,
}

/// Orders on or after `today` ascending, or before it descending.
///
/// Orders without a valid date appear in neither view.
pub fn build_schedule(table: &OrderTable, view: ScheduleView, today: NaiveDate) -> Schedule {
    let mut orders: Vec<&Order> = table
        .valid()
        .filter(|o| match (view, o.date) {
            (ScheduleView::Upcoming, Some(date)) => date >= today,
            (ScheduleView::Past, Some(date)) => date < today,
            _ => false,
        })
        .collect();
    if view == ScheduleView::Past {
        // Stable reverse keeps same-day orders in file order
        orders.sort_by(|a, b| b.date.cmp(&a.date));
    }

    let entries: Vec<ScheduleEntry> = orders
        .into_iter()
        .enumerate()
        .filter_map(|(index, order)| ScheduleEntry::from_order(order, index))
        .collect();
    let message = entries
        .is_empty()
        .then(|| format!("No {} orders found.", view.label()));

    Schedule {
        view,
        today: format_date(today),
        entries,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderbook::{RawTable, core::normalize};

    const ORDERS: &str = "\
Date,Customer_Name,Phone_Number,Order_Title,Pax,Event_Type,Location,Menu_Items,Revenue
2026-10-20,Unknown,0123456789,Majlis Tahlil,80,Tahlil,Gombak,['Nasi Minyak'],800
2026-10-17,Aisyah,0198765432,Kenduri,300,Wedding,Shah Alam,,5400
2026-11-02,Bala,,Lunch,50,Corporate,KL,,
2026-12-25,Chong,,Party,40,Buffet,Cheras,,900
2026-09-01,Devi,,Packets,200,Packet,Kajang,,
2026-10-16,Eng,,Dinner,60,Buffet,Ampang,,1300
TBC,Farid,,Mystery,10,Wedding,,,
";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn table() -> OrderTable {
        normalize(RawTable::parse_csv(ORDERS.as_bytes()).unwrap())
    }

    #[test]
    fn test_upcoming_includes_today_ascending() {
        let schedule = build_schedule(&table(), ScheduleView::Upcoming, today());
        let dates: Vec<&str> = schedule.entries.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-10-17", "2026-10-20", "2026-11-02", "2026-12-25"]);
        assert!(schedule.message.is_none());
    }

    #[test]
    fn test_past_descending() {
        let schedule = build_schedule(&table(), ScheduleView::Past, today());
        let titles: Vec<&str> = schedule.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Eng", "Devi"]);
    }

    #[test]
    fn test_entries_are_display_ready() {
        let schedule = build_schedule(&table(), ScheduleView::Upcoming, today());
        let tahlil = &schedule.entries[1];
        assert_eq!(tahlil.title, "Majlis Tahlil");
        assert_eq!(tahlil.phone, "******6789");
        assert_eq!(tahlil.row_id, RowId(0));
        assert_eq!(tahlil.dishes, vec!["Nasi Minyak"]);

        let highlights: Vec<bool> = schedule.entries.iter().map(|e| e.highlight).collect();
        assert_eq!(highlights, vec![true, true, true, false]);
    }

    #[test]
    fn test_invalid_dates_are_in_neither_view() {
        let upcoming = build_schedule(&table(), ScheduleView::Upcoming, today());
        let past = build_schedule(&table(), ScheduleView::Past, today());
        assert_eq!(upcoming.entries.len() + past.entries.len(), 6);
    }

    #[test]
    fn test_empty_view_has_message() {
        let schedule = build_schedule(&OrderTable::empty(), ScheduleView::Past, today());
        assert!(schedule.entries.is_empty());
        assert_eq!(schedule.message.as_deref(), Some("No past orders found."));
    }

    #[test]
    fn test_view_names() {
        let view: ScheduleView = serde_json::from_str("\"history\"").unwrap();
        assert_eq!(view, ScheduleView::Past);
        assert_eq!(ScheduleView::default(), ScheduleView::Upcoming);
    }
}
