//! Analytics engine for the yearly business snapshot
//!
//! Pure business logic over a loaded order table; only orders with a valid
//! date take part.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use orderbook::{Order, OrderTable};
use shared::RowId;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Known delivery areas in the Klang valley, matched by substring
const PLACES: [(&str, f64, f64); 14] = [
    ("gombak", 3.2252, 101.7224),
    ("bidara", 3.2380, 101.6840),
    ("selayang", 3.2514, 101.6599),
    ("puchong", 3.0346, 101.6166),
    ("kl", 3.1390, 101.6869),
    ("kuala lumpur", 3.1390, 101.6869),
    ("dbkl", 3.1510, 101.6930),
    ("batu caves", 3.2379, 101.6840),
    ("shah alam", 3.0738, 101.5183),
    ("ampang", 3.1578, 101.7619),
    ("petaling", 3.1073, 101.6067),
    ("damansara", 3.1543, 101.6033),
    ("cheras", 3.0645, 101.7589),
    ("kajang", 2.9935, 101.7874),
];

/// Name recorded when the customer is not known
const UNKNOWN_CUSTOMER: &str = "Unknown";

/// Full name of a calendar month (1-12)
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("-")
}

/// Coordinates of the first known place mentioned in `location`
pub fn locate(location: &str) -> Option<(f64, f64)> {
    let text = location.to_lowercase();
    PLACES
        .iter()
        .find(|(place, _, _)| text.contains(place))
        .map(|(_, lat, lon)| (*lat, *lon))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthIncome {
    pub month: String,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientRevenue {
    pub name: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventStaffing {
    pub event_type: String,
    pub avg_staff: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub row_id: RowId,
    pub location: String,
    pub lat: f64,
    pub lon: f64,
}

/// One year of business at a glance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSnapshot {
    pub year: i32,
    pub order_count: usize,
    pub total_revenue: f64,
    pub total_pax: i64,
    pub total_staff: i64,
    pub busiest_month: String,
    /// All twelve months, in calendar order; months without orders are 0
    pub monthly_income: Vec<MonthIncome>,
    pub event_types: Vec<LabelCount>,
    /// Excludes "Unknown" customers
    pub top_clients: Vec<ClientRevenue>,
    pub staffing_intensity: Vec<EventStaffing>,
    pub top_dishes: Vec<LabelCount>,
    pub locations: Vec<MapPoint>,
    /// Highest-revenue customer name, for the advice context
    pub top_client: String,
    pub top_event: String,
}

/// Analytics engine for yearly snapshots
pub struct AnalyticsEngine {
    /// Entries kept in the client and dish rankings
    top_n: usize,
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self { top_n: 5 }
    }

    pub fn with_top_n(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Years with at least one valid-date order, newest first
    pub fn available_years(&self, table: &OrderTable) -> Vec<i32> {
        let mut years: Vec<i32> = table.valid().filter_map(Order::year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }

    /// Snapshot of `year`; `None` when the year has no orders
    pub fn year_snapshot(&self, table: &OrderTable, year: i32) -> Option<YearSnapshot> {
        let orders: Vec<&Order> = table.valid().filter(|o| o.year() == Some(year)).collect();
        if orders.is_empty() {
            return None;
        }

        let mut monthly = [0.0f64; 12];
        for order in &orders {
            if let Some(month) = order.month() {
                monthly[(month - 1) as usize] += order.revenue;
            }
        }
        let busiest_month = self.busiest_month(&orders, &monthly);

        let event_types = self.event_type_counts(&orders);
        let top_event = event_types
            .first()
            .map(|e| e.label.clone())
            .unwrap_or_else(|| "-".to_string());

        Some(YearSnapshot {
            year,
            order_count: orders.len(),
            total_revenue: orders.iter().map(|o| o.revenue).sum(),
            total_pax: orders.iter().map(|o| o.pax).sum(),
            total_staff: orders.iter().map(|o| o.staff_count).sum(),
            busiest_month,
            monthly_income: MONTH_NAMES
                .iter()
                .zip(monthly.iter())
                .map(|(month, sales)| MonthIncome {
                    month: month.to_string(),
                    sales: *sales,
                })
                .collect(),
            event_types,
            top_clients: self.top_clients(&orders),
            staffing_intensity: self.staffing_intensity(&orders),
            top_dishes: self.top_dishes(&orders),
            locations: orders
                .iter()
                .filter_map(|o| {
                    locate(&o.location).map(|(lat, lon)| MapPoint {
                        row_id: o.row_id,
                        location: o.location.clone(),
                        lat,
                        lon,
                    })
                })
                .collect(),
            top_client: self.top_client(&orders),
            top_event,
        })
    }

    /// Plain-text summary handed to the advisor
    pub fn advice_context(&self, snapshot: &YearSnapshot) -> String {
        format!(
            "Year: {}\nTotal Revenue: RM {:.2}\nTotal Guests: {}\nBusiest Month: {}\nTop Client: {}\nMost Common Event: {}",
            snapshot.year,
            snapshot.total_revenue,
            snapshot.total_pax,
            snapshot.busiest_month,
            snapshot.top_client,
            snapshot.top_event
        )
    }

    /// Month with the highest revenue among months that have orders.
    ///
    /// Ties go to the earlier calendar month, so March beats August. Grouping
    /// by month name instead would hand the tie to whichever name sorts first.
    fn busiest_month(&self, orders: &[&Order], monthly: &[f64; 12]) -> String {
        let mut active = [false; 12];
        for month in orders.iter().filter_map(|o| o.month()) {
            active[(month - 1) as usize] = true;
        }
        let mut best: Option<usize> = None;
        for index in (0..12).filter(|i| active[*i]) {
            if best.is_none_or(|b| monthly[index] > monthly[b]) {
                best = Some(index);
            }
        }
        best.map(|i| MONTH_NAMES[i].to_string()).unwrap_or_else(|| "-".to_string())
    }

    /// Most frequent first; ties alphabetical
    fn event_type_counts(&self, orders: &[&Order]) -> Vec<LabelCount> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for order in orders {
            *counts.entry(order.event_type.as_str()).or_default() += 1;
        }
        let mut counts: Vec<LabelCount> = counts
            .into_iter()
            .map(|(label, count)| LabelCount {
                label: label.to_string(),
                count,
            })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }

    fn revenue_by_customer<'a>(&self, orders: &[&'a Order]) -> BTreeMap<&'a str, f64> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for order in orders {
            *totals.entry(order.customer_name.as_str()).or_default() += order.revenue;
        }
        totals
    }

    fn top_clients(&self, orders: &[&Order]) -> Vec<ClientRevenue> {
        let mut clients: Vec<ClientRevenue> = self
            .revenue_by_customer(orders)
            .into_iter()
            .filter(|(name, _)| *name != UNKNOWN_CUSTOMER)
            .map(|(name, revenue)| ClientRevenue {
                name: name.to_string(),
                revenue,
            })
            .collect();
        clients.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
        clients.truncate(self.top_n);
        clients
    }

    fn top_client(&self, orders: &[&Order]) -> String {
        self.revenue_by_customer(orders)
            .into_iter()
            .fold(None::<(&str, f64)>, |best, (name, revenue)| match best {
                Some((_, top)) if top >= revenue => best,
                _ => Some((name, revenue)),
            })
            .map(|(name, _)| name.to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    /// Average staff per event type, alphabetical by type
    fn staffing_intensity(&self, orders: &[&Order]) -> Vec<EventStaffing> {
        let mut totals: BTreeMap<&str, (i64, usize)> = BTreeMap::new();
        for order in orders {
            let entry = totals.entry(order.event_type.as_str()).or_default();
            entry.0 += order.staff_count;
            entry.1 += 1;
        }
        totals
            .into_iter()
            .map(|(event_type, (staff, count))| EventStaffing {
                event_type: event_type.to_string(),
                avg_staff: staff as f64 / count as f64,
            })
            .collect()
    }

    /// Most ordered dishes; ties keep first-seen order
    fn top_dishes(&self, orders: &[&Order]) -> Vec<LabelCount> {
        let mut first_seen: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for dish in orders.iter().flat_map(|o| o.dishes()) {
            let count = counts.entry(dish.clone()).or_insert(0);
            if *count == 0 {
                first_seen.push(dish);
            }
            *count += 1;
        }

        let mut dishes: Vec<LabelCount> = first_seen
            .into_iter()
            .map(|dish| LabelCount {
                count: counts.get(&dish).copied().unwrap_or(0),
                label: dish,
            })
            .collect();
        dishes.sort_by(|a, b| b.count.cmp(&a.count));
        dishes.truncate(self.top_n);
        dishes
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderbook::{RawTable, core::normalize};

    fn table(text: &str) -> OrderTable {
        normalize(RawTable::parse_csv(text.as_bytes()).unwrap())
    }

    const ORDERS: &str = "\
Date,Customer_Name,Pax,Pramusaji,Event_Type,Location,Menu_Items,Revenue
2025-01-10,Aisyah,300,6,Wedding,Shah Alam,\"['Nasi Minyak', 'Ayam Masak Merah']\",5400
2025-01-20,Unknown,80,2,Tahlil,Gombak,\"['Nasi Minyak', 'Teh']\",9000
2025-03-05,Bala,50,1,Corporate,Petaling Jaya,['Nasi Lemak'],1250
2025-03-15,Aisyah,100,3,Wedding,Ipoh,\"['Nasi Minyak, Dalca']\",1800
2024-12-01,Chong,200,4,Packet,Cheras,['Nasi Ayam'],2000
bad,Devi,10,1,Buffet,Kajang,['Roti'],500
";

    #[test]
    fn test_available_years_newest_first() {
        let engine = AnalyticsEngine::new();
        assert_eq!(engine.available_years(&table(ORDERS)), vec![2025, 2024]);
        assert!(engine.available_years(&OrderTable::empty()).is_empty());
    }

    #[test]
    fn test_year_totals() {
        let engine = AnalyticsEngine::new();
        let snapshot = engine.year_snapshot(&table(ORDERS), 2025).unwrap();
        assert_eq!(snapshot.order_count, 4);
        assert_eq!(snapshot.total_revenue, 17450.0);
        assert_eq!(snapshot.total_pax, 530);
        assert_eq!(snapshot.total_staff, 12);
        assert_eq!(snapshot.busiest_month, "January");
        assert_eq!(snapshot.monthly_income.len(), 12);
        assert_eq!(snapshot.monthly_income[0].sales, 14400.0);
        assert_eq!(snapshot.monthly_income[1].sales, 0.0);
        assert_eq!(snapshot.monthly_income[2].sales, 3050.0);
    }

    #[test]
    fn test_top_clients_skip_unknown_but_top_client_does_not() {
        let engine = AnalyticsEngine::new();
        let snapshot = engine.year_snapshot(&table(ORDERS), 2025).unwrap();
        let names: Vec<&str> = snapshot.top_clients.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Aisyah", "Bala"]);
        assert_eq!(snapshot.top_clients[0].revenue, 7200.0);
        assert_eq!(snapshot.top_client, "Unknown");
    }

    #[test]
    fn test_event_types_and_staffing() {
        let engine = AnalyticsEngine::new();
        let snapshot = engine.year_snapshot(&table(ORDERS), 2025).unwrap();
        assert_eq!(snapshot.event_types[0], LabelCount { label: "Wedding".into(), count: 2 });
        assert_eq!(snapshot.top_event, "Wedding");
        let wedding = snapshot
            .staffing_intensity
            .iter()
            .find(|s| s.event_type == "Wedding")
            .unwrap();
        assert_eq!(wedding.avg_staff, 4.5);
    }

    #[test]
    fn test_top_dishes() {
        let engine = AnalyticsEngine::new();
        let snapshot = engine.year_snapshot(&table(ORDERS), 2025).unwrap();
        assert_eq!(snapshot.top_dishes[0], LabelCount { label: "Nasi Minyak".into(), count: 3 });
        // "Teh" is kept (> 2 chars); ranking stable for ties
        let labels: Vec<&str> = snapshot.top_dishes.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Nasi Minyak", "Ayam Masak Merah", "Teh", "Nasi Lemak", "Dalca"]);
    }

    #[test]
    fn test_locations_match_known_places_only() {
        let engine = AnalyticsEngine::new();
        let snapshot = engine.year_snapshot(&table(ORDERS), 2025).unwrap();
        let places: Vec<&str> = snapshot.locations.iter().map(|p| p.location.as_str()).collect();
        assert_eq!(places, vec!["Shah Alam", "Gombak", "Petaling Jaya"]);
        assert_eq!(locate("Dewan Orang Ramai, CHERAS"), Some((3.0645, 101.7589)));
        assert_eq!(locate("Ipoh"), None);
    }

    #[test]
    fn test_busiest_month_tie_goes_to_earlier_month() {
        let engine = AnalyticsEngine::new();
        let orders = "\
Date,Customer_Name,Revenue
2025-08-02,Aisyah,1000
2025-03-09,Bala,600
2025-03-20,Chong,400
";
        let snapshot = engine.year_snapshot(&table(orders), 2025).unwrap();
        assert_eq!(snapshot.busiest_month, "March");
    }

    #[test]
    fn test_missing_year() {
        let engine = AnalyticsEngine::new();
        assert!(engine.year_snapshot(&table(ORDERS), 2019).is_none());
    }

    #[test]
    fn test_advice_context() {
        let engine = AnalyticsEngine::new();
        let snapshot = engine.year_snapshot(&table(ORDERS), 2025).unwrap();
        let context = engine.advice_context(&snapshot);
        assert!(context.contains("Year: 2025"));
        assert!(context.contains("Total Revenue: RM 17450.00"));
        assert!(context.contains("Busiest Month: January"));
        assert!(context.contains("Most Common Event: Wedding"));
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "-");
        assert_eq!(month_name(13), "-");
    }
}
