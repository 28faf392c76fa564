//! Monthly demand forecast
//!
//! Revenue and staffing are summed per calendar month, a least-squares line
//! is fitted against the month index, and the target month's value is scaled
//! by how that calendar month has historically compared to the average.

use serde::Serialize;

use orderbook::OrderTable;

use crate::core::analytics::month_name;
use crate::error::{WebServerError, WebServerResult};

/// Fewest monthly buckets a forecast is attempted on
pub const MIN_BUCKETS: usize = 6;

/// Totals for one calendar month that has orders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    pub revenue: f64,
    pub staff: i64,
}

impl MonthlyBucket {
    fn ordinal(&self) -> i64 {
        month_ordinal(self.year, self.month)
    }
}

fn month_ordinal(year: i32, month: u32) -> i64 {
    year as i64 * 12 + month as i64 - 1
}

/// Valid-date orders grouped by `(year, month)`, oldest first
pub fn monthly_buckets(table: &OrderTable) -> Vec<MonthlyBucket> {
    let mut buckets: Vec<MonthlyBucket> = Vec::new();
    let mut orders: Vec<_> = table.valid().filter_map(|o| o.year_month().map(|key| (key, o))).collect();
    orders.sort_by_key(|(key, _)| *key);

    for ((year, month), order) in orders {
        match buckets.last_mut() {
            Some(last) if last.year == year && last.month == month => {
                last.revenue += order.revenue;
                last.staff += order.staff_count;
            }
            _ => buckets.push(MonthlyBucket {
                year,
                month,
                revenue: order.revenue,
                staff: order.staff_count,
            }),
        }
    }
    buckets
}

/// Ordinary least-squares line `y = intercept + slope · x`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit against x = 0, 1, 2, ...
    pub fn over_index(values: &[f64]) -> Self {
        let n = values.len() as f64;
        if values.is_empty() {
            return Self { slope: 0.0, intercept: 0.0 };
        }

        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
        for (i, y) in values.iter().enumerate() {
            let x = i as f64;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_xx += x * x;
        }

        let denominator = n * sum_xx - sum_x * sum_x;
        let slope = if denominator == 0.0 {
            0.0
        } else {
            (n * sum_xy - sum_x * sum_y) / denominator
        };
        let intercept = (sum_y - slope * sum_x) / n;
        Self { slope, intercept }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Prediction for one target month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub year: i32,
    pub month: u32,
    /// e.g. "June 2026"
    pub target_label: String,
    pub predicted_revenue: f64,
    pub staff_needed: i64,
    /// Revenue per staff member; 0 when no staff is needed
    pub efficiency: f64,
    pub seasonality_factor: f64,
    pub historical_max_revenue: f64,
    pub historical_max_staff: i64,
    pub buckets: usize,
}

pub struct ForecastEngine {
    min_buckets: usize,
}

impl ForecastEngine {
    pub fn new() -> Self {
        Self {
            min_buckets: MIN_BUCKETS,
        }
    }

    pub fn forecast(&self, table: &OrderTable, year: i32, month: u32) -> WebServerResult<Forecast> {
        if !(1..=12).contains(&month) {
            return Err(WebServerError::invalid_request(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }

        let buckets = monthly_buckets(table);
        if buckets.len() < self.min_buckets {
            return Err(WebServerError::InsufficientHistory {
                buckets: buckets.len(),
                required: self.min_buckets,
            });
        }

        let revenues: Vec<f64> = buckets.iter().map(|b| b.revenue).collect();
        let staff: Vec<f64> = buckets.iter().map(|b| b.staff as f64).collect();
        let revenue_fit = LinearFit::over_index(&revenues);
        let staff_fit = LinearFit::over_index(&staff);

        let last_index = (buckets.len() - 1) as i64;
        let months_ahead = match buckets.last() {
            Some(last) => month_ordinal(year, month) - last.ordinal(),
            None => 0,
        };
        let target_index = (last_index + months_ahead) as f64;

        let factor = seasonality_factor(&buckets, month);
        let predicted_revenue = (revenue_fit.predict(target_index) * factor).max(0.0);
        let staff_needed = ((staff_fit.predict(target_index) * factor).ceil() as i64).max(0);
        let efficiency = if staff_needed > 0 {
            predicted_revenue / staff_needed as f64
        } else {
            0.0
        };

        Ok(Forecast {
            year,
            month,
            target_label: format!("{} {}", month_name(month), year),
            predicted_revenue,
            staff_needed,
            efficiency,
            seasonality_factor: factor,
            historical_max_revenue: revenues.iter().copied().fold(0.0, f64::max),
            historical_max_staff: buckets.iter().map(|b| b.staff).max().unwrap_or(0),
            buckets: buckets.len(),
        })
    }

    /// Plain-text summary handed to the advisor
    pub fn advice_context(&self, forecast: &Forecast) -> String {
        format!(
            "Context:\n\
             - Target Month: {}\n\
             - Predicted Revenue: RM {:.2}\n\
             - Predicted Staff Need: {}\n\
             - Historical Max Revenue: RM {:.2}\n\
             - Historical Max Staff Used: {}\n\
             \n\
             Task:\n\
             Compare the prediction against history.\n\
             If predicted staff > history max, warn about hiring.\n\
             If predicted revenue is huge, warn about kitchen capacity.\n\
             If revenue is low, suggest marketing.",
            forecast.target_label,
            forecast.predicted_revenue,
            forecast.staff_needed,
            forecast.historical_max_revenue,
            forecast.historical_max_staff
        )
    }
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Mean revenue of `month` buckets over the mean of all buckets; 1.0 when
/// either is undefined
fn seasonality_factor(buckets: &[MonthlyBucket], month: u32) -> f64 {
    let same_month: Vec<f64> = buckets.iter().filter(|b| b.month == month).map(|b| b.revenue).collect();
    if same_month.is_empty() || buckets.is_empty() {
        return 1.0;
    }
    let global = buckets.iter().map(|b| b.revenue).sum::<f64>() / buckets.len() as f64;
    if global <= 0.0 {
        return 1.0;
    }
    let month_mean = same_month.iter().sum::<f64>() / same_month.len() as f64;
    month_mean / global
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderbook::{RawTable, core::normalize};

    fn table(text: &str) -> OrderTable {
        normalize(RawTable::parse_csv(text.as_bytes()).unwrap())
    }

    /// Six consecutive months, revenue 1000..6000 and staff 2..12
    fn rising_half_year() -> OrderTable {
        let mut csv = String::from("Date,Customer_Name,Pax,Pramusaji,Event_Type,Revenue\n");
        for month in 1..=6 {
            // Two orders in each month to exercise bucketing
            csv.push_str(&format!("2025-{:02}-03,A,10,{},Wedding,{}\n", month, month, month * 400));
            csv.push_str(&format!("2025-{:02}-20,B,10,{},Wedding,{}\n", month, month, month * 600));
        }
        csv.push_str("someday,C,10,50,Wedding,99999\n");
        table(&csv)
    }

    #[test]
    fn test_buckets_group_by_month() {
        let buckets = monthly_buckets(&rising_half_year());
        assert_eq!(buckets.len(), 6);
        assert_eq!(buckets[0], MonthlyBucket { year: 2025, month: 1, revenue: 1000.0, staff: 2 });
        assert_eq!(buckets[5].revenue, 6000.0);
        assert_eq!(buckets[5].staff, 12);
    }

    #[test]
    fn test_linear_fit() {
        let fit = LinearFit::over_index(&[1000.0, 2000.0, 3000.0, 4000.0, 5000.0, 6000.0]);
        assert_eq!(fit.slope, 1000.0);
        assert_eq!(fit.intercept, 1000.0);
        assert_eq!(fit.predict(6.0), 7000.0);

        let flat = LinearFit::over_index(&[5.0]);
        assert_eq!(flat.slope, 0.0);
        assert_eq!(flat.intercept, 5.0);
    }

    #[test]
    fn test_next_month_without_seasonal_history() {
        let engine = ForecastEngine::new();
        let forecast = engine.forecast(&rising_half_year(), 2025, 7).unwrap();
        assert_eq!(forecast.seasonality_factor, 1.0);
        assert_eq!(forecast.predicted_revenue, 7000.0);
        assert_eq!(forecast.staff_needed, 14);
        assert_eq!(forecast.efficiency, 500.0);
        assert_eq!(forecast.historical_max_revenue, 6000.0);
        assert_eq!(forecast.historical_max_staff, 12);
        assert_eq!(forecast.target_label, "July 2025");
    }

    #[test]
    fn test_seasonality_scales_prediction() {
        let engine = ForecastEngine::new();
        // January 2026 is 12 months after the last bucket: index 17
        let forecast = engine.forecast(&rising_half_year(), 2026, 1).unwrap();
        let factor = 1000.0 / 3500.0;
        assert!((forecast.seasonality_factor - factor).abs() < 1e-9);
        assert!((forecast.predicted_revenue - 18000.0 * factor).abs() < 1e-6);
        // 36 staff × 0.2857 = 10.29, rounded up
        assert_eq!(forecast.staff_needed, 11);
    }

    #[test]
    fn test_declining_trend_is_clamped_at_zero() {
        let mut csv = String::from("Date,Pax,Pramusaji,Event_Type,Revenue\n");
        for month in 1..=6 {
            csv.push_str(&format!("2025-{:02}-01,10,{},Wedding,{}\n", month, 14 - 2 * month, 7000 - 1000 * month));
        }
        let engine = ForecastEngine::new();
        let forecast = engine.forecast(&table(&csv), 2027, 12).unwrap();
        assert_eq!(forecast.predicted_revenue, 0.0);
        assert_eq!(forecast.staff_needed, 0);
        assert_eq!(forecast.efficiency, 0.0);
    }

    #[test]
    fn test_insufficient_history() {
        let csv = "Date,Pax,Revenue\n2025-01-01,10,100\n2025-02-01,10,100\n2025-02-11,10,100\n";
        let engine = ForecastEngine::new();
        let error = engine.forecast(&table(csv), 2025, 6).unwrap_err();
        assert!(matches!(
            error,
            WebServerError::InsufficientHistory { buckets: 2, required: 6 }
        ));
        assert!(engine.forecast(&OrderTable::empty(), 2025, 6).is_err());
    }

    #[test]
    fn test_month_out_of_range() {
        let engine = ForecastEngine::new();
        let error = engine.forecast(&rising_half_year(), 2025, 13).unwrap_err();
        assert!(matches!(error, WebServerError::InvalidRequest { .. }));
    }

    #[test]
    fn test_advice_context() {
        let engine = ForecastEngine::new();
        let forecast = engine.forecast(&rising_half_year(), 2025, 7).unwrap();
        let context = engine.advice_context(&forecast);
        assert!(context.contains("- Target Month: July 2025"));
        assert!(context.contains("- Predicted Revenue: RM 7000.00"));
        assert!(context.contains("- Predicted Staff Need: 14"));
        assert!(context.contains("- Historical Max Staff Used: 12"));
        assert!(context.contains("warn about hiring"));
    }
}
