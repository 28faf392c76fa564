//! Dashboard views computed from a loaded order table

pub mod analytics;
pub mod forecast;
pub mod schedule;

pub use analytics::{AnalyticsEngine, YearSnapshot, month_name};
pub use forecast::{Forecast, ForecastEngine, LinearFit, MonthlyBucket, monthly_buckets};
pub use schedule::{Schedule, ScheduleEntry, ScheduleView, build_schedule};
