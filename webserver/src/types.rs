//! Request and response bodies for the JSON API

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use advisor::{AdvisorError, AdvisorResult, FailureKind};
use orderbook::{Order, core::format_date, mask_phone_number};
use shared::{ExtractedOrder, OrderDraft, RowId};

use crate::core::{Forecast, ScheduleView, YearSnapshot};

/// Shown when the order file is missing, unreadable or has no rows
pub const EMPTY_DATABASE_MESSAGE: &str = "Database not found or empty.";

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleQuery {
    #[serde(default)]
    pub view: ScheduleView,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsQuery {
    /// Latest year with orders when absent
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdviceRequest {
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastRequest {
    pub year: i32,
    /// 1-12
    pub month: u32,
    #[serde(default)]
    pub with_advice: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

/// One order as listed by `GET /api/orders`
#[derive(Debug, Clone, Serialize)]
pub struct OrderRow {
    pub row_id: RowId,
    pub position: usize,
    /// YYYY-MM-DD, or null when the stored date could not be read
    pub date: Option<String>,
    pub date_valid: bool,
    pub customer_name: String,
    pub phone: String,
    pub order_title: String,
    pub details: String,
    pub location: String,
    pub event_type: String,
    pub menu_items: String,
    pub pax: i64,
    pub staff_count: i64,
    pub revenue: f64,
    pub revenue_estimated: bool,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            row_id: order.row_id,
            position: order.position,
            date: order.date.map(format_date),
            date_valid: order.date_valid,
            customer_name: order.customer_name.clone(),
            phone: mask_phone_number(&order.phone_number),
            order_title: order.order_title.clone(),
            details: order.details.clone(),
            location: order.location.clone(),
            event_type: order.event_type.clone(),
            menu_items: order.menu_items.clone(),
            pax: order.pax,
            staff_count: order.staff_count,
            revenue: order.revenue,
            revenue_estimated: order.revenue_estimated,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<OrderRow>,
    pub skipped_lines: usize,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsResponse {
    /// Newest first
    pub years: Vec<i32>,
    pub snapshot: Option<YearSnapshot>,
    pub message: Option<String>,
}

/// Advice text, or the reason there is none.
///
/// Failures are reported in the body with status 200 so the page can show
/// them inline.
#[derive(Debug, Clone, Serialize)]
pub struct AdviceReply {
    pub ok: bool,
    pub advice: Option<String>,
    pub message: Option<String>,
    pub kind: Option<FailureKind>,
}

impl AdviceReply {
    /// Nothing to ask about; the advisor was not called
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            advice: None,
            message: Some(message.into()),
            kind: None,
        }
    }

    pub fn failed(error: &AdvisorError) -> Self {
        Self {
            ok: false,
            advice: None,
            message: Some(error.inline_message()),
            kind: Some(error.kind()),
        }
    }
}

impl From<AdvisorResult<String>> for AdviceReply {
    fn from(result: AdvisorResult<String>) -> Self {
        match result {
            Ok(advice) => Self {
                ok: true,
                advice: Some(advice),
                message: None,
                kind: None,
            },
            Err(e) => Self::failed(&e),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastResponse {
    pub ok: bool,
    pub forecast: Option<Forecast>,
    pub advice: Option<AdviceReply>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractResponse {
    pub ok: bool,
    pub order: Option<ExtractedOrder>,
    /// Order form pre-filled from the extraction
    pub draft: Option<OrderDraft>,
    pub message: Option<String>,
    pub kind: Option<FailureKind>,
}

impl ExtractResponse {
    pub fn extracted(order: ExtractedOrder, draft: OrderDraft) -> Self {
        Self {
            ok: true,
            order: Some(order),
            draft: Some(draft),
            message: None,
            kind: None,
        }
    }

    pub fn failed(error: &AdvisorError) -> Self {
        Self {
            ok: false,
            order: None,
            draft: None,
            message: Some(error.inline_message()),
            kind: Some(error.kind()),
        }
    }
}
