//! Column names of the persisted order table.
//!
//! These MUST match the header row of the order file. Deployments may carry
//! extra columns; those are not listed here and are passed through untouched.

pub const DATE: &str = "Date";
pub const CUSTOMER_NAME: &str = "Customer_Name";
pub const PHONE_NUMBER: &str = "Phone_Number";
pub const ORDER_TITLE: &str = "Order_Title";
pub const DETAILS: &str = "Details";
pub const PAX: &str = "Pax";
/// Service-staff count
pub const PRAMUSAJI: &str = "Pramusaji";
pub const EVENT_TYPE: &str = "Event_Type";
pub const LOCATION: &str = "Location";
pub const MENU_ITEMS: &str = "Menu_Items";
pub const REVENUE: &str = "Revenue";
/// Durable row identity, owned by the store
pub const ORDER_ID: &str = "Order_ID";

/// Header written when the store creates a fresh file
pub const CANONICAL: [&str; 12] = [
    DATE,
    CUSTOMER_NAME,
    PHONE_NUMBER,
    ORDER_TITLE,
    DETAILS,
    PAX,
    PRAMUSAJI,
    EVENT_TYPE,
    LOCATION,
    MENU_ITEMS,
    REVENUE,
    ORDER_ID,
];

/// Columns defaulted to 0 when absent from the file
pub const NUMERIC: [&str; 3] = [PRAMUSAJI, REVENUE, PAX];

/// Columns defaulted to "" when absent from the file
pub const TEXT: [&str; 7] = [
    CUSTOMER_NAME,
    PHONE_NUMBER,
    EVENT_TYPE,
    LOCATION,
    ORDER_TITLE,
    DETAILS,
    MENU_ITEMS,
];

/// Columns produced by loading that must never be written back
pub const DERIVED: [&str; 4] = ["Date_Valid", "Row_ID", "Phone_Clean", "Month_Year"];
