//! Order book for a catering business
//!
//! Loads the order file into a typed, identity-tagged snapshot and applies
//! row mutations (update, delete, create) as whole-file rewrites.

pub mod core;
pub mod error;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use core::{DatasetLoader, MutationGateway, Order, OrderTable, RawTable, mask_phone_number};
pub use error::{OrderbookError, OrderbookResult};
pub use services::RealCsvStore;
pub use traits::OrderStore;
