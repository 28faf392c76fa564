//! Core order logic, free of I/O

pub mod dates;
pub mod gateway;
pub mod loader;
pub mod menu;
pub mod order;
pub mod phone;
pub mod table;

pub use dates::{format_date, parse_date};
pub use gateway::MutationGateway;
pub use loader::{DatasetLoader, estimate_revenue, normalize};
pub use menu::parse_menu_items;
pub use order::{Order, OrderTable};
pub use phone::{mask_phone_number, normalize_phone};
pub use table::RawTable;
