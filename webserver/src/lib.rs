//! Operations dashboard for a catering business
//!
//! JSON API over the order file: a password gate, the upcoming/past
//! schedule, yearly analytics, a monthly demand forecast, order entry and
//! editing, and language-model advice and order extraction.

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod state;
pub mod traits;
pub mod types;
pub mod webserver_impl;

// Re-export main types
pub use config::DashboardConfig;
pub use error::{WebServerError, WebServerResult};
pub use state::WebServerState;
pub use webserver_impl::WebServer;

// Re-export trait definitions
pub use traits::SessionRegistry;

// Re-export service implementations
pub use services::RealSessionRegistry;
