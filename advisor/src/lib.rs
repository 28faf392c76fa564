//! Client for the hosted language model
//!
//! Two calls only: free-form strategic commentary on a block of business
//! context, and extraction of a structured order from pasted free text.

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod traits;

pub use config::AdvisorConfig;
pub use error::{AdvisorError, AdvisorResult, FailureKind};
pub use services::RealAdvisorClient;
pub use traits::AdvisorClient;
