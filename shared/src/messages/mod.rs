//! Message types exchanged between the dashboard, the CLI and the order store
//!
//! - `orders`: order drafts, field updates and mutation outcomes
//! - `advisor`: language-model request modes and extraction results

pub mod orders;
pub mod advisor;

pub use orders::{FieldUpdates, MutationFailure, MutationOutcome, OrderDraft};
pub use advisor::{AdviceMode, ExtractedOrder};
