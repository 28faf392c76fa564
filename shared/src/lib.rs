//! Shared types for the catering operations dashboard
//!
//! Contains the order schema, row identity, the per-guest rate table and the
//! request/response messages exchanged between the dashboard, the operator CLI
//! and the order store. Component-internal types stay in their own crates.

pub mod types;
pub mod errors;
pub mod logging;
pub mod messages;

pub use types::*;
pub use errors::*;

pub use messages::{
    // Order entry and mutation
    FieldUpdates, MutationFailure, MutationOutcome, OrderDraft,

    // Language-model exchanges
    AdviceMode, ExtractedOrder,
};
