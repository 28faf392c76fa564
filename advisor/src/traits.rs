//! Service trait definitions for dependency injection

use async_trait::async_trait;

use shared::{AdviceMode, ExtractedOrder};

use crate::error::AdvisorResult;

/// Hosted language-model calls.
///
/// Calls are never retried; a failure is terminal for that one request.
#[mockall::automock]
#[async_trait]
pub trait AdvisorClient: Send + Sync {
    /// Free-form markdown commentary on `context`
    async fn strategic_advice(&self, context: &str, mode: AdviceMode) -> AdvisorResult<String>;

    /// Structured order pulled out of pasted free text
    async fn extract_order(&self, text: &str) -> AdvisorResult<ExtractedOrder>;
}
