//! Service trait definitions for dependency injection

use async_trait::async_trait;
use uuid::Uuid;

/// Access gate: one shared password, any number of bearer sessions.
///
/// Sessions have no expiry; they end on logout or process restart.
#[mockall::automock]
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Open a session when `password` matches the configured secret
    async fn login(&self, password: &str) -> Option<Uuid>;

    /// Whether `token` belongs to an open session
    async fn is_valid(&self, token: &Uuid) -> bool;

    /// Close a session; false when it was not open
    async fn logout(&self, token: &Uuid) -> bool;

    /// Number of open sessions
    async fn active_count(&self) -> usize;
}
