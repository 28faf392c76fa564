//! In-memory session registry

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared::{ProcessId, process_info, process_warn};

use crate::traits::SessionRegistry;

#[derive(Clone)]
pub struct RealSessionRegistry {
    password: Arc<String>,
    sessions: Arc<RwLock<HashSet<Uuid>>>,
}

impl RealSessionRegistry {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: Arc::new(password.into()),
            sessions: Arc::new(RwLock::new(HashSet::new())),
        }
    }
}

#[async_trait]
impl SessionRegistry for RealSessionRegistry {
    async fn login(&self, password: &str) -> Option<Uuid> {
        if password != self.password.as_str() {
            process_warn!(ProcessId::current(), "❌ Rejected login: incorrect password");
            return None;
        }

        let token = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        sessions.insert(token);
        process_info!(ProcessId::current(), "🔐 Session opened ({} active)", sessions.len());
        Some(token)
    }

    async fn is_valid(&self, token: &Uuid) -> bool {
        self.sessions.read().await.contains(token)
    }

    async fn logout(&self, token: &Uuid) -> bool {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(token);
        if removed {
            process_info!(ProcessId::current(), "🔓 Session closed ({} active)", sessions.len());
        }
        removed
    }

    async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
