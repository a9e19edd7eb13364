//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the parsed config and a registry of live sessions. Dashboards
//! themselves are owned by their websocket task, not by the registry; the
//! registry only records which app and tab each connection is on.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::apps::AppKind;
use crate::config::AppConfig;

/// What the registry knows about one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionInfo {
    pub app: AppKind,
    pub tab: &'static str,
}

/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: Arc<RwLock<HashMap<Uuid, SessionInfo>>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self { config: Arc::new(config), sessions: Arc::new(RwLock::new(HashMap::new())) }
    }

    pub async fn register(&self, client_id: Uuid, info: SessionInfo) {
        self.sessions.write().await.insert(client_id, info);
    }

    pub async fn set_tab(&self, client_id: Uuid, tab: &'static str) {
        if let Some(info) = self.sessions.write().await.get_mut(&client_id) {
            info.tab = tab;
        }
    }

    pub async fn unregister(&self, client_id: Uuid) {
        self.sessions.write().await.remove(&client_id);
    }

    /// Number of live sessions per app.
    pub async fn session_counts(&self) -> HashMap<AppKind, usize> {
        let sessions = self.sessions.read().await;
        let mut counts = HashMap::new();
        for info in sessions.values() {
            *counts.entry(info.app).or_insert(0) += 1;
        }
        counts
    }
}
