//! App catalog route.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::apps::{AppKind, TabSpec};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AppListing {
    pub key: &'static str,
    pub title: &'static str,
    pub tabs: &'static [TabSpec],
    /// Live websocket sessions on this app.
    pub sessions: usize,
}

pub async fn list_apps(State(state): State<AppState>) -> Json<Vec<AppListing>> {
    let counts = state.session_counts().await;
    let listing = AppKind::ALL
        .into_iter()
        .map(|kind| AppListing {
            key: kind.key(),
            title: kind.title(),
            tabs: kind.tabs(),
            sessions: counts.get(&kind).copied().unwrap_or(0),
        })
        .collect();
    Json(listing)
}
