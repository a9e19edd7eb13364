//! One running dashboard: an app instance, its router, and the mounted panel.
//!
//! DESIGN
//! ======
//! Exactly one panel is mounted at a time. Switching tabs drops the old
//! panel (aborting its ticker and discarding its state) and mounts a fresh
//! one, so returning to a tab always starts from the seed data. Shared app
//! state (the parking board) lives in `App` and survives switches.
//!
//! `generation` increments on every remount. A session compares it after
//! each request to know when its feed receivers are stale.

use std::sync::Arc;

use serde_json::{Value, json};
use tokio::sync::watch;
use tracing::info;

use crate::apps::{App, AppKind, TabSpec};
use crate::config::AppConfig;
use crate::panels::{Panel, PanelError, PanelView};
use crate::router::{Selection, TabEntry, ViewRouter};

pub struct Dashboard {
    app: App,
    config: Arc<AppConfig>,
    router: ViewRouter,
    panel: Panel,
    generation: u64,
}

impl Dashboard {
    /// Open `kind` on its first tab, or on `tab` if given and known.
    #[must_use]
    pub fn open(kind: AppKind, config: Arc<AppConfig>, tab: Option<&str>) -> Self {
        let app = App::open(kind, &config);
        let mut router = ViewRouter::new(kind.tabs());
        if let Some(tab) = tab {
            router.select(tab);
        }
        let current = router.current();
        let panel = app.mount(current.key, &config);
        info!(app = %kind, tab = current.key, panel = panel.kind(), "dashboard: mounted");
        Self { app, config, router, panel, generation: 0 }
    }

    #[must_use]
    pub fn kind(&self) -> AppKind {
        self.app.kind()
    }

    #[must_use]
    pub fn active_tab(&self) -> TabSpec {
        self.router.current()
    }

    #[must_use]
    pub fn tabs(&self) -> Vec<TabEntry> {
        self.router.entries()
    }

    #[must_use]
    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Route to `key`. Returns `true` when a new panel was mounted.
    pub fn select_tab(&mut self, key: &str) -> bool {
        let Selection::Switched { from, to } = self.router.select(key) else {
            return false;
        };
        let next = self.app.mount(to, &self.config);
        let previous = std::mem::replace(&mut self.panel, next);
        info!(app = %self.kind(), from, panel = previous.kind(), "dashboard: unmounted");
        drop(previous);
        self.generation = self.generation.wrapping_add(1);
        info!(app = %self.kind(), tab = to, panel = self.panel.kind(), "dashboard: mounted");
        true
    }

    /// The mounted panel, if it is the one `wanted` names.
    ///
    /// # Errors
    ///
    /// `NotActive` when a different panel is mounted.
    pub fn require<'a, T>(
        &'a self,
        wanted: &'static str,
        pick: impl FnOnce(&'a Panel) -> Option<&'a T>,
    ) -> Result<&'a T, PanelError> {
        pick(&self.panel).ok_or(PanelError::NotActive { wanted, active: self.router.current().key })
    }

    /// Current tab plus the panel's own state.
    #[must_use]
    pub fn snapshot(&self) -> Value {
        let tab = self.router.current();
        json!({
            "app": self.kind().key(),
            "tab": tab.key,
            "label": tab.label,
            "kind": self.panel.kind(),
            "generation": self.generation,
            "state": self.panel.snapshot(),
        })
    }

    /// Fresh receivers for the mounted panel's stores.
    #[must_use]
    pub fn feeds(&self) -> Vec<watch::Receiver<u64>> {
        self.panel.feeds()
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
