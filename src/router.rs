//! View router: the selected tab of one app instance.
//!
//! No history, no deep links. Any key outside the tab list resolves to the
//! first tab.

use serde::Serialize;

use crate::apps::TabSpec;

/// Result of a selection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Already on that tab; nothing to remount.
    Unchanged,
    Switched { from: &'static str, to: &'static str },
}

/// Navigation entry as shown to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct ViewRouter {
    tabs: &'static [TabSpec],
    current: usize,
}

impl ViewRouter {
    /// Router positioned on the first tab.
    ///
    /// # Panics
    ///
    /// If `tabs` is empty. Tab tables are compile-time constants.
    #[must_use]
    pub fn new(tabs: &'static [TabSpec]) -> Self {
        assert!(!tabs.is_empty(), "an app needs at least one tab");
        Self { tabs, current: 0 }
    }

    /// Index of `key`, or of the first tab when unrecognized.
    #[must_use]
    pub fn resolve(&self, key: &str) -> usize {
        self.tabs.iter().position(|t| t.key == key).unwrap_or(0)
    }

    #[must_use]
    pub fn current(&self) -> TabSpec {
        self.tabs[self.current]
    }

    pub fn select(&mut self, key: &str) -> Selection {
        let next = self.resolve(key);
        if next == self.current {
            return Selection::Unchanged;
        }
        let from = self.tabs[self.current].key;
        self.current = next;
        Selection::Switched { from, to: self.tabs[next].key }
    }

    #[must_use]
    pub fn entries(&self) -> Vec<TabEntry> {
        self.tabs
            .iter()
            .enumerate()
            .map(|(i, t)| TabEntry { key: t.key, label: t.label, active: i == self.current })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABS: &[TabSpec] = &[
        TabSpec { key: "monitor", label: "Monitor" },
        TabSpec { key: "control", label: "Control" },
        TabSpec { key: "plants", label: "My Plants" },
    ];

    #[test]
    fn starts_on_first_tab() {
        let router = ViewRouter::new(TABS);
        assert_eq!(router.current().key, "monitor");
    }

    #[test]
    fn select_switches_and_reports_both_ends() {
        let mut router = ViewRouter::new(TABS);
        assert_eq!(router.select("plants"), Selection::Switched { from: "monitor", to: "plants" });
        assert_eq!(router.current().label, "My Plants");
    }

    #[test]
    fn reselecting_active_tab_is_unchanged() {
        let mut router = ViewRouter::new(TABS);
        router.select("control");
        assert_eq!(router.select("control"), Selection::Unchanged);
    }

    #[test]
    fn unknown_key_falls_back_to_first_tab() {
        let mut router = ViewRouter::new(TABS);
        router.select("control");
        assert_eq!(router.select("settings"), Selection::Switched { from: "control", to: "monitor" });
        assert_eq!(router.select("also-unknown"), Selection::Unchanged);
    }

    #[test]
    fn entries_flag_only_the_active_tab() {
        let mut router = ViewRouter::new(TABS);
        router.select("plants");
        let entries = router.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries.iter().filter(|e| e.active).count(), 1);
        assert!(entries[2].active);
    }

    #[test]
    #[should_panic(expected = "at least one tab")]
    fn empty_tab_table_panics() {
        let _ = ViewRouter::new(&[]);
    }
}
