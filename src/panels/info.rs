//! Static panels: dashboard summary, tips, and profile.
//!
//! Content is fixed at mount and never changes, so none of these panels
//! expose a feed.

use serde::Serialize;
use serde_json::{Value, json};
use tokio::sync::watch;

use super::PanelView;
use crate::model::Profile;

/// Headline figures on the budget dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub total_expenses: f64,
    pub energy_kwh: f64,
    pub savings_potential: f64,
}

pub struct SummaryPanel {
    summary: Summary,
}

impl SummaryPanel {
    #[must_use]
    pub fn mount(summary: Summary) -> Self {
        Self { summary }
    }
}

impl PanelView for SummaryPanel {
    fn snapshot(&self) -> Value {
        json!({ "summary": self.summary })
    }

    fn feeds(&self) -> Vec<watch::Receiver<u64>> {
        Vec::new()
    }
}

pub struct TipsPanel {
    tips: &'static [&'static str],
}

impl TipsPanel {
    #[must_use]
    pub fn mount(tips: &'static [&'static str]) -> Self {
        Self { tips }
    }
}

impl PanelView for TipsPanel {
    fn snapshot(&self) -> Value {
        json!({ "tips": self.tips })
    }

    fn feeds(&self) -> Vec<watch::Receiver<u64>> {
        Vec::new()
    }
}

pub struct ProfilePanel {
    profile: Profile,
}

impl ProfilePanel {
    #[must_use]
    pub fn mount(profile: Profile) -> Self {
        Self { profile }
    }
}

impl PanelView for ProfilePanel {
    fn snapshot(&self) -> Value {
        json!({ "profile": self.profile })
    }

    fn feeds(&self) -> Vec<watch::Receiver<u64>> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_panels_have_no_feeds() {
        let summary = SummaryPanel::mount(Summary { total_expenses: 1.0, energy_kwh: 2.0, savings_potential: 3.0 });
        let tips = TipsPanel::mount(&["one"]);
        let profile = ProfilePanel::mount(Profile { name: "n", email: "e", joined: "j" });
        assert!(summary.feeds().is_empty());
        assert!(tips.feeds().is_empty());
        assert!(profile.feeds().is_empty());
    }

    #[test]
    fn snapshots_expose_content() {
        let summary = SummaryPanel::mount(Summary { total_expenses: 1250.75, energy_kwh: 320.0, savings_potential: 150.5 });
        assert_eq!(summary.snapshot()["summary"]["total_expenses"], 1250.75);
        assert_eq!(TipsPanel::mount(&["a", "b"]).snapshot()["tips"][1], "b");
        let profile = ProfilePanel::mount(Profile { name: "Alex Eco", email: "e", joined: "j" });
        assert_eq!(profile.snapshot()["profile"]["name"], "Alex Eco");
    }
}
