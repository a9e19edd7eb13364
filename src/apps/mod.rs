//! The three dashboards and what each tab mounts.
//!
//! DESIGN
//! ======
//! `AppKind` names an app and lists its tabs. `App` is one running instance:
//! it owns whatever the app shares across its panels (only parking shares
//! anything, the spot board) and mounts a fresh panel for a tab on demand.

pub mod ecobudget;
pub mod garden;
pub mod parking;

use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::config::AppConfig;
use crate::panels::Panel;
use crate::parking::SpotBoard;

/// One navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabSpec {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppKind {
    EcoBudget,
    Garden,
    Parking,
}

impl AppKind {
    pub const ALL: [AppKind; 3] = [AppKind::EcoBudget, AppKind::Garden, AppKind::Parking];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::EcoBudget => "ecobudget",
            Self::Garden => "garden",
            Self::Parking => "parking",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::EcoBudget => "EcoBudget App",
            Self::Garden => "Smart Garden",
            Self::Parking => "Parking Lot Demo",
        }
    }

    /// Tabs in display order. The first is the default.
    #[must_use]
    pub fn tabs(self) -> &'static [TabSpec] {
        match self {
            Self::EcoBudget => ecobudget::TABS,
            Self::Garden => garden::TABS,
            Self::Parking => parking::TABS,
        }
    }
}

impl std::fmt::Display for AppKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AppKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| format!("unknown app '{s}'"))
    }
}

/// A running app instance.
pub enum App {
    EcoBudget,
    Garden,
    Parking { spots: SpotBoard },
}

impl App {
    #[must_use]
    pub fn open(kind: AppKind, config: &AppConfig) -> Self {
        match kind {
            AppKind::EcoBudget => Self::EcoBudget,
            AppKind::Garden => Self::Garden,
            AppKind::Parking => Self::Parking {
                spots: SpotBoard::new(config.parking_spots, config.parking_policy),
            },
        }
    }

    #[must_use]
    pub fn kind(&self) -> AppKind {
        match self {
            Self::EcoBudget => AppKind::EcoBudget,
            Self::Garden => AppKind::Garden,
            Self::Parking { .. } => AppKind::Parking,
        }
    }

    /// Fresh panel for `tab`. Keys outside the app's tab list mount the
    /// first tab's panel.
    #[must_use]
    pub fn mount(&self, tab: &str, config: &AppConfig) -> Panel {
        match self {
            Self::EcoBudget => ecobudget::mount(tab, config),
            Self::Garden => garden::mount(tab, config),
            Self::Parking { spots } => parking::mount(tab, config, spots),
        }
    }
}

/// Base tick period scaled by config.
fn every(config: &AppConfig, secs: u64) -> Duration {
    config.scaled(Duration::from_secs(secs))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
