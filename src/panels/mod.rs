//! Panels: the state containers a view router mounts.
//!
//! DESIGN
//! ======
//! Each panel owns its state in one or more `Store`s and, when it simulates
//! live data, a `ScopedTask` ticker. Mounting builds everything fresh;
//! dropping the panel drops the ticker (aborting it) and the state with it.
//!
//! The session talks to whichever panel is mounted through two calls:
//! `snapshot` (serialize the current state) and `feeds` (one revision
//! receiver per store, woken on every accepted mutation). Panel-specific
//! operations are reached through the typed accessors on `Panel`.

pub mod alerts;
pub mod controls;
pub mod editor;
pub mod expenses;
pub mod info;
pub mod metrics;
pub mod parking;
pub mod plants;
pub mod trend;

use serde_json::Value;
use tokio::sync::watch;

use crate::frame::ErrorCode;
use crate::parking::SpotError;

pub use alerts::AlertsPanel;
pub use controls::ControlsPanel;
pub use expenses::ExpensesPanel;
pub use info::{ProfilePanel, SummaryPanel, TipsPanel};
pub use metrics::MetricsPanel;
pub use parking::{DebugPanel, LotPanel, ReservationsPanel};
pub use plants::PlantsPanel;
pub use trend::TrendPanel;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    #[error("{wanted} panel is not mounted (active tab: {active})")]
    NotActive { wanted: &'static str, active: &'static str },
    #[error("unknown syscall: {0}")]
    UnknownSyscall(String),
    #[error("{0} required")]
    MissingField(&'static str),
    #[error("unknown form field: {0}")]
    UnknownField(String),
    #[error("amount is not a number: {0}")]
    InvalidAmount(String),
    #[error("unknown switch: {0}")]
    UnknownSwitch(String),
    #[error(transparent)]
    Spot(#[from] SpotError),
}

impl ErrorCode for PanelError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotActive { .. } => "E_PANEL_NOT_ACTIVE",
            Self::UnknownSyscall(_) => "E_UNKNOWN_SYSCALL",
            Self::MissingField(_) => "E_MISSING_FIELD",
            Self::UnknownField(_) => "E_UNKNOWN_FIELD",
            Self::InvalidAmount(_) => "E_INVALID_AMOUNT",
            Self::UnknownSwitch(_) => "E_UNKNOWN_SWITCH",
            Self::Spot(e) => e.error_code(),
        }
    }
}

// =============================================================================
// VIEW
// =============================================================================

/// What a session needs from a mounted panel.
pub trait PanelView {
    /// Serialized current state.
    fn snapshot(&self) -> Value;

    /// One receiver per backing store. Static panels return none.
    fn feeds(&self) -> Vec<watch::Receiver<u64>>;
}

/// Every panel kind an app can mount.
pub enum Panel {
    Summary(SummaryPanel),
    Tips(TipsPanel),
    Profile(ProfilePanel),
    Expenses(ExpensesPanel),
    Plants(PlantsPanel),
    Metrics(MetricsPanel),
    Trend(TrendPanel),
    Alerts(AlertsPanel),
    Controls(ControlsPanel),
    Lot(LotPanel),
    Reservations(ReservationsPanel),
    Debug(DebugPanel),
}

impl Panel {
    /// Stable name of the panel kind, used in logs and snapshots.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Summary(_) => "summary",
            Self::Tips(_) => "tips",
            Self::Profile(_) => "profile",
            Self::Expenses(_) => "expenses",
            Self::Plants(_) => "plants",
            Self::Metrics(_) => "metrics",
            Self::Trend(_) => "trend",
            Self::Alerts(_) => "alerts",
            Self::Controls(_) => "controls",
            Self::Lot(_) => "lot",
            Self::Reservations(_) => "reservations",
            Self::Debug(_) => "debug",
        }
    }

    fn view(&self) -> &dyn PanelView {
        match self {
            Self::Summary(p) => p,
            Self::Tips(p) => p,
            Self::Profile(p) => p,
            Self::Expenses(p) => p,
            Self::Plants(p) => p,
            Self::Metrics(p) => p,
            Self::Trend(p) => p,
            Self::Alerts(p) => p,
            Self::Controls(p) => p,
            Self::Lot(p) => p,
            Self::Reservations(p) => p,
            Self::Debug(p) => p,
        }
    }

    #[must_use]
    pub fn expenses(&self) -> Option<&ExpensesPanel> {
        match self {
            Self::Expenses(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn plants(&self) -> Option<&PlantsPanel> {
        match self {
            Self::Plants(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn controls(&self) -> Option<&ControlsPanel> {
        match self {
            Self::Controls(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn lot(&self) -> Option<&LotPanel> {
        match self {
            Self::Lot(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn reservations(&self) -> Option<&ReservationsPanel> {
        match self {
            Self::Reservations(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn debug(&self) -> Option<&DebugPanel> {
        match self {
            Self::Debug(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn metrics(&self) -> Option<&MetricsPanel> {
        match self {
            Self::Metrics(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn trend(&self) -> Option<&TrendPanel> {
        match self {
            Self::Trend(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn alerts(&self) -> Option<&AlertsPanel> {
        match self {
            Self::Alerts(p) => Some(p),
            _ => None,
        }
    }
}

impl PanelView for Panel {
    fn snapshot(&self) -> Value {
        self.view().snapshot()
    }

    fn feeds(&self) -> Vec<watch::Receiver<u64>> {
        self.view().feeds()
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
