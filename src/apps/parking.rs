//! Parking Lot: one shared spot board behind three panels.

use crate::config::AppConfig;
use crate::panels::{DebugPanel, LotPanel, Panel, ReservationsPanel};
use crate::parking::SpotBoard;
use crate::sim::metric::MetricSpec;

use super::{TabSpec, every};

pub const TABS: &[TabSpec] = &[
    TabSpec { key: "lot", label: "Parking Lot" },
    TabSpec { key: "reservations", label: "Reservations" },
    TabSpec { key: "debug", label: "Debug" },
];

/// Simulated entrance counter. The upper bound is the lot size.
pub const OCCUPANCY: MetricSpec = MetricSpec {
    key: "occupancy",
    label: "Cars On Site",
    unit: "cars",
    initial: 0.0,
    delta: 1.0,
    min: 0.0,
    max: None,
    decimals: Some(0),
};

pub(super) fn mount(tab: &str, config: &AppConfig, spots: &SpotBoard) -> Panel {
    match tab {
        "reservations" => Panel::Reservations(ReservationsPanel::mount(spots.clone())),
        "debug" => Panel::Debug(DebugPanel::mount(spots.clone())),
        // "lot" and anything unrecognized.
        _ => Panel::Lot(LotPanel::mount(spots.clone(), OCCUPANCY, every(config, 2))),
    }
}
