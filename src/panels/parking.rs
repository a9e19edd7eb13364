//! Parking panels. All three share one `SpotBoard`.
//!
//! - `LotPanel`: grid with click-to-toggle, reset, and a simulated entrance
//!   counter.
//! - `ReservationsPanel`: explicit reserve / release by id.
//! - `DebugPanel`: explicit occupy by id.

use std::time::Duration;

use rand::Rng;
use serde_json::{Value, json};
use tokio::sync::watch;

use super::PanelView;
use crate::model::SpotStatus;
use crate::parking::{SpotBoard, SpotError};
use crate::sim::metric::{Metric, MetricSpec};
use crate::store::Store;
use crate::ticker::{ScopedTask, spawn_ticker};

fn board_snapshot(board: &SpotBoard) -> serde_json::Map<String, Value> {
    let mut map = serde_json::Map::new();
    map.insert("spots".into(), serde_json::to_value(board.spots()).unwrap_or_default());
    map.insert("summary".into(), serde_json::to_value(board.summary()).unwrap_or_default());
    map.insert("policy".into(), json!(board.policy().as_str()));
    map
}

// =============================================================================
// LOT
// =============================================================================

pub struct LotPanel {
    board: SpotBoard,
    occupancy: Store<Metric>,
    _ticker: ScopedTask,
}

impl LotPanel {
    /// `occupancy` is capped at the lot size regardless of its own bound.
    pub fn mount(board: SpotBoard, occupancy: MetricSpec, period: Duration) -> Self {
        let spec = occupancy.with_max(f64::from(board.count()));
        let occupancy = Store::new(Metric::new(spec));
        let ticker = {
            let occupancy = occupancy.clone();
            spawn_ticker("parking.occupancy", period, move || step(&occupancy, &mut rand::rng()))
        };
        Self { board, occupancy, _ticker: ticker }
    }

    /// Variant A click: free becomes reserved, anything else becomes free.
    ///
    /// # Errors
    ///
    /// `UnknownSpot` for an id outside the lot.
    pub fn toggle(&self, id: u32) -> Result<SpotStatus, SpotError> {
        self.board.toggle(id)
    }

    pub fn reset(&self) {
        self.board.reset();
    }

    #[must_use]
    pub fn occupancy(&self) -> f64 {
        self.occupancy.read(Metric::value)
    }

    pub fn tick<R: Rng + ?Sized>(&self, rng: &mut R) {
        step(&self.occupancy, rng);
    }
}

fn step<R: Rng + ?Sized>(occupancy: &Store<Metric>, rng: &mut R) {
    occupancy.update(|m| {
        m.step(rng);
    });
}

impl PanelView for LotPanel {
    fn snapshot(&self) -> Value {
        let mut map = board_snapshot(&self.board);
        let reading = self.occupancy.read(Metric::reading);
        map.insert("occupancy".into(), serde_json::to_value(reading).unwrap_or_default());
        Value::Object(map)
    }

    fn feeds(&self) -> Vec<watch::Receiver<u64>> {
        vec![self.board.store().subscribe(), self.occupancy.subscribe()]
    }
}

// =============================================================================
// RESERVATIONS
// =============================================================================

pub struct ReservationsPanel {
    board: SpotBoard,
}

impl ReservationsPanel {
    #[must_use]
    pub fn mount(board: SpotBoard) -> Self {
        Self { board }
    }

    /// # Errors
    ///
    /// `UnknownSpot`, or `Rejected` under the guarded policy.
    pub fn reserve(&self, id: u32) -> Result<SpotStatus, SpotError> {
        self.board.reserve(id)
    }

    /// # Errors
    ///
    /// `UnknownSpot`, or `Rejected` under the guarded policy.
    pub fn release(&self, id: u32) -> Result<SpotStatus, SpotError> {
        self.board.release(id)
    }
}

impl PanelView for ReservationsPanel {
    fn snapshot(&self) -> Value {
        Value::Object(board_snapshot(&self.board))
    }

    fn feeds(&self) -> Vec<watch::Receiver<u64>> {
        vec![self.board.store().subscribe()]
    }
}

// =============================================================================
// DEBUG
// =============================================================================

pub struct DebugPanel {
    board: SpotBoard,
}

impl DebugPanel {
    #[must_use]
    pub fn mount(board: SpotBoard) -> Self {
        Self { board }
    }

    /// # Errors
    ///
    /// `UnknownSpot`, or `Rejected` under the guarded policy.
    pub fn occupy(&self, id: u32) -> Result<SpotStatus, SpotError> {
        self.board.occupy(id)
    }
}

impl PanelView for DebugPanel {
    fn snapshot(&self) -> Value {
        Value::Object(board_snapshot(&self.board))
    }

    fn feeds(&self) -> Vec<watch::Receiver<u64>> {
        vec![self.board.store().subscribe()]
    }
}

#[cfg(test)]
#[path = "parking_test.rs"]
mod tests;
