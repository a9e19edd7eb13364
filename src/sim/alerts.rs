//! Probabilistic alert generator and its append-only log.
//!
//! DESIGN
//! ======
//! Each tick draws one uniform value; below `probability` an alert fires,
//! with its message picked uniformly from a fixed catalog. The log prepends
//! (newest first) and never evicts.

use std::collections::VecDeque;

use rand::Rng;
use serde::Serialize;

use crate::ids::IdSequence;
use crate::model::Alert;

/// Default chance of an alert per tick.
pub const DEFAULT_ALERT_PROBABILITY: f64 = 0.3;

#[derive(Debug, Clone, Copy)]
pub struct AlertGenerator {
    probability: f64,
    catalog: &'static [&'static str],
}

impl AlertGenerator {
    /// `probability` is clamped into `[0, 1]`.
    #[must_use]
    pub fn new(probability: f64, catalog: &'static [&'static str]) -> Self {
        Self { probability: probability.clamp(0.0, 1.0), catalog }
    }

    /// Draw once; returns the message when an alert fires.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'static str> {
        if self.catalog.is_empty() {
            return None;
        }
        if rng.random::<f64>() >= self.probability {
            return None;
        }
        let index = rng.random_range(0..self.catalog.len());
        self.catalog.get(index).copied()
    }
}

/// Alerts newest first. Grows without bound.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AlertLog {
    alerts: VecDeque<Alert>,
    #[serde(skip)]
    ids: IdSequence,
}

impl AlertLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a new alert stamped with `time`.
    pub fn record(&mut self, message: &str, time: impl Into<String>) -> Alert {
        let alert = Alert { id: self.ids.next_id(), message: message.to_string(), time: time.into() };
        self.alerts.push_front(alert.clone());
        alert
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    #[must_use]
    pub fn newest(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }
}

#[cfg(test)]
#[path = "alerts_test.rs"]
mod tests;
