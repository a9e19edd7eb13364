//! Notifications panel: probabilistic alerts on a ticker.

use std::time::Duration;

use rand::Rng;
use serde_json::{Value, json};
use tokio::sync::watch;
use tracing::debug;

use super::PanelView;
use crate::clock;
use crate::model::Alert;
use crate::sim::alerts::{AlertGenerator, AlertLog};
use crate::store::Store;
use crate::ticker::{ScopedTask, spawn_ticker};

pub struct AlertsPanel {
    log: Store<AlertLog>,
    generator: AlertGenerator,
    _ticker: ScopedTask,
}

impl AlertsPanel {
    pub fn mount(name: &'static str, generator: AlertGenerator, period: Duration) -> Self {
        let log = Store::new(AlertLog::new());
        let ticker = {
            let log = log.clone();
            spawn_ticker(name, period, move || {
                step(&log, &generator, clock::time_label(), &mut rand::rng());
            })
        };
        Self { log, generator, _ticker: ticker }
    }

    /// Roll once out of band. Returns the alert if one fired.
    pub fn tick<R: Rng + ?Sized>(&self, time: impl Into<String>, rng: &mut R) -> Option<Alert> {
        step(&self.log, &self.generator, time, rng)
    }

    /// Alerts, newest first.
    #[must_use]
    pub fn alerts(&self) -> Vec<Alert> {
        self.log.read(|log| log.iter().cloned().collect())
    }
}

/// Only a fired alert notifies; quiet ticks leave the store untouched.
fn step<R: Rng + ?Sized>(
    log: &Store<AlertLog>,
    generator: &AlertGenerator,
    time: impl Into<String>,
    rng: &mut R,
) -> Option<Alert> {
    let message = generator.roll(rng)?;
    let alert = log.update(|log| log.record(message, time));
    debug!(id = alert.id, message, "alerts: raised");
    Some(alert)
}

impl PanelView for AlertsPanel {
    fn snapshot(&self) -> Value {
        self.log.read(|log| json!({ "alerts": log.iter().collect::<Vec<_>>(), "count": log.len() }))
    }

    fn feeds(&self) -> Vec<watch::Receiver<u64>> {
        vec![self.log.subscribe()]
    }
}
