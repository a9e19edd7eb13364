//! Live-metric panel: a bank of random-walk metrics on a ticker.

use std::time::Duration;

use rand::Rng;
use serde_json::{Value, json};
use tokio::sync::watch;

use super::PanelView;
use crate::sim::metric::{MetricBank, MetricReading, MetricSpec};
use crate::store::Store;
use crate::ticker::{ScopedTask, spawn_ticker};

pub struct MetricsPanel {
    bank: Store<MetricBank>,
    period: Duration,
    _ticker: ScopedTask,
}

impl MetricsPanel {
    /// Start every metric at its initial value and tick each `period`.
    pub fn mount(name: &'static str, specs: &[MetricSpec], period: Duration) -> Self {
        let bank = Store::new(MetricBank::new(specs.iter().copied()));
        let ticker = {
            let bank = bank.clone();
            spawn_ticker(name, period, move || step(&bank, &mut rand::rng()))
        };
        Self { bank, period, _ticker: ticker }
    }

    /// Advance one tick out of band.
    pub fn tick<R: Rng + ?Sized>(&self, rng: &mut R) {
        step(&self.bank, rng);
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<f64> {
        self.bank.read(|b| b.get(key).map(|m| m.value()))
    }

    #[must_use]
    pub fn readings(&self) -> Vec<MetricReading> {
        self.bank.read(MetricBank::readings)
    }
}

fn step<R: Rng + ?Sized>(bank: &Store<MetricBank>, rng: &mut R) {
    bank.update(|b| b.tick(rng));
}

impl PanelView for MetricsPanel {
    fn snapshot(&self) -> Value {
        json!({
            "metrics": self.readings(),
            "interval_ms": u64::try_from(self.period.as_millis()).unwrap_or(u64::MAX),
        })
    }

    fn feeds(&self) -> Vec<watch::Receiver<u64>> {
        vec![self.bank.subscribe()]
    }
}
