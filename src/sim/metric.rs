//! Bounded random-walk metrics.
//!
//! DESIGN
//! ======
//! Each tick computes `next = clamp(round(prev + uniform(-d, d)), lo, hi)`
//! independently per metric. Rounding is optional and happens before the
//! clamp, so the clamp invariant `lo <= value <= hi` holds after every step
//! no matter how the rounding lands. An absent upper bound means the metric
//! is only floored.

use rand::Rng;
use serde::Serialize;

/// Static description of one simulated metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub initial: f64,
    /// Maximum absolute change per tick.
    pub delta: f64,
    pub min: f64,
    pub max: Option<f64>,
    /// Decimal places kept after each step, if any.
    pub decimals: Option<u32>,
}

impl MetricSpec {
    /// Same spec with a different upper bound.
    #[must_use]
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Clamp `value` into this metric's range.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        let floored = value.max(self.min);
        match self.max {
            Some(max) => floored.min(max),
            None => floored,
        }
    }

    fn round(&self, value: f64) -> f64 {
        let Some(decimals) = self.decimals else {
            return value;
        };
        let factor = 10_f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
        (value * factor).round() / factor
    }

    /// One random-walk step from `prev`.
    pub fn next_value<R: Rng + ?Sized>(&self, prev: f64, rng: &mut R) -> f64 {
        let d = self.delta.abs();
        let jitter = if d > 0.0 { rng.random_range(-d..=d) } else { 0.0 };
        self.clamp(self.round(prev + jitter))
    }
}

/// Live value of one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    spec: MetricSpec,
    value: f64,
}

impl Metric {
    #[must_use]
    pub fn new(spec: MetricSpec) -> Self {
        let value = spec.clamp(spec.initial);
        Self { spec, value }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn spec(&self) -> &MetricSpec {
        &self.spec
    }

    /// Advance one tick and return the new value.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        self.value = self.spec.next_value(self.value, rng);
        self.value
    }

    #[must_use]
    pub fn reading(&self) -> MetricReading {
        MetricReading {
            key: self.spec.key,
            label: self.spec.label,
            unit: self.spec.unit,
            value: self.value,
            min: self.spec.min,
            max: self.spec.max,
        }
    }
}

/// Serializable view of a metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricReading {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: Option<f64>,
}

/// The set of metrics a live panel displays. Each ticks independently.
#[derive(Debug, Clone, Default)]
pub struct MetricBank {
    metrics: Vec<Metric>,
}

impl MetricBank {
    pub fn new(specs: impl IntoIterator<Item = MetricSpec>) -> Self {
        Self { metrics: specs.into_iter().map(Metric::new).collect() }
    }

    /// Advance every metric one tick.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for metric in &mut self.metrics {
            metric.step(rng);
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.spec.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.iter()
    }

    #[must_use]
    pub fn readings(&self) -> Vec<MetricReading> {
        self.metrics.iter().map(Metric::reading).collect()
    }
}

#[cfg(test)]
#[path = "metric_test.rs"]
mod tests;
