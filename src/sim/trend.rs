//! Trend recorder: sliding-window series feeding a chart.
//!
//! DESIGN
//! ======
//! One tick pushes one label and one value per series, all through windows
//! of the same capacity, so the label sequence and every dataset always
//! have equal length. The chart consumer is opaque: it receives a
//! declarative `ChartData` and nothing else.

use rand::Rng;
use serde::Serialize;

use super::window::SlidingWindow;

/// Default number of points kept per series.
pub const DEFAULT_TREND_WINDOW: usize = 10;

/// One simulated series: `base + uniform[0, spread)` per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSpec {
    pub name: &'static str,
    pub base: f64,
    pub spread: f64,
    pub axis_id: &'static str,
    pub border: &'static str,
    pub background: &'static str,
}

impl SeriesSpec {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.base + rng.random::<f64>() * self.spread
    }
}

/// A value axis the chart should draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisSpec {
    pub id: &'static str,
    pub position: &'static str,
    pub min: f64,
    pub max: f64,
}

/// Everything needed to build a recorder.
#[derive(Debug, Clone, Copy)]
pub struct TrendSpec {
    pub title: &'static str,
    pub series: &'static [SeriesSpec],
    pub axes: &'static [AxisSpec],
}

#[derive(Debug, Clone)]
pub struct TrendRecorder {
    spec: TrendSpec,
    labels: SlidingWindow<String>,
    series: Vec<SlidingWindow<f64>>,
}

impl TrendRecorder {
    #[must_use]
    pub fn new(spec: TrendSpec, window: usize) -> Self {
        Self {
            spec,
            labels: SlidingWindow::new(window),
            series: spec.series.iter().map(|_| SlidingWindow::new(window)).collect(),
        }
    }

    /// Record one tick: sample every series and push it under `label`.
    pub fn record<R: Rng + ?Sized>(&mut self, label: impl Into<String>, rng: &mut R) {
        self.labels.push(label.into());
        for (spec, window) in self.spec.series.iter().zip(&mut self.series) {
            window.push(spec.sample(rng));
        }
    }

    /// Number of points currently held (same for labels and every series).
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn window(&self) -> usize {
        self.labels.capacity()
    }

    /// Declarative chart structure for the rendering collaborator.
    #[must_use]
    pub fn chart(&self) -> ChartData {
        ChartData {
            title: self.spec.title,
            labels: self.labels.to_vec(),
            datasets: self
                .spec
                .series
                .iter()
                .zip(&self.series)
                .map(|(spec, window)| Dataset {
                    name: spec.name,
                    values: window.to_vec(),
                    color_hints: ColorHints { border: spec.border, background: spec.background },
                    axis_id: spec.axis_id,
                })
                .collect(),
            axes: self.spec.axes.to_vec(),
        }
    }
}

// =============================================================================
// CHART DATA
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub title: &'static str,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub axes: Vec<AxisSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub name: &'static str,
    pub values: Vec<f64>,
    pub color_hints: ColorHints,
    pub axis_id: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorHints {
    pub border: &'static str,
    pub background: &'static str,
}

#[cfg(test)]
#[path = "trend_test.rs"]
mod tests;
