//! Trend panel: a sliding-window chart recorder on a ticker.

use std::time::Duration;

use rand::Rng;
use serde_json::{Value, json};
use tokio::sync::watch;

use super::PanelView;
use crate::clock;
use crate::sim::trend::{ChartData, TrendRecorder, TrendSpec};
use crate::store::Store;
use crate::ticker::{ScopedTask, spawn_ticker};

pub struct TrendPanel {
    recorder: Store<TrendRecorder>,
    period: Duration,
    _ticker: ScopedTask,
}

impl TrendPanel {
    /// Empty chart; one point per series lands each `period`.
    pub fn mount(name: &'static str, spec: TrendSpec, window: usize, period: Duration) -> Self {
        let recorder = Store::new(TrendRecorder::new(spec, window));
        let ticker = {
            let recorder = recorder.clone();
            spawn_ticker(name, period, move || step(&recorder, clock::time_label(), &mut rand::rng()))
        };
        Self { recorder, period, _ticker: ticker }
    }

    /// Record one point under `label` out of band.
    pub fn tick<R: Rng + ?Sized>(&self, label: impl Into<String>, rng: &mut R) {
        step(&self.recorder, label, rng);
    }

    #[must_use]
    pub fn chart(&self) -> ChartData {
        self.recorder.read(TrendRecorder::chart)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.recorder.read(TrendRecorder::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn step<R: Rng + ?Sized>(recorder: &Store<TrendRecorder>, label: impl Into<String>, rng: &mut R) {
    recorder.update(|r| r.record(label, rng));
}

impl PanelView for TrendPanel {
    fn snapshot(&self) -> Value {
        json!({
            "chart": self.chart(),
            "interval_ms": u64::try_from(self.period.as_millis()).unwrap_or(u64::MAX),
        })
    }

    fn feeds(&self) -> Vec<watch::Receiver<u64>> {
        vec![self.recorder.subscribe()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::trend::{AxisSpec, SeriesSpec};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const SPEC: TrendSpec = TrendSpec {
        title: "Sensor Trends",
        series: &[SeriesSpec {
            name: "Soil Moisture (%)",
            base: 40.0,
            spread: 10.0,
            axis_id: "y",
            border: "#4caf50",
            background: "#a5d6a7",
        }],
        axes: &[AxisSpec { id: "y", position: "left", min: 0.0, max: 100.0 }],
    };

    #[tokio::test]
    async fn mounted_chart_starts_empty() {
        let panel = TrendPanel::mount("test", SPEC, 10, Duration::from_secs(2));
        assert!(panel.is_empty());
        assert_eq!(panel.chart().datasets.len(), 1);
    }

    #[tokio::test]
    async fn window_caps_manual_ticks() {
        let panel = TrendPanel::mount("test", SPEC, 10, Duration::from_secs(3600));
        let mut rng = StdRng::seed_from_u64(8);
        for i in 0..25 {
            panel.tick(format!("{i}"), &mut rng);
        }
        let chart = panel.chart();
        assert_eq!(chart.labels.len(), 10);
        assert_eq!(chart.labels.first().map(String::as_str), Some("15"));
        assert_eq!(chart.datasets[0].values.len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_records_with_time_labels() {
        let panel = TrendPanel::mount("test", SPEC, 10, Duration::from_secs(2));
        let mut feed = panel.feeds().remove(0);
        for _ in 0..3 {
            tokio::time::advance(Duration::from_secs(2)).await;
            tokio::time::timeout(Duration::from_millis(10), feed.changed())
                .await
                .expect("tick should notify")
                .unwrap();
        }
        let chart = panel.chart();
        assert_eq!(chart.labels.len(), 3);
        assert!(chart.labels.iter().all(|l| l.len() == 8 && l.as_bytes()[2] == b':'));
    }

    #[tokio::test]
    async fn snapshot_nests_chart() {
        let panel = TrendPanel::mount("test", SPEC, 10, Duration::from_secs(3));
        let snap = panel.snapshot();
        assert_eq!(snap["chart"]["title"], "Sensor Trends");
        assert_eq!(snap["interval_ms"], 3000);
    }
}
