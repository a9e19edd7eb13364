//! Smart Garden: sensor monitor, actuators, plants, and alerts.

use crate::config::AppConfig;
use crate::model::Plant;
use crate::panels::{AlertsPanel, ControlsPanel, MetricsPanel, Panel, PlantsPanel, TrendPanel};
use crate::sim::alerts::AlertGenerator;
use crate::sim::metric::MetricSpec;
use crate::sim::trend::{AxisSpec, SeriesSpec, TrendSpec};

use super::{TabSpec, every};

pub const TABS: &[TabSpec] = &[
    TabSpec { key: "monitor", label: "Monitor" },
    TabSpec { key: "control", label: "Control" },
    TabSpec { key: "analytics", label: "Analytics" },
    TabSpec { key: "plants", label: "My Plants" },
    TabSpec { key: "notifications", label: "Alerts" },
];

pub const SENSORS: &[MetricSpec] = &[
    MetricSpec {
        key: "moisture",
        label: "Soil Moisture",
        unit: "%",
        initial: 45.0,
        delta: 1.0,
        min: 0.0,
        max: Some(100.0),
        decimals: None,
    },
    MetricSpec {
        key: "temperature",
        label: "Temperature",
        unit: "°C",
        initial: 22.0,
        delta: 0.25,
        min: 0.0,
        max: Some(40.0),
        decimals: Some(1),
    },
    MetricSpec {
        key: "humidity",
        label: "Humidity",
        unit: "%",
        initial: 40.0,
        delta: 0.5,
        min: 0.0,
        max: Some(100.0),
        decimals: None,
    },
    MetricSpec {
        key: "light",
        label: "Light Intensity",
        unit: "lux",
        initial: 300.0,
        delta: 5.0,
        min: 0.0,
        max: None,
        decimals: None,
    },
];

pub const TRENDS: TrendSpec = TrendSpec {
    title: "Recent Sensor Trends",
    series: &[
        SeriesSpec {
            name: "Soil Moisture (%)",
            base: 40.0,
            spread: 10.0,
            axis_id: "y",
            border: "#3A5F0B",
            background: "#B3E8B3",
        },
        SeriesSpec {
            name: "Temperature (°C)",
            base: 20.0,
            spread: 5.0,
            axis_id: "y1",
            border: "#FF5733",
            background: "#FFD2C2",
        },
    ],
    axes: &[
        AxisSpec { id: "y", position: "left", min: 0.0, max: 100.0 },
        AxisSpec { id: "y1", position: "right", min: 0.0, max: 40.0 },
    ],
};

pub const ALERTS: &[&str] = &[
    "Soil moisture below threshold!",
    "Water tank running low!",
    "Temperature too high!",
    "Fertilizer level critically low!",
    "Light intensity insufficient!",
    "High humidity detected!",
];

const SEED_PLANTS: &[(&str, &str, &str)] = &[
    (
        "Basil",
        "https://images.unsplash.com/photo-1611412263629-1db24f34b4cf?auto=format&fit=crop&w=400&q=80",
        "Loves sunlight and consistent watering every 2 days.",
    ),
    (
        "Mint",
        "https://images.unsplash.com/photo-1590086872039-8cdf2118555f?auto=format&fit=crop&w=400&q=80",
        "Keep soil moist. Great for fresh tea!",
    ),
    (
        "Tomato",
        "https://images.unsplash.com/photo-1630523205302-9ead04bd7ba1?auto=format&fit=crop&w=400&q=80",
        "Thrives under plenty of light and consistent feeding.",
    ),
];

fn seed_plants() -> Vec<Plant> {
    SEED_PLANTS
        .iter()
        .zip(1..)
        .map(|(&(name, photo_url, notes), id)| Plant {
            id,
            name: name.into(),
            photo_url: photo_url.into(),
            notes: notes.into(),
        })
        .collect()
}

pub(super) fn mount(tab: &str, config: &AppConfig) -> Panel {
    match tab {
        "control" => Panel::Controls(ControlsPanel::mount()),
        "analytics" => Panel::Trend(TrendPanel::mount(
            "garden.analytics",
            TRENDS,
            config.trend_window,
            every(config, 2),
        )),
        "plants" => Panel::Plants(PlantsPanel::new(seed_plants())),
        "notifications" => Panel::Alerts(AlertsPanel::mount(
            "garden.notifications",
            AlertGenerator::new(config.alert_probability, ALERTS),
            every(config, 3),
        )),
        // "monitor" and anything unrecognized.
        _ => Panel::Metrics(MetricsPanel::mount("garden.monitor", SENSORS, every(config, 1))),
    }
}
