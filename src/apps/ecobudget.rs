//! EcoBudget: budget tracker with simulated IoT readings.

use crate::config::AppConfig;
use crate::model::{Expense, Profile};
use crate::panels::info::Summary;
use crate::panels::{ExpensesPanel, MetricsPanel, Panel, ProfilePanel, SummaryPanel, TipsPanel, TrendPanel};
use crate::sim::metric::MetricSpec;
use crate::sim::trend::{AxisSpec, SeriesSpec, TrendSpec};

use super::{TabSpec, every};

pub const TABS: &[TabSpec] = &[
    TabSpec { key: "dashboard", label: "Dashboard" },
    TabSpec { key: "expenses", label: "Expenses" },
    TabSpec { key: "iot", label: "IoT Monitor" },
    TabSpec { key: "analytics", label: "Analytics" },
    TabSpec { key: "tips", label: "Green Tips" },
    TabSpec { key: "profile", label: "Profile" },
];

pub const SUMMARY: Summary = Summary { total_expenses: 1250.75, energy_kwh: 320.0, savings_potential: 150.50 };

pub const PROFILE: Profile = Profile { name: "Alex Eco", email: "alex.eco@example.com", joined: "January 2023" };

pub const TIPS: &[&str] = &[
    "Switch to LED bulbs to reduce energy consumption.",
    "Use smart plugs to monitor and cut off idle devices.",
    "Opt for public transport or carpooling to lower emissions.",
    "Reduce water waste by fixing leaks promptly.",
    "Plan meals to reduce food waste.",
    "Track your energy usage to identify savings.",
];

pub const IOT_METRICS: &[MetricSpec] = &[
    MetricSpec {
        key: "energy",
        label: "Energy Consumption",
        unit: "kWh",
        initial: 300.0,
        delta: 5.0,
        min: 0.0,
        max: None,
        decimals: None,
    },
    MetricSpec {
        key: "water",
        label: "Water Usage",
        unit: "L",
        initial: 500.0,
        delta: 10.0,
        min: 0.0,
        max: None,
        decimals: None,
    },
];

pub const ANALYTICS: TrendSpec = TrendSpec {
    title: "Analytics Overview",
    series: &[
        SeriesSpec {
            name: "Expense Trend ($)",
            base: 100.0,
            spread: 50.0,
            axis_id: "y",
            border: "#00796b",
            background: "#80cbc4",
        },
        SeriesSpec {
            name: "Energy Trend (kWh)",
            base: 300.0,
            spread: 20.0,
            axis_id: "y1",
            border: "#ef5350",
            background: "#ff8a80",
        },
    ],
    axes: &[
        AxisSpec { id: "y", position: "left", min: 0.0, max: 200.0 },
        AxisSpec { id: "y1", position: "right", min: 280.0, max: 350.0 },
    ],
};

fn seed_expenses() -> Vec<Expense> {
    [("Groceries", 75.20), ("Utilities", 120.00), ("Transport", 50.00)]
        .into_iter()
        .zip(1..)
        .map(|((description, amount), id)| Expense { id, description: description.into(), amount })
        .collect()
}

pub(super) fn mount(tab: &str, config: &AppConfig) -> Panel {
    match tab {
        "expenses" => Panel::Expenses(ExpensesPanel::new(seed_expenses())),
        "iot" => Panel::Metrics(MetricsPanel::mount("ecobudget.iot", IOT_METRICS, every(config, 2))),
        "analytics" => Panel::Trend(TrendPanel::mount(
            "ecobudget.analytics",
            ANALYTICS,
            config.trend_window,
            every(config, 3),
        )),
        "tips" => Panel::Tips(TipsPanel::mount(TIPS)),
        "profile" => Panel::Profile(ProfilePanel::mount(PROFILE)),
        // "dashboard" and anything unrecognized.
        _ => Panel::Summary(SummaryPanel::mount(SUMMARY)),
    }
}
