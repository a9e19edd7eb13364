//! Runtime configuration parsed from environment variables.
//!
//! Every knob has a typed default; nothing is required. Values that do not
//! parse, or parse to something out of range, are configuration errors
//! rather than silent fallbacks.

use std::time::Duration;

use crate::parking::{DEFAULT_SPOT_COUNT, TransitionPolicy};
use crate::sim::alerts::DEFAULT_ALERT_PROBABILITY;
use crate::sim::trend::DEFAULT_TREND_WINDOW;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TICK_SCALE: f64 = 1.0;
pub const DEFAULT_WS_QUEUE: usize = 256;

/// Upper bound for `SIMBOARD_TICK_SCALE`; keeps scaled intervals finite.
const MAX_TICK_SCALE: f64 = 1000.0;

/// Lower bound for `SIMBOARD_TICK_SCALE`. The fastest base interval (1 s)
/// scaled by it is 1 ms.
const MIN_TICK_SCALE: f64 = 0.001;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: cannot parse '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("{key}: {reason}")]
    OutOfRange { key: &'static str, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    /// Points kept per trend series.
    pub trend_window: usize,
    /// Chance of an alert per notification tick, in `[0, 1]`.
    pub alert_probability: f64,
    pub parking_spots: u32,
    pub parking_policy: TransitionPolicy,
    /// Multiplier applied to every panel tick interval.
    pub tick_scale: f64,
    /// Outbound frame queue per websocket connection.
    pub ws_queue: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            trend_window: DEFAULT_TREND_WINDOW,
            alert_probability: DEFAULT_ALERT_PROBABILITY,
            parking_spots: DEFAULT_SPOT_COUNT,
            parking_policy: TransitionPolicy::default(),
            tick_scale: DEFAULT_TICK_SCALE,
            ws_queue: DEFAULT_WS_QUEUE,
        }
    }
}

impl AppConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `SIMBOARD_TREND_WINDOW`: default 10, at least 1
    /// - `SIMBOARD_ALERT_PROBABILITY`: default 0.3, within `[0, 1]`
    /// - `SIMBOARD_PARKING_SPOTS`: default 16, at least 1
    /// - `SIMBOARD_PARKING_POLICY`: `unconditional` (default) or `guarded`
    /// - `SIMBOARD_TICK_SCALE`: default 1.0, within `[0.001, 1000]`
    /// - `SIMBOARD_WS_QUEUE`: default 256, at least 1
    ///
    /// # Errors
    ///
    /// Returns an error for any value that fails to parse or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error for any value that fails to parse or is out of range.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = parse_or(&lookup, "PORT", defaults.port)?;
        let trend_window = parse_or(&lookup, "SIMBOARD_TREND_WINDOW", defaults.trend_window)?;
        let alert_probability = parse_or(&lookup, "SIMBOARD_ALERT_PROBABILITY", defaults.alert_probability)?;
        let parking_spots = parse_or(&lookup, "SIMBOARD_PARKING_SPOTS", defaults.parking_spots)?;
        let tick_scale = parse_or(&lookup, "SIMBOARD_TICK_SCALE", defaults.tick_scale)?;
        let ws_queue = parse_or(&lookup, "SIMBOARD_WS_QUEUE", defaults.ws_queue)?;
        let parking_policy = match lookup("SIMBOARD_PARKING_POLICY") {
            Some(raw) => raw
                .trim()
                .parse::<TransitionPolicy>()
                .map_err(|_| ConfigError::Invalid { key: "SIMBOARD_PARKING_POLICY", value: raw })?,
            None => defaults.parking_policy,
        };

        if trend_window == 0 {
            return Err(ConfigError::OutOfRange { key: "SIMBOARD_TREND_WINDOW", reason: "must be at least 1" });
        }
        if !(0.0..=1.0).contains(&alert_probability) {
            return Err(ConfigError::OutOfRange {
                key: "SIMBOARD_ALERT_PROBABILITY",
                reason: "must be within [0, 1]",
            });
        }
        if parking_spots == 0 {
            return Err(ConfigError::OutOfRange { key: "SIMBOARD_PARKING_SPOTS", reason: "must be at least 1" });
        }
        if !(MIN_TICK_SCALE..=MAX_TICK_SCALE).contains(&tick_scale) {
            return Err(ConfigError::OutOfRange { key: "SIMBOARD_TICK_SCALE", reason: "must be within [0.001, 1000]" });
        }
        if ws_queue == 0 {
            return Err(ConfigError::OutOfRange { key: "SIMBOARD_WS_QUEUE", reason: "must be at least 1" });
        }

        Ok(Self { port, trend_window, alert_probability, parking_spots, parking_policy, tick_scale, ws_queue })
    }

    /// A panel's base tick interval with `tick_scale` applied.
    #[must_use]
    pub fn scaled(&self, base: Duration) -> Duration {
        base.mul_f64(self.tick_scale)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<T>()
        .map_err(|_| ConfigError::Invalid { key, value: raw })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
