//! Garden actuator controls: three switches and a fertilizer gauge.
//!
//! No timer. Every action is a direct user toggle.

use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;

use super::{PanelError, PanelView};
use crate::store::Store;

pub const FERTILIZER_INITIAL: u8 = 75;
pub const FERTILIZER_STEP: u8 = 10;
pub const FERTILIZER_MAX: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    Pump,
    GrowLight,
    AutoMode,
}

impl FromStr for Switch {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pump" => Ok(Self::Pump),
            "grow_light" => Ok(Self::GrowLight),
            "auto_mode" => Ok(Self::AutoMode),
            other => Err(PanelError::UnknownSwitch(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub pump: bool,
    pub grow_light: bool,
    pub auto_mode: bool,
    /// Percent, `0..=100`.
    pub fertilizer: u8,
}

impl Default for ControlState {
    fn default() -> Self {
        Self { pump: false, grow_light: false, auto_mode: false, fertilizer: FERTILIZER_INITIAL }
    }
}

impl ControlState {
    fn switch_mut(&mut self, switch: Switch) -> &mut bool {
        match switch {
            Switch::Pump => &mut self.pump,
            Switch::GrowLight => &mut self.grow_light,
            Switch::AutoMode => &mut self.auto_mode,
        }
    }
}

pub struct ControlsPanel {
    state: Store<ControlState>,
}

impl ControlsPanel {
    #[must_use]
    pub fn mount() -> Self {
        Self { state: Store::new(ControlState::default()) }
    }

    #[must_use]
    pub fn state(&self) -> ControlState {
        self.state.get()
    }

    /// Flip `switch`; returns its new position.
    pub fn toggle(&self, switch: Switch) -> bool {
        self.state.update(|s| {
            let on = s.switch_mut(switch);
            *on = !*on;
            *on
        })
    }

    /// Add one dose, saturating at the maximum. Returns the new level.
    pub fn fertilize(&self) -> u8 {
        self.state.update(|s| {
            s.fertilizer = s.fertilizer.saturating_add(FERTILIZER_STEP).min(FERTILIZER_MAX);
            s.fertilizer
        })
    }
}

impl PanelView for ControlsPanel {
    fn snapshot(&self) -> Value {
        serde_json::to_value(self.state()).unwrap_or_default()
    }

    fn feeds(&self) -> Vec<watch::Receiver<u64>> {
        vec![self.state.subscribe()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::ErrorCode;

    #[test]
    fn switches_start_off() {
        let panel = ControlsPanel::mount();
        let state = panel.state();
        assert!(!state.pump && !state.grow_light && !state.auto_mode);
        assert_eq!(state.fertilizer, 75);
    }

    #[test]
    fn toggle_flips_only_its_switch() {
        let panel = ControlsPanel::mount();
        assert!(panel.toggle(Switch::GrowLight));
        let state = panel.state();
        assert!(state.grow_light);
        assert!(!state.pump);
        assert!(!panel.toggle(Switch::GrowLight));
    }

    #[test]
    fn fertilizer_saturates_at_max() {
        let panel = ControlsPanel::mount();
        assert_eq!(panel.fertilize(), 85);
        assert_eq!(panel.fertilize(), 95);
        assert_eq!(panel.fertilize(), 100);
        assert_eq!(panel.fertilize(), 100);
    }

    #[test]
    fn switch_names_parse() {
        assert_eq!("auto_mode".parse::<Switch>(), Ok(Switch::AutoMode));
        let err = "sprinkler".parse::<Switch>().unwrap_err();
        assert_eq!(err.error_code(), "E_UNKNOWN_SWITCH");
    }

    #[test]
    fn snapshot_is_flat_state() {
        let panel = ControlsPanel::mount();
        panel.toggle(Switch::Pump);
        let snap = panel.snapshot();
        assert_eq!(snap["pump"], true);
        assert_eq!(snap["fertilizer"], 75);
    }
}
