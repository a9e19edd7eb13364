//! Parking spot state machine.
//!
//! DESIGN
//! ======
//! Spots move between `free`, `reserved`, and `occupied` via four actions:
//! - `toggle`: free -> reserved, anything else -> free. Occupied is never
//!   entered this way.
//! - `reserve` / `release` / `occupy`: jump straight to reserved / free /
//!   occupied.
//!
//! Whether the explicit actions check the source state is a policy choice,
//! not an accident, so it is a value: `Unconditional` applies them to any
//! spot, `Guarded` only from a sensible source state. Toggle behaves the
//! same under both policies.
//!
//! `SpotBoard` owns the shared list. Every write computes a new list and
//! swaps it in under the store lock, so the three parking panels holding
//! clones of the board all see the same sequence of states.

use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use crate::frame::ErrorCode;
use crate::model::{ParkingSpot, SpotStatus};
use crate::store::Store;

/// Default number of spots in a lot.
pub const DEFAULT_SPOT_COUNT: u32 = 16;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotAction {
    Toggle,
    Reserve,
    Release,
    Occupy,
}

impl SpotAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Toggle => "toggle",
            Self::Reserve => "reserve",
            Self::Release => "release",
            Self::Occupy => "occupy",
        }
    }
}

impl std::fmt::Display for SpotAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Explicit actions apply to any spot regardless of its status.
    #[default]
    Unconditional,
    /// reserve needs `free`, release needs non-`free`, occupy needs
    /// non-`occupied`.
    Guarded,
}

impl TransitionPolicy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unconditional => "unconditional",
            Self::Guarded => "guarded",
        }
    }
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unconditional" => Ok(Self::Unconditional),
            "guarded" => Ok(Self::Guarded),
            other => Err(format!("unknown transition policy '{other}' (expected 'unconditional' or 'guarded')")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpotError {
    #[error("no parking spot with id {0}")]
    UnknownSpot(u32),
    #[error("cannot {action} spot {id} while it is {from}")]
    Rejected { id: u32, from: SpotStatus, action: SpotAction },
}

impl ErrorCode for SpotError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSpot(_) => "E_UNKNOWN_SPOT",
            Self::Rejected { .. } => "E_TRANSITION_REJECTED",
        }
    }
}

// =============================================================================
// TRANSITIONS
// =============================================================================

/// Target status for `action` applied to a spot currently in `from`.
///
/// # Errors
///
/// Returns `SpotError::Rejected` when the guarded policy refuses the move.
pub fn transition(
    id: u32,
    from: SpotStatus,
    action: SpotAction,
    policy: TransitionPolicy,
) -> Result<SpotStatus, SpotError> {
    let allowed = match (policy, action) {
        (_, SpotAction::Toggle) | (TransitionPolicy::Unconditional, _) => true,
        (TransitionPolicy::Guarded, SpotAction::Reserve) => from == SpotStatus::Free,
        (TransitionPolicy::Guarded, SpotAction::Release) => from != SpotStatus::Free,
        (TransitionPolicy::Guarded, SpotAction::Occupy) => from != SpotStatus::Occupied,
    };
    if !allowed {
        return Err(SpotError::Rejected { id, from, action });
    }

    Ok(match action {
        SpotAction::Toggle => match from {
            SpotStatus::Free => SpotStatus::Reserved,
            SpotStatus::Reserved | SpotStatus::Occupied => SpotStatus::Free,
        },
        SpotAction::Reserve => SpotStatus::Reserved,
        SpotAction::Release => SpotStatus::Free,
        SpotAction::Occupy => SpotStatus::Occupied,
    })
}

/// A fresh lot: ids `0..count`, all free.
#[must_use]
pub fn initial_spots(count: u32) -> Vec<ParkingSpot> {
    (0..count)
        .map(|id| ParkingSpot { id, status: SpotStatus::Free })
        .collect()
}

// =============================================================================
// SPOT BOARD
// =============================================================================

/// Counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SpotSummary {
    pub total: usize,
    pub free: usize,
    pub reserved: usize,
    pub occupied: usize,
}

/// The shared spot collection of one parking app instance.
#[derive(Clone)]
pub struct SpotBoard {
    spots: Store<Vec<ParkingSpot>>,
    count: u32,
    policy: TransitionPolicy,
}

impl SpotBoard {
    #[must_use]
    pub fn new(count: u32, policy: TransitionPolicy) -> Self {
        Self { spots: Store::new(initial_spots(count)), count, policy }
    }

    #[must_use]
    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub fn store(&self) -> &Store<Vec<ParkingSpot>> {
        &self.spots
    }

    /// Snapshot of every spot, in id order.
    #[must_use]
    pub fn spots(&self) -> Vec<ParkingSpot> {
        self.spots.get()
    }

    #[must_use]
    pub fn status(&self, id: u32) -> Option<SpotStatus> {
        self.spots
            .read(|spots| spots.iter().find(|s| s.id == id).map(|s| s.status))
    }

    /// Apply `action` to spot `id`, returning its new status.
    ///
    /// # Errors
    ///
    /// `UnknownSpot` for an id outside the lot, `Rejected` when the policy
    /// refuses. Either way no spot changes.
    pub fn apply(&self, id: u32, action: SpotAction) -> Result<SpotStatus, SpotError> {
        let policy = self.policy;
        let result = self.spots.try_update(|spots| {
            let Some(current) = spots.iter().find(|s| s.id == id) else {
                return Err(SpotError::UnknownSpot(id));
            };
            let next_status = transition(id, current.status, action, policy)?;
            let next: Vec<ParkingSpot> = spots
                .iter()
                .map(|s| if s.id == id { ParkingSpot { id, status: next_status } } else { *s })
                .collect();
            *spots = next;
            Ok(next_status)
        });
        if let Err(e) = &result {
            warn!(spot = id, action = %action, error = %e, "parking: transition refused");
        }
        result
    }

    pub fn toggle(&self, id: u32) -> Result<SpotStatus, SpotError> {
        self.apply(id, SpotAction::Toggle)
    }

    pub fn reserve(&self, id: u32) -> Result<SpotStatus, SpotError> {
        self.apply(id, SpotAction::Reserve)
    }

    pub fn release(&self, id: u32) -> Result<SpotStatus, SpotError> {
        self.apply(id, SpotAction::Release)
    }

    pub fn occupy(&self, id: u32) -> Result<SpotStatus, SpotError> {
        self.apply(id, SpotAction::Occupy)
    }

    /// Every spot back to free.
    pub fn reset(&self) {
        self.spots.replace(initial_spots(self.count));
    }

    #[must_use]
    pub fn summary(&self) -> SpotSummary {
        self.spots.read(|spots| {
            let mut summary = SpotSummary { total: spots.len(), ..SpotSummary::default() };
            for spot in spots {
                match spot.status {
                    SpotStatus::Free => summary.free += 1,
                    SpotStatus::Reserved => summary.reserved += 1,
                    SpotStatus::Occupied => summary.occupied += 1,
                }
            }
            summary
        })
    }
}

#[cfg(test)]
#[path = "parking_test.rs"]
mod tests;
