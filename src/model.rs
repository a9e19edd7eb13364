//! Plain records held by panels.
//!
//! Every record is flat and owned by exactly one list. Ids come from the
//! owning list's `IdSequence`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,
    pub description: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    pub id: u64,
    pub name: String,
    pub photo_url: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: u64,
    pub message: String,
    /// Wall-clock label (`HH:MM:SS`) at generation time.
    pub time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotStatus {
    Free,
    Reserved,
    Occupied,
}

impl SpotStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Reserved => "reserved",
            Self::Occupied => "occupied",
        }
    }
}

impl std::fmt::Display for SpotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingSpot {
    pub id: u32,
    pub status: SpotStatus,
}

/// Hardcoded account shown on profile panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: &'static str,
    pub email: &'static str,
    pub joined: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spot_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(SpotStatus::Occupied).unwrap(), "occupied");
        let parsed: SpotStatus = serde_json::from_value(serde_json::json!("reserved")).unwrap();
        assert_eq!(parsed, SpotStatus::Reserved);
    }

    #[test]
    fn spot_status_display_matches_wire_name() {
        for status in [SpotStatus::Free, SpotStatus::Reserved, SpotStatus::Occupied] {
            assert_eq!(status.to_string(), serde_json::to_value(status).unwrap());
        }
    }

    #[test]
    fn expense_serde_round_trip() {
        let exp = Expense { id: 4, description: "Coffee".into(), amount: 4.5 };
        let json = serde_json::to_string(&exp).unwrap();
        let restored: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, exp);
    }

    #[test]
    fn plant_uses_snake_case_photo_url() {
        let plant = Plant { id: 1, name: "Basil".into(), photo_url: "u".into(), notes: String::new() };
        let json = serde_json::to_value(&plant).unwrap();
        assert_eq!(json["photo_url"], "u");
    }
}
