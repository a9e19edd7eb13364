//! Wall-clock labels for ticks and alerts.

use time::OffsetDateTime;

/// Current UTC time as `HH:MM:SS`.
#[must_use]
pub fn time_label() -> String {
    label_for(OffsetDateTime::now_utc())
}

/// Format a timestamp as `HH:MM:SS`.
#[must_use]
pub fn label_for(at: OffsetDateTime) -> String {
    format!("{:02}:{:02}:{:02}", at.hour(), at.minute(), at.second())
}
