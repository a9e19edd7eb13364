//! Frame, the message type exchanged with a dashboard session.
//!
//! ARCHITECTURE
//! ============
//! A websocket client drives one dashboard instance by sending request
//! frames. The session dispatches on the syscall prefix (`nav:`, `expense:`,
//! `spot:`, ...) and answers with exactly one `done` or `error` frame.
//! State pushes (`panel:state`) are unsolicited request frames.
//!
//! Payloads are flat maps. A reply points back at its request through
//! `parent_id` and keeps the request's syscall, so clients can match either.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Data key for the human-readable part of an error.
pub const FRAME_MESSAGE: &str = "message";

/// Data key for the `E_*` code of an error.
pub const FRAME_CODE: &str = "code";

/// Data key for whether the client may resend unchanged.
pub const FRAME_RETRYABLE: &str = "retryable";

pub type Data = HashMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Request,
    Done,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    /// Milliseconds since Unix epoch, stamped at construction.
    pub ts: i64,
    /// Tab the frame concerns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel: Option<String>,
    /// Connection id, stamped by the server on inbound frames.
    #[serde(default)]
    pub from: Option<String>,
    pub syscall: String,
    pub status: Status,
    #[serde(default)]
    pub data: Data,
}

/// Typed errors that can be turned into error frames.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| i64::try_from(d.as_millis()).ok())
        .unwrap_or(0)
}

impl Frame {
    pub fn request(syscall: impl Into<String>, data: Data) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent_id: None,
            ts: now_ms(),
            panel: None,
            from: None,
            syscall: syscall.into(),
            status: Status::Request,
            data,
        }
    }

    /// Server-initiated frame about `panel`, e.g. a state push.
    pub fn push(syscall: impl Into<String>, panel: impl Into<String>, data: Data) -> Self {
        Self::request(syscall, data).with_panel(panel)
    }

    /// Reply to input that never became a frame.
    pub fn gateway_error(message: impl Into<String>) -> Self {
        Self::request("gateway:error", Data::new()).with_data(FRAME_MESSAGE, message.into())
    }

    #[must_use]
    pub fn done(&self) -> Self {
        self.reply(Status::Done, Data::new())
    }

    #[must_use]
    pub fn done_with(&self, data: Data) -> Self {
        self.reply(Status::Done, data)
    }

    /// Error reply with only a message.
    #[must_use]
    pub fn error(&self, message: impl Into<String>) -> Self {
        self.reply(Status::Error, Data::new()).with_data(FRAME_MESSAGE, message.into())
    }

    /// Error reply carrying code, message and retryable flag.
    #[must_use]
    pub fn error_from(&self, err: &(impl ErrorCode + ?Sized)) -> Self {
        self.reply(Status::Error, Data::new())
            .with_data(FRAME_CODE, err.error_code())
            .with_data(FRAME_MESSAGE, err.to_string())
            .with_data(FRAME_RETRYABLE, err.retryable())
    }

    fn reply(&self, status: Status, data: Data) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent_id: Some(self.id),
            ts: now_ms(),
            panel: self.panel.clone(),
            from: None,
            syscall: self.syscall.clone(),
            status,
            data,
        }
    }

    #[must_use]
    pub fn with_panel(mut self, panel: impl Into<String>) -> Self {
        self.panel = Some(panel.into());
        self
    }

    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// `spot` in `spot:reserve`; the whole syscall when there is no colon.
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.syscall.split_once(':').map_or(self.syscall.as_str(), |(prefix, _)| prefix)
    }

    /// `reserve` in `spot:reserve`; empty when there is no colon.
    #[must_use]
    pub fn op(&self) -> &str {
        self.syscall.split_once(':').map_or("", |(_, op)| op)
    }

    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
#[path = "frame_test.rs"]
mod tests;
