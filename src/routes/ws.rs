//! WebSocket handler: one dashboard per connection.
//!
//! DESIGN
//! ======
//! On upgrade, opens a fresh `Dashboard` for the requested app and enters a
//! `select!` loop:
//! - Incoming client frames → parse + dispatch by syscall prefix
//! - Store revisions from the mounted panel → push `panel:state`
//!
//! Handler functions are pure panel logic returning an `Outcome`. The
//! dispatch layer turns that into the reply frame.
//! Outbound frames go through a bounded queue drained by a writer task, so a
//! slow client applies backpressure instead of growing memory.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → send `session:connected` with `client_id`, `app`, `tab`
//! 2. Send the initial `panel:state`
//! 3. Client sends frames → dispatch → one `done` or `error` reply each
//! 4. A tab switch remounts the panel → resubscribe → push `panel:state`
//! 5. Close → drop the dashboard (aborting its ticker) → unregister

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::apps::AppKind;
use crate::dashboard::Dashboard;
use crate::frame::{Data, FRAME_CODE, FRAME_MESSAGE, Frame, Status};
use crate::panels::controls::Switch;
use crate::panels::{Panel, PanelError};
use crate::state::{AppState, SessionInfo};
use crate::ticker::ScopedTask;

// =============================================================================
// OUTCOME
// =============================================================================

/// Result returned by handler functions. Handlers never send frames directly.
enum Outcome {
    /// Send done+data to the sender.
    Reply(Data),
    /// Send empty done to the sender.
    Done,
}

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(
    State(state): State<AppState>,
    Path(app): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let Ok(kind) = app.parse::<AppKind>() else {
        return (StatusCode::NOT_FOUND, format!("unknown app: {app}")).into_response();
    };
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => return rejection.into_response(),
    };
    let tab = params.get("tab").cloned();

    ws.on_upgrade(move |socket| run_ws(socket, state, kind, tab))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(socket: WebSocket, state: AppState, kind: AppKind, tab: Option<String>) {
    let client_id = Uuid::new_v4();
    let (sink, mut stream) = socket.split();

    // Per-connection outbound queue, drained by the writer task.
    let (out_tx, out_rx) = mpsc::channel::<Frame>(state.config.ws_queue);
    let writer = ScopedTask::spawn("ws.writer", write_frames(sink, out_rx));

    let mut dashboard = Dashboard::open(kind, Arc::clone(&state.config), tab.as_deref());
    let active = dashboard.active_tab().key;
    state.register(client_id, SessionInfo { app: kind, tab: active }).await;

    let welcome = Frame::request("session:connected", Data::new())
        .with_data("client_id", client_id.to_string())
        .with_data("app", kind.key())
        .with_data("tab", active);
    info!(%client_id, app = %kind, tab = active, "ws: client connected");

    if out_tx.send(welcome).await.is_ok() && out_tx.send(state_frame(&dashboard)).await.is_ok() {
        let mut feeds = dashboard.feeds();
        let mut generation = dashboard.generation();

        loop {
            tokio::select! {
                msg = stream.next() => {
                    let Some(Ok(msg)) = msg else { break };
                    match msg {
                        Message::Text(text) => {
                            let replies = process_inbound_text(&state, &mut dashboard, client_id, &text).await;
                            if !enqueue(&out_tx, replies).await {
                                break;
                            }
                            if dashboard.generation() != generation {
                                generation = dashboard.generation();
                                feeds = dashboard.feeds();
                                if out_tx.send(state_frame(&dashboard)).await.is_err() {
                                    break;
                                }
                            }
                        }
                        Message::Close(_) => break,
                        _ => {}
                    }
                }
                () = next_change(&mut feeds) => {
                    if out_tx.send(state_frame(&dashboard)).await.is_err() {
                        break;
                    }
                }
            }
        }
    }

    drop(dashboard);
    drop(writer);
    state.unregister(client_id).await;
    info!(%client_id, "ws: client disconnected");
}

/// Drain the outbound queue into the socket until either side closes.
async fn write_frames(mut sink: SplitSink<WebSocket, Message>, mut rx: mpsc::Receiver<Frame>) {
    while let Some(frame) = rx.recv().await {
        if send_frame(&mut sink, &frame).await.is_err() {
            break;
        }
    }
}

async fn enqueue(out_tx: &mpsc::Sender<Frame>, frames: Vec<Frame>) -> bool {
    for frame in frames {
        if out_tx.send(frame).await.is_err() {
            return false;
        }
    }
    true
}

/// Resolve when any feed reports a new revision. Closed feeds never resolve;
/// they belong to an unmounted panel and are replaced on the next remount.
async fn next_change(feeds: &mut [watch::Receiver<u64>]) {
    if feeds.is_empty() {
        return std::future::pending().await;
    }
    let waits = feeds.iter_mut().map(|rx| Box::pin(rx.changed()));
    let (result, _, _) = futures::future::select_all(waits).await;
    if result.is_err() {
        std::future::pending::<()>().await;
    }
}

// =============================================================================
// FRAME DISPATCH
// =============================================================================

/// Parse and process one inbound text frame and return frames for the sender.
///
/// Keeps the websocket transport separate from frame handling, so tests can
/// drive a dashboard without a socket.
async fn process_inbound_text(
    state: &AppState,
    dashboard: &mut Dashboard,
    client_id: Uuid,
    text: &str,
) -> Vec<Frame> {
    let mut req: Frame = match serde_json::from_str(text) {
        Ok(r) => r,
        Err(e) => {
            warn!(%client_id, error = %e, "ws: invalid inbound frame");
            return vec![Frame::gateway_error(format!("invalid json: {e}"))];
        }
    };

    req.from = Some(client_id.to_string());
    info!(%client_id, id = %req.id, syscall = %req.syscall, status = ?req.status, "ws: recv frame");

    if req.status != Status::Request {
        return vec![req.error("only request frames are accepted")];
    }

    let result = match req.prefix() {
        "nav" => handle_nav(state, dashboard, client_id, &req).await,
        "panel" => handle_panel(dashboard, &req),
        "expense" => handle_expense(dashboard, &req),
        "plant" => handle_plant(dashboard, &req),
        "control" => handle_control(dashboard, &req),
        "spot" => handle_spot(dashboard, &req),
        _ => Err(PanelError::UnknownSyscall(req.syscall.clone())),
    };

    let reply = match result {
        Ok(Outcome::Reply(data)) => req.done_with(data),
        Ok(Outcome::Done) => req.done(),
        Err(e) => req.error_from(&e),
    };
    vec![reply.with_panel(dashboard.active_tab().key)]
}

// =============================================================================
// NAV / PANEL HANDLERS
// =============================================================================

async fn handle_nav(
    state: &AppState,
    dashboard: &mut Dashboard,
    client_id: Uuid,
    req: &Frame,
) -> Result<Outcome, PanelError> {
    match req.op() {
        "tabs" => {
            let mut data = Data::new();
            data.insert("tabs".into(), json!(dashboard.tabs()));
            Ok(Outcome::Reply(data))
        }
        "select" => {
            let tab = req.str_field("tab").ok_or(PanelError::MissingField("tab"))?;
            let changed = dashboard.select_tab(tab);
            let active = dashboard.active_tab().key;
            if changed {
                state.set_tab(client_id, active).await;
            }
            let mut data = Data::new();
            data.insert("tab".into(), json!(active));
            data.insert("changed".into(), json!(changed));
            Ok(Outcome::Reply(data))
        }
        _ => Err(PanelError::UnknownSyscall(req.syscall.clone())),
    }
}

fn handle_panel(dashboard: &Dashboard, req: &Frame) -> Result<Outcome, PanelError> {
    match req.op() {
        "get" => Ok(Outcome::Reply(snapshot_data(dashboard))),
        _ => Err(PanelError::UnknownSyscall(req.syscall.clone())),
    }
}

// =============================================================================
// LIST EDITOR HANDLERS
// =============================================================================

fn handle_expense(dashboard: &Dashboard, req: &Frame) -> Result<Outcome, PanelError> {
    match req.op() {
        "draft" => {
            let panel = dashboard.require("expenses", Panel::expenses)?;
            let (field, value) = draft_field(req)?;
            panel.set_field(field, value)?;
            let mut data = Data::new();
            data.insert("draft".into(), json!(panel.draft()));
            Ok(Outcome::Reply(data))
        }
        "add" => {
            let panel = dashboard.require("expenses", Panel::expenses)?;
            let added = panel.submit(form_fields(req, &["description", "amount"]))?;
            let mut data = Data::new();
            data.insert("added".into(), json!(added.is_some()));
            if let Some(expense) = added {
                data.insert("expense".into(), json!(expense));
            }
            Ok(Outcome::Reply(data))
        }
        _ => Err(PanelError::UnknownSyscall(req.syscall.clone())),
    }
}

fn handle_plant(dashboard: &Dashboard, req: &Frame) -> Result<Outcome, PanelError> {
    match req.op() {
        "draft" => {
            let panel = dashboard.require("plants", Panel::plants)?;
            let (field, value) = draft_field(req)?;
            panel.set_field(field, value)?;
            let mut data = Data::new();
            data.insert("draft".into(), json!(panel.draft()));
            Ok(Outcome::Reply(data))
        }
        "add" => {
            let panel = dashboard.require("plants", Panel::plants)?;
            let added = panel.submit(form_fields(req, &["name", "photo_url", "notes"]))?;
            let mut data = Data::new();
            data.insert("added".into(), json!(added.is_some()));
            if let Some(plant) = added {
                data.insert("plant".into(), json!(plant));
            }
            Ok(Outcome::Reply(data))
        }
        _ => Err(PanelError::UnknownSyscall(req.syscall.clone())),
    }
}

// =============================================================================
// CONTROL / SPOT HANDLERS
// =============================================================================

fn handle_control(dashboard: &Dashboard, req: &Frame) -> Result<Outcome, PanelError> {
    match req.op() {
        "toggle" => {
            let panel = dashboard.require("controls", Panel::controls)?;
            let name = req.str_field("switch").ok_or(PanelError::MissingField("switch"))?;
            let on = panel.toggle(name.parse::<Switch>()?);
            let mut data = Data::new();
            data.insert("switch".into(), json!(name));
            data.insert("on".into(), json!(on));
            Ok(Outcome::Reply(data))
        }
        "fertilize" => {
            let panel = dashboard.require("controls", Panel::controls)?;
            let mut data = Data::new();
            data.insert("fertilizer".into(), json!(panel.fertilize()));
            Ok(Outcome::Reply(data))
        }
        _ => Err(PanelError::UnknownSyscall(req.syscall.clone())),
    }
}

fn handle_spot(dashboard: &Dashboard, req: &Frame) -> Result<Outcome, PanelError> {
    let (id, status) = match req.op() {
        "reset" => {
            dashboard.require("lot", Panel::lot)?.reset();
            return Ok(Outcome::Done);
        }
        "toggle" => {
            let lot = dashboard.require("lot", Panel::lot)?;
            let id = spot_id(req)?;
            (id, lot.toggle(id)?)
        }
        "reserve" => {
            let panel = dashboard.require("reservations", Panel::reservations)?;
            let id = spot_id(req)?;
            (id, panel.reserve(id)?)
        }
        "release" => {
            let panel = dashboard.require("reservations", Panel::reservations)?;
            let id = spot_id(req)?;
            (id, panel.release(id)?)
        }
        "occupy" => {
            let panel = dashboard.require("debug", Panel::debug)?;
            let id = spot_id(req)?;
            (id, panel.occupy(id)?)
        }
        _ => return Err(PanelError::UnknownSyscall(req.syscall.clone())),
    };
    let mut data = Data::new();
    data.insert("id".into(), json!(id));
    data.insert("status".into(), json!(status));
    Ok(Outcome::Reply(data))
}

// =============================================================================
// HELPERS
// =============================================================================

fn spot_id(req: &Frame) -> Result<u32, PanelError> {
    req.data
        .get("id")
        .and_then(Value::as_u64)
        .and_then(|id| u32::try_from(id).ok())
        .ok_or(PanelError::MissingField("id"))
}

/// Text of a form field. Numbers are accepted and kept in their JSON form.
fn text_field(req: &Frame, key: &str) -> Option<String> {
    match req.data.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn draft_field(req: &Frame) -> Result<(&str, String), PanelError> {
    let field = req.str_field("field").ok_or(PanelError::MissingField("field"))?;
    Ok((field, text_field(req, "value").unwrap_or_default()))
}

/// The subset of `keys` present in the request, in order.
fn form_fields(req: &Frame, keys: &[&str]) -> Vec<(String, String)> {
    keys.iter()
        .filter_map(|key| text_field(req, key).map(|value| ((*key).to_string(), value)))
        .collect()
}

fn snapshot_data(dashboard: &Dashboard) -> Data {
    match dashboard.snapshot() {
        Value::Object(map) => map.into_iter().collect(),
        _ => Data::new(),
    }
}

/// Unsolicited push of the mounted panel's state.
fn state_frame(dashboard: &Dashboard) -> Frame {
    Frame::push("panel:state", dashboard.active_tab().key, snapshot_data(dashboard))
}

async fn send_frame(sink: &mut SplitSink<WebSocket, Message>, frame: &Frame) -> Result<(), ()> {
    let json = match serde_json::to_string(frame) {
        Ok(j) => j,
        Err(e) => {
            warn!(error = %e, "ws: failed to serialize frame");
            return Err(());
        }
    };
    if frame.status == Status::Error {
        let code = frame.str_field(FRAME_CODE).unwrap_or("-");
        let message = frame.str_field(FRAME_MESSAGE).unwrap_or("-");
        warn!(id = %frame.id, syscall = %frame.syscall, code, message, "ws: send frame status=Error");
    } else if frame.syscall == "panel:state" {
        debug!(id = %frame.id, panel = ?frame.panel, "ws: push state");
    } else {
        info!(id = %frame.id, syscall = %frame.syscall, status = ?frame.status, "ws: send frame");
    }
    sink.send(Message::Text(json.into())).await.map_err(|_| ())
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
