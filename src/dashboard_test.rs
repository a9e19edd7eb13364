use super::*;
use std::time::Duration;

fn open(kind: AppKind) -> Dashboard {
    Dashboard::open(kind, Arc::new(AppConfig::default()), None)
}

#[tokio::test]
async fn opens_on_first_tab() {
    let dash = open(AppKind::EcoBudget);
    assert_eq!(dash.active_tab().key, "dashboard");
    assert_eq!(dash.panel().kind(), "summary");
    assert_eq!(dash.generation(), 0);
}

#[tokio::test]
async fn opens_on_requested_tab() {
    let dash = Dashboard::open(AppKind::Garden, Arc::new(AppConfig::default()), Some("plants"));
    assert_eq!(dash.active_tab().key, "plants");
    assert_eq!(dash.panel().kind(), "plants");
}

#[tokio::test]
async fn unknown_initial_tab_falls_back() {
    let dash = Dashboard::open(AppKind::Parking, Arc::new(AppConfig::default()), Some("garage"));
    assert_eq!(dash.active_tab().key, "lot");
}

#[tokio::test]
async fn select_remounts_and_bumps_generation() {
    let mut dash = open(AppKind::EcoBudget);
    assert!(dash.select_tab("expenses"));
    assert_eq!(dash.panel().kind(), "expenses");
    assert_eq!(dash.generation(), 1);
    assert!(!dash.select_tab("expenses"));
    assert_eq!(dash.generation(), 1);
}

#[tokio::test]
async fn returning_to_a_tab_starts_fresh() {
    let mut dash = open(AppKind::EcoBudget);
    dash.select_tab("expenses");
    let panel = dash.require("expenses", Panel::expenses).unwrap();
    panel.set_field("description", "Coffee").unwrap();
    panel.set_field("amount", "4.50").unwrap();
    panel.add().unwrap();
    assert_eq!(panel.len(), 4);

    dash.select_tab("tips");
    dash.select_tab("expenses");
    assert_eq!(dash.require("expenses", Panel::expenses).unwrap().len(), 3);
}

#[tokio::test]
async fn parking_board_survives_tab_switches() {
    let mut dash = open(AppKind::Parking);
    dash.require("lot", Panel::lot).unwrap().toggle(4).unwrap();
    dash.select_tab("debug");
    dash.select_tab("lot");
    assert_eq!(dash.snapshot()["state"]["spots"][4]["status"], "reserved");
}

#[tokio::test]
async fn require_reports_active_tab() {
    let dash = open(AppKind::Garden);
    let Err(err) = dash.require("controls", Panel::controls) else {
        panic!("controls should not be mounted");
    };
    assert_eq!(err, PanelError::NotActive { wanted: "controls", active: "monitor" });
}

#[tokio::test(start_paused = true)]
async fn switching_away_stops_previous_ticker() {
    let mut dash = open(AppKind::Garden);
    let mut feed = dash.feeds().remove(0);
    tokio::time::advance(Duration::from_secs(1)).await;
    tokio::time::timeout(Duration::from_millis(10), feed.changed())
        .await
        .expect("monitor should tick")
        .unwrap();

    dash.select_tab("control");
    // Dropping the panel drops the last store handle the ticker held.
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
    tokio::time::advance(Duration::from_secs(5)).await;
    assert!(feed.changed().await.is_err(), "sender should be gone once the ticker is aborted");
}

#[tokio::test]
async fn snapshot_names_tab_and_panel() {
    let mut dash = open(AppKind::EcoBudget);
    dash.select_tab("profile");
    let snap = dash.snapshot();
    assert_eq!(snap["app"], "ecobudget");
    assert_eq!(snap["tab"], "profile");
    assert_eq!(snap["kind"], "profile");
    assert_eq!(snap["state"]["profile"]["email"], "alex.eco@example.com");
}

#[tokio::test]
async fn tabs_flag_active_entry() {
    let mut dash = open(AppKind::Parking);
    dash.select_tab("reservations");
    let active: Vec<_> = dash.tabs().into_iter().filter(|t| t.active).map(|t| t.key).collect();
    assert_eq!(active, ["reservations"]);
}
