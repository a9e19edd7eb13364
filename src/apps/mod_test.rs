use super::*;

#[test]
fn keys_round_trip_through_from_str() {
    for kind in AppKind::ALL {
        assert_eq!(kind.key().parse::<AppKind>(), Ok(kind));
        assert_eq!(kind.to_string(), kind.key());
    }
    assert!("weather".parse::<AppKind>().is_err());
}

#[test]
fn tab_lists_match_dashboards() {
    let keys = |kind: AppKind| kind.tabs().iter().map(|t| t.key).collect::<Vec<_>>();
    assert_eq!(keys(AppKind::EcoBudget), ["dashboard", "expenses", "iot", "analytics", "tips", "profile"]);
    assert_eq!(keys(AppKind::Garden), ["monitor", "control", "analytics", "plants", "notifications"]);
    assert_eq!(keys(AppKind::Parking), ["lot", "reservations", "debug"]);
}

#[test]
fn tab_keys_are_unique_per_app() {
    for kind in AppKind::ALL {
        let mut keys: Vec<_> = kind.tabs().iter().map(|t| t.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), kind.tabs().len(), "{kind}");
    }
}

#[tokio::test]
async fn every_tab_mounts_its_panel_kind() {
    let config = AppConfig::default();
    let expected = [
        (AppKind::EcoBudget, ["summary", "expenses", "metrics", "trend", "tips", "profile"].as_slice()),
        (AppKind::Garden, ["metrics", "controls", "trend", "plants", "alerts"].as_slice()),
        (AppKind::Parking, ["lot", "reservations", "debug"].as_slice()),
    ];
    for (kind, panels) in expected {
        let app = App::open(kind, &config);
        assert_eq!(app.kind(), kind);
        for (tab, panel) in kind.tabs().iter().zip(panels) {
            assert_eq!(app.mount(tab.key, &config).kind(), *panel, "{kind}/{}", tab.key);
        }
    }
}

#[tokio::test]
async fn unknown_tab_mounts_first_panel() {
    let config = AppConfig::default();
    assert_eq!(App::open(AppKind::EcoBudget, &config).mount("nope", &config).kind(), "summary");
    assert_eq!(App::open(AppKind::Garden, &config).mount("", &config).kind(), "metrics");
    assert_eq!(App::open(AppKind::Parking, &config).mount("LOT", &config).kind(), "lot");
}

#[tokio::test]
async fn seeded_lists_match_dashboards() {
    let config = AppConfig::default();
    let eco = App::open(AppKind::EcoBudget, &config).mount("expenses", &config);
    let expenses = eco.expenses().unwrap().items();
    assert_eq!(expenses.len(), 3);
    assert_eq!(expenses[1].description, "Utilities");
    assert!((expenses[0].amount - 75.20).abs() < 1e-9);

    let garden = App::open(AppKind::Garden, &config).mount("plants", &config);
    let plants = garden.plants().unwrap().items();
    assert_eq!(plants.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(), ["Basil", "Mint", "Tomato"]);
    assert!(plants.iter().all(|p| p.photo_url.starts_with("https://")));
}

#[tokio::test]
async fn parking_panels_share_the_instance_board() {
    let config = AppConfig { parking_spots: 4, ..AppConfig::default() };
    let app = App::open(AppKind::Parking, &config);
    let reservations = app.mount("reservations", &config);
    reservations.reservations().unwrap().reserve(2).unwrap();

    let lot = app.mount("lot", &config);
    let snap = crate::panels::PanelView::snapshot(&lot);
    assert_eq!(snap["spots"].as_array().unwrap().len(), 4);
    assert_eq!(snap["spots"][2]["status"], "reserved");
}

#[test]
fn garden_temperature_is_bounded_and_rounded() {
    let temp = garden::SENSORS.iter().find(|s| s.key == "temperature").unwrap();
    assert_eq!(temp.max, Some(40.0));
    assert_eq!(temp.decimals, Some(1));
}
