use super::*;
use crate::frame::ErrorCode;
use crate::panels::PanelView;

fn seeded() -> ExpensesPanel {
    ListEditor::new(vec![
        Expense { id: 1, description: "Groceries".into(), amount: 75.20 },
        Expense { id: 2, description: "Utilities".into(), amount: 120.00 },
        Expense { id: 3, description: "Transport".into(), amount: 50.00 },
    ])
}

fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

// =============================================================================
// add
// =============================================================================

#[test]
fn add_appends_with_parsed_amount() {
    let panel = seeded();
    let added = panel
        .submit(fields(&[("description", "Coffee"), ("amount", "4.50")]))
        .unwrap()
        .expect("expense should be added");

    let items = panel.items();
    assert_eq!(items.len(), 4);
    let last = items.last().unwrap();
    assert_eq!(last, &added);
    assert_eq!(last.description, "Coffee");
    assert!((last.amount - 4.5).abs() < f64::EPSILON);
}

#[test]
fn add_clears_draft_on_success() {
    let panel = seeded();
    panel.set_field("description", "Coffee").unwrap();
    panel.set_field("amount", "4.50").unwrap();
    assert!(panel.add().unwrap().is_some());
    assert_eq!(panel.draft(), ExpenseDraft::default());
}

#[test]
fn empty_description_is_silent_noop() {
    let panel = seeded();
    let result = panel.submit(fields(&[("description", ""), ("amount", "4.50")])).unwrap();
    assert!(result.is_none());
    assert_eq!(panel.len(), 3);
    assert_eq!(panel.draft().amount, "4.50");
}

#[test]
fn empty_amount_is_silent_noop() {
    let panel = seeded();
    panel.set_field("description", "Coffee").unwrap();
    assert!(panel.add().unwrap().is_none());
    assert_eq!(panel.len(), 3);
    assert_eq!(panel.draft().description, "Coffee");
}

#[test]
fn whitespace_description_is_still_added() {
    let panel = seeded();
    let added = panel.submit(fields(&[("description", "  "), ("amount", "3")])).unwrap().unwrap();
    assert_eq!(added.description, "  ");
    assert_eq!(panel.len(), 4);
}

#[test]
fn whitespace_amount_is_not_a_number() {
    let panel = seeded();
    let err = panel.submit(fields(&[("description", "Tea"), ("amount", "  ")])).unwrap_err();
    assert_eq!(err, PanelError::InvalidAmount("  ".into()));
    assert_eq!(panel.len(), 3);
}

#[test]
fn non_numeric_amount_is_rejected_without_change() {
    let panel = seeded();
    panel.set_field("description", "Coffee").unwrap();
    let err = panel.submit(fields(&[("amount", "lots")])).unwrap_err();
    assert_eq!(err, PanelError::InvalidAmount("lots".into()));
    assert_eq!(err.error_code(), "E_INVALID_AMOUNT");
    assert_eq!(panel.len(), 3);
    assert_eq!(panel.draft().amount, "");
}

#[test]
fn infinite_amount_is_rejected() {
    let panel = seeded();
    let err = panel.submit(fields(&[("description", "x"), ("amount", "inf")])).unwrap_err();
    assert!(matches!(err, PanelError::InvalidAmount(_)));
}

#[test]
fn unknown_field_is_rejected() {
    let panel = seeded();
    let err = panel.set_field("currency", "EUR").unwrap_err();
    assert_eq!(err.error_code(), "E_UNKNOWN_FIELD");
    assert!(panel.submit(fields(&[("currency", "EUR")])).is_err());
    assert_eq!(panel.len(), 3);
}

// =============================================================================
// ids
// =============================================================================

#[test]
fn ids_continue_after_seed_and_increase() {
    let panel = seeded();
    let mut last = 3;
    for i in 0..20 {
        let exp = panel
            .submit(fields(&[("description", "x"), ("amount", i.to_string().as_str())]))
            .unwrap()
            .unwrap();
        assert!(exp.id > last);
        last = exp.id;
    }
    assert_eq!(last, 23);
}

// =============================================================================
// view
// =============================================================================

#[test]
fn snapshot_lists_expenses_and_draft() {
    let panel = seeded();
    panel.set_field("description", "Tea").unwrap();
    let snap = panel.snapshot();
    assert_eq!(snap["expenses"].as_array().unwrap().len(), 3);
    assert_eq!(snap["expenses"][0]["description"], "Groceries");
    assert_eq!(snap["draft"]["description"], "Tea");
}

#[test]
fn noop_add_with_unchanged_draft_still_reports_none() {
    let panel = seeded();
    assert!(panel.add().unwrap().is_none());
    assert!(!panel.is_empty());
}

#[tokio::test]
async fn successful_add_wakes_feed() {
    let panel = seeded();
    let mut feed = panel.feeds().remove(0);
    panel.submit(fields(&[("description", "Coffee"), ("amount", "4.50")])).unwrap();
    assert!(feed.has_changed().unwrap());
    feed.changed().await.unwrap();
}

#[test]
fn rejected_add_does_not_wake_feed() {
    let panel = seeded();
    let feed = panel.feeds().remove(0);
    let _ = panel.submit(fields(&[("description", "Coffee"), ("amount", "nope")]));
    assert!(!feed.has_changed().unwrap());
}
