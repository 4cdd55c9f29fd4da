//! End-to-end checks over a realistic salon document

use std::path::PathBuf;

use chrono::NaiveDate;
use serde_json::json;
use tempfile::TempDir;

use salontrack::services::{available_categories, InsightsAggregator, RecordStore};
use salontrack::types::{CategoryFilter, ChartRow, Collection, InsightsQuery, Timeframe};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("salonData.json")
}

/// Copy the fixture so mutations never touch the checked-in file
fn fixture_store() -> (RecordStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("salonData.json");
    std::fs::copy(fixture_path(), &path).unwrap();
    (RecordStore::new(path), temp_dir)
}

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 15).unwrap()
}

fn row(name: &str, count: u64, revenue: f64) -> ChartRow {
    ChartRow {
        name: name.to_string(),
        count,
        revenue,
    }
}

#[test]
fn test_snapshot_skips_unreadable_records() {
    let (store, _temp) = fixture_store();
    let snapshot = store.snapshot();

    assert!(snapshot.warning.is_none());
    assert_eq!(snapshot.staff.len(), 2);
    assert_eq!(snapshot.services.len(), 4);
    assert_eq!(snapshot.appointments.len(), 8);
    // staff #3 has a non-numeric rating, appointment #9 a negative price
    assert_eq!(snapshot.rejected, 2);
    assert_eq!(snapshot.services[1].price, Some(180.0));
}

#[test]
fn test_monthly_insights_over_fixture() {
    let (store, _temp) = fixture_store();
    let snapshot = store.snapshot();

    let report = InsightsAggregator::aggregate(
        &snapshot.appointments,
        &snapshot.services,
        &InsightsQuery::default(),
        reference(),
    );

    assert_eq!(
        report.rows,
        vec![
            row("Haircuts", 2, 90.0),
            row("Color", 1, 180.0),
            row("Uncategorized", 2, 125.0),
        ]
    );
    assert_eq!(report.diagnostics.malformed_dates, 1);
    assert_eq!(report.diagnostics.unmatched_services, 1);
    assert_eq!(report.diagnostics.invalid_prices, 0);
}

#[test]
fn test_yearly_category_filter_over_fixture() {
    let (store, _temp) = fixture_store();
    let snapshot = store.snapshot();
    let query = InsightsQuery {
        timeframe: Timeframe::Yearly,
        category: CategoryFilter::Only("Color".into()),
    };

    let report =
        InsightsAggregator::aggregate(&snapshot.appointments, &snapshot.services, &query, reference());

    assert_eq!(report.rows, vec![row("Color", 2, 265.0)]);
    assert_eq!(report.total_count(), 2);
}

#[test]
fn test_new_appointment_shows_up_in_insights() {
    let (store, _temp) = fixture_store();
    let created = store
        .create(
            Collection::Appointments,
            json!({"service": "balayage", "date": "2025-11-30", "price": 200}),
        )
        .unwrap();
    assert_eq!(created["id"], 10);

    let snapshot = store.snapshot();
    let report = InsightsAggregator::aggregate(
        &snapshot.appointments,
        &snapshot.services,
        &InsightsQuery::default(),
        reference(),
    );
    assert!(report.rows.contains(&row("Color", 2, 380.0)));
}

#[test]
fn test_writes_preserve_unknown_content() {
    let (store, _temp) = fixture_store();
    store
        .update(Collection::Services, 4, json!({"category": "Treatments"}))
        .unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(raw["settings"]["currency"], "USD");
    assert_eq!(raw["clients"][0]["name"], "Ana");
    // the unreadable staff row is kept verbatim
    assert_eq!(raw["staff"][2]["rating"], "excellent");
    assert_eq!(raw["services"][3]["category"], "Treatments");

    let categories = available_categories(&store.services().records);
    assert_eq!(categories.last().map(String::as_str), Some("Treatments"));
}

#[test]
fn test_clients_are_read_only() {
    let (store, _temp) = fixture_store();
    assert_eq!(store.list_raw(Collection::Clients).len(), 1);
    assert!(store
        .create(Collection::Clients, json!({"name": "Bea"}))
        .is_err());
}
