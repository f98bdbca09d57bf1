//! End-to-end persistence tests across the core and report crates.
//!
//! A roster is saved, reloaded, sorted and rendered the way the CLI does
//! it, checking that nothing is lost between steps.

use gradebook_core::codec::{decode, encode};
use gradebook_core::report::RosterReport;
use gradebook_core::store::StoreLimits;
use gradebook_core::{RecordInput, RecordStore, SortKey, SortOrder, StoreError};

fn class() -> RecordStore {
    let mut store = RecordStore::new();
    store
        .bulk_load(
            3,
            &[
                RecordInput::new(1003, "Carol", vec![87.0, 93.0, 66.0]),
                RecordInput::new(1001, "Alice", vec![95.0, 85.0, 78.0]),
                RecordInput::new(1002, "Bob", vec![60.0, 55.0, 71.0]),
                RecordInput::new(1004, "张伟", vec![72.0, 81.0, 90.0]),
            ],
        )
        .unwrap();
    store
}

#[test]
fn save_load_sort_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.txt");

    class().save(&path).unwrap();

    let mut loaded = RecordStore::new();
    loaded.load(&path).unwrap();
    assert_eq!(loaded.records(), class().records());

    // Statistics are never persisted.
    assert!(matches!(
        loaded.course_statistics(),
        Err(StoreError::StaleData(_))
    ));

    loaded.sort_by(SortKey::Total, SortOrder::Descending).unwrap();
    let names: Vec<&str> = loaded.records().iter().map(|r| r.name()).collect();
    assert_eq!(names, ["Alice", "Carol", "张伟", "Bob"]);

    loaded.recompute_course_statistics();
    let report = RosterReport::from_store(&loaded, "roster.txt");
    let html = gradebook_report::generate_html(&report);
    assert!(html.contains("张伟"));

    let json_path = dir.path().join("report.json");
    report.save_json(&json_path).unwrap();
    let back = RosterReport::load_json(&json_path).unwrap();
    assert_eq!(back.records, report.records);
    assert_eq!(back.courses, report.courses);
}

#[test]
fn sorted_file_reloads_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.txt");

    let mut store = class();
    store.sort_by_id();
    store.save(&path).unwrap();

    let mut loaded = RecordStore::new();
    loaded.load(&path).unwrap();
    let ids: Vec<i64> = loaded.records().iter().map(|r| r.id()).collect();
    assert_eq!(ids, [1001, 1002, 1003, 1004]);
}

#[test]
fn smaller_limits_reject_large_files() {
    let text = encode(&class());
    let limits = StoreLimits {
        max_students: 3,
        ..StoreLimits::default()
    };
    assert!(matches!(
        decode(&text, limits),
        Err(StoreError::MalformedData { line: 1, .. })
    ));
}
