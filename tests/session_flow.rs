//! Front-end flows across process-like sessions.
//!
//! Each session builds its own [`InventoryLog`] or manager, the way the CLI
//! does per invocation, and only shares state through the document on disk.

use std::fs;

use chrono::{NaiveDate, TimeZone, Utc};
use stockroom::{
    grading, Entity, GradingError, HealthRegistry, InventoryItem, InventoryLog, ItemId, ItemKind,
    LoadOutcome, PersistenceConfig, StockroomError, WarehouseManager,
};
use tempfile::tempdir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

#[test]
fn test_inventory_log_survives_sessions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();

    // Session 1: nothing on disk yet, seed and save.
    let mut first = InventoryLog::new(&path);
    assert_eq!(first.load().unwrap(), LoadOutcome::Absent);
    first.seed_sample_data(now).unwrap();
    assert_eq!(first.save().unwrap(), 5);

    // Session 2: load, mutate, save.
    let mut second = InventoryLog::new(&path);
    assert_eq!(second.load().unwrap(), LoadOutcome::Loaded { count: 5 });
    second.remove(ItemId::new(2)).unwrap();
    second
        .add(InventoryItem::new(6, "Webcam", 7, now).unwrap())
        .unwrap();
    second
        .store_mut()
        .adjust_quantity(ItemId::new(1), -2)
        .unwrap();
    second.save().unwrap();

    // Session 3: sees exactly session 2's state.
    let mut third = InventoryLog::new(&path);
    third.load().unwrap();
    let ids: Vec<u32> = third.items().iter().map(|i| i.id().get()).collect();
    assert_eq!(ids, vec![1, 3, 4, 5, 6]);
    assert_eq!(third.store().get(ItemId::new(1)).unwrap().quantity, 3);
    assert_eq!(
        third.render_lines()[0],
        "ID: 1, Name: Laptop, Qty: 3, Added: 2026-10-18 09:00:00"
    );
}

#[test]
fn test_reseeding_a_loaded_log_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();

    let mut log = InventoryLog::new(&path);
    log.seed_sample_data(now).unwrap();
    log.save().unwrap();

    let mut again = InventoryLog::new(&path);
    again.load().unwrap();
    let err = again.seed_sample_data(now).unwrap_err();
    assert!(matches!(err, StockroomError::Store(ref e) if e.is_duplicate()));
}

#[test]
fn test_corrupt_document_surfaces_as_persistence_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    fs::write(&path, "{ definitely not an array").unwrap();

    let mut log = InventoryLog::new(&path);
    let err = log.load().unwrap_err();

    assert!(err.is_persistence());
    assert!(!err.is_retryable());
    assert!(log.items().is_empty());
}

#[test]
fn test_compact_in_place_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
    let config = PersistenceConfig {
        pretty: false,
        atomic_replace: false,
        ..PersistenceConfig::default()
    };

    let mut log = InventoryLog::with_config(&path, config.clone()).unwrap();
    log.seed_sample_data(now).unwrap();
    log.save().unwrap();

    let body = fs::read_to_string(&path).unwrap();
    assert!(!body.contains('\n'));

    let mut reloaded = InventoryLog::with_config(&path, config).unwrap();
    assert_eq!(reloaded.load().unwrap().loaded_count(), Some(5));
}

#[test]
fn test_warehouse_demo_flow() {
    let mut manager = WarehouseManager::new();
    manager.seed_data(today()).unwrap();

    assert_eq!(
        manager.increase_stock(ItemKind::Electronic, ItemId::new(2), 5).unwrap(),
        20
    );

    let duplicate = stockroom::ElectronicItem::new(1, "Tablet", 5, "Apple", 18).unwrap();
    assert!(manager.electronics_mut().add(duplicate).unwrap_err().is_duplicate());
    assert!(manager
        .remove_item(ItemKind::Grocery, ItemId::new(99))
        .unwrap_err()
        .is_not_found());
    assert!(manager
        .groceries_mut()
        .update_quantity(ItemId::new(1), -10)
        .unwrap_err()
        .is_invalid_value());

    // Rejected operations changed nothing.
    assert_eq!(manager.electronics().get(ItemId::new(1)).unwrap().name, "Laptop");
    assert_eq!(manager.groceries().get(ItemId::new(1)).unwrap().quantity, 50);
    assert_eq!(manager.snapshot().len(), 4);
    assert_eq!(
        manager.report_lines(ItemKind::Grocery)[0],
        "[Grocery] ID: 1, Name: Apples, Expiry: 2026-10-25, Qty: 50"
    );
}

#[test]
fn test_prescription_lookup() {
    let mut registry = HealthRegistry::new();
    registry.seed_data(today()).unwrap();
    registry.build_prescription_map();

    let total: usize = registry
        .patients()
        .ids()
        .into_iter()
        .map(|id| registry.prescriptions_for(id).unwrap().len())
        .sum();
    assert_eq!(total, registry.prescriptions().len());

    assert!(registry
        .prescriptions_for(ItemId::new(404))
        .unwrap_err()
        .is_not_found());
}

#[test]
fn test_grade_report_file_round() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("scores.txt");
    let output = dir.path().join("report.txt");
    fs::write(&input, "1,Alice Smith,91\n2,Bob Jones,55\n\n3,Cara Diaz,70\n").unwrap();

    let students = grading::read_students(&input).unwrap();
    grading::write_report(&students, &output).unwrap();

    let report = fs::read_to_string(&output).unwrap();
    assert_eq!(
        report.lines().collect::<Vec<_>>(),
        vec![
            "Alice Smith (ID: 1): Score = 91, Grade = A",
            "Bob Jones (ID: 2): Score = 55, Grade = D",
            "Cara Diaz (ID: 3): Score = 70, Grade = B",
        ]
    );
}

#[test]
fn test_grade_input_errors() {
    let dir = tempdir().unwrap();

    let missing = grading::read_students(dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(missing, GradingError::Io { .. }));
    assert_eq!(missing.line(), None);

    let input = dir.path().join("scores.txt");
    fs::write(&input, "1,Alice,90\n2,Bob,abc\n").unwrap();
    let err = grading::read_students(&input).unwrap_err();
    assert_eq!(err.line(), Some(2));
}
