use motorpool_store::error::{StoreError, StoreErrorKind};
use motorpool_store::repo::{DriverNew, DriverUpdate};
use motorpool_store::Store;

fn new_driver(plate: &str, name: &str, captain: &str) -> DriverNew {
    DriverNew {
        plate: plate.to_string(),
        employee_id: format!("E-{plate}"),
        name: name.to_string(),
        phone: Some("0917 123 4567".to_string()),
        telegram_phone: None,
        captain: captain.to_string(),
        schedule: Some("day".to_string()),
        rest_day: None,
        status: None,
    }
}

#[test]
fn driver_crud_roundtrip() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    let driver = store
        .drivers()
        .create(now, new_driver("ABC 123", "Juan Dela Cruz", "Reyes"))
        .expect("create driver");
    assert_eq!(driver.status, "active");
    assert_eq!(driver.created_at, now);

    let fetched = store
        .drivers()
        .get_by_plate("ABC 123")
        .expect("get by plate")
        .expect("driver exists");
    assert_eq!(fetched.name, "Juan Dela Cruz");

    let updated = store
        .drivers()
        .update(
            now + 10,
            driver.id,
            DriverUpdate {
                captain: Some("Santos".to_string()),
                phone: Some(None),
                ..Default::default()
            },
        )
        .expect("update driver");
    assert_eq!(updated.captain, "Santos");
    assert!(updated.phone.is_none());
    assert_eq!(updated.created_at, now);
    assert_eq!(updated.updated_at, now + 10);

    store.drivers().delete(driver.id).expect("delete driver");
    assert!(store
        .drivers()
        .get(driver.id)
        .expect("get driver")
        .is_none());
}

#[test]
fn duplicate_plate_is_rejected() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    store
        .drivers()
        .create(now, new_driver("ABC 123", "Juan", "Reyes"))
        .expect("create driver");

    let err = store
        .drivers()
        .create(now, new_driver("ABC 123", "Pedro", "Santos"))
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::DuplicatePlate);
}

#[test]
fn create_rejects_missing_required_fields() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let mut input = new_driver("ABC 123", "Juan", "Reyes");
    input.captain = "   ".to_string();
    let err = store.drivers().create(1_700_000_000, input).unwrap_err();
    assert!(matches!(err, StoreError::Core(_)));
}

#[test]
fn list_orders_by_captain_then_name() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    for (plate, name, captain) in [
        ("P-3", "Zoe", "alpha"),
        ("P-1", "Ann", "Beta"),
        ("P-2", "Bob", "Alpha"),
    ] {
        store
            .drivers()
            .create(now, new_driver(plate, name, captain))
            .expect("create driver");
    }

    let plates: Vec<String> = store
        .drivers()
        .list_all()
        .expect("list drivers")
        .into_iter()
        .map(|driver| driver.plate)
        .collect();
    assert_eq!(plates, vec!["P-2", "P-3", "P-1"]);
}

#[test]
fn delete_all_clears_roster() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let now = 1_700_000_000;
    for plate in ["A-1", "A-2", "A-3"] {
        store
            .drivers()
            .create(now, new_driver(plate, "Driver", "Reyes"))
            .expect("create driver");
    }
    assert_eq!(store.drivers().delete_all().expect("delete all"), 3);
    assert_eq!(store.drivers().count().expect("count"), 0);
}
