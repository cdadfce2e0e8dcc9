use motorpool_store::Store;
use tempfile::TempDir;

#[test]
fn migrate_is_idempotent() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("first run");
    store.migrate().expect("second run");
    assert_eq!(store.schema_version().expect("version"), 1);
}

#[test]
fn schema_version_is_zero_before_migrating() {
    let store = Store::open_in_memory().expect("open in memory");
    assert_eq!(store.schema_version().expect("version"), 0);
}

#[test]
fn migrations_run_against_a_file_backed_db() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("motorpool.sqlite3");
    let store = Store::open(&path).expect("open file store");
    store.migrate().expect("migrate");
    assert_eq!(store.schema_version().expect("version"), 1);
}
