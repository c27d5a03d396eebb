mod support;

use support::{new_record, setup_store};
use tracker_core::Tenant;
use tracker_db::{DbError, Store, StoreLocation, TrackingStore};

#[tokio::test]
async fn new_store_does_not_touch_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let location = StoreLocation::parse(
        &format!("sqlite://{}", dir.path().display()),
        "email_tracker_db",
    )
    .expect("location");
    let _store = Store::new(location.clone(), "emails").expect("store");

    let StoreLocation::File(path) = location else {
        panic!("expected file location");
    };
    assert!(!path.exists());
}

#[tokio::test]
async fn ping_creates_database_file() {
    let test_store = setup_store();
    test_store.store.ping().await.expect("ping");
    assert!(test_store.path.exists());
}

#[tokio::test]
async fn ping_fails_when_directory_is_missing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("missing");
    let location = StoreLocation::parse(
        &format!("sqlite://{}", missing.display()),
        "email_tracker_db",
    )
    .expect("location");
    let store = Store::new(location, "emails").expect("store");

    let err = store.ping().await.unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));

    std::fs::create_dir_all(&missing).expect("create dir");
    store.ping().await.expect("ping after reconnect");
}

#[tokio::test]
async fn rejects_collection_names_that_are_not_identifiers() {
    let err = Store::new(StoreLocation::Memory, "emails; --").err().expect("error");
    assert!(matches!(err, DbError::InvalidName(_)));
}

#[tokio::test]
async fn clones_share_one_collection() {
    let test_store = setup_store();
    let other = test_store.store.clone();

    let id = test_store
        .store
        .insert_record(&new_record("C123", Tenant::Aadvanto))
        .await
        .expect("insert")
        .expect("id");
    let found = other
        .find_record("C123", Tenant::Aadvanto)
        .await
        .expect("find")
        .expect("record");
    assert_eq!(found.id, id);
    assert_eq!(found.count, 1);
}

#[tokio::test]
async fn records_survive_a_new_store_handle() {
    let test_store = setup_store();
    let id = test_store
        .store
        .insert_record(&new_record("C7", Tenant::Movido))
        .await
        .expect("insert")
        .expect("id");
    let modified = test_store
        .store
        .increment_record(id, Tenant::Movido, "2025-06-01T12:00:00.000000Z")
        .await
        .expect("increment");
    assert_eq!(modified, 1);

    let reopened = Store::new(test_store.store.location().clone(), "emails").expect("store");
    let record = reopened
        .find_record("C7", Tenant::Movido)
        .await
        .expect("find")
        .expect("record");
    assert_eq!(record.count, 2);
    assert_eq!(record.timestamp, "2025-06-01T12:00:00.000000Z");
}

#[tokio::test]
async fn collections_are_isolated() {
    let test_store = setup_store();
    test_store
        .store
        .insert_record(&new_record("C1", Tenant::Aadvanto))
        .await
        .expect("insert");

    let archive = Store::new(test_store.store.location().clone(), "emails_archive").expect("store");
    let found = archive
        .find_record("C1", Tenant::Aadvanto)
        .await
        .expect("find");
    assert!(found.is_none());
}
