#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;
use tracker_core::{NewTrackingRecord, Tenant};
use tracker_db::{Store, StoreLocation};

pub struct TestStore {
    pub _dir: TempDir,
    pub store: Store,
    pub path: PathBuf,
}

pub fn setup_store() -> TestStore {
    let dir = tempfile::tempdir().expect("temp dir");
    let uri = format!("sqlite://{}", dir.path().display());
    let location = StoreLocation::parse(&uri, "test").expect("location");
    let path = dir.path().join("test.sqlite");
    let store = Store::new(location, "emails").expect("store");
    TestStore {
        _dir: dir,
        store,
        path,
    }
}

pub fn new_record(customer_number: &str, tenant: Tenant) -> NewTrackingRecord {
    NewTrackingRecord {
        customer_number: customer_number.to_string(),
        tenant,
        timestamp: "2025-06-01T00:00:00.000000Z".to_string(),
        count: 1,
    }
}
