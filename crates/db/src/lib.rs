mod error;
mod location;
mod migrations;
mod records;
mod store;

use rusqlite::Connection;

pub use error::{DbError, Result};
pub use location::StoreLocation;
pub use store::{Store, TrackingStore};

/// Synchronous connection to one collection of tracking records.
pub struct Db {
    conn: Connection,
    collection: String,
}

impl Db {
    /// Opens the database and makes sure the collection exists.
    pub fn open(location: &StoreLocation, collection: &str) -> Result<Self> {
        location::validate_collection_name(collection)?;
        let conn = match location {
            StoreLocation::Memory => Connection::open_in_memory()?,
            StoreLocation::File(path) => {
                let conn = Connection::open(path)?;
                conn.pragma_update(None, "journal_mode", "WAL")?;
                conn.pragma_update(None, "synchronous", "NORMAL")?;
                conn
            }
        };
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        let mut db = Self {
            conn,
            collection: collection.to_string(),
        };
        db.migrate()?;
        Ok(db)
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn ping(&self) -> Result<()> {
        self.conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::{NewTrackingRecord, RecordId, Tenant};

    fn setup_db() -> Db {
        Db::open(&StoreLocation::Memory, "emails").expect("open db")
    }

    fn new_record(customer_number: &str, tenant: Tenant, ts: &str) -> NewTrackingRecord {
        NewTrackingRecord {
            customer_number: customer_number.to_string(),
            tenant,
            timestamp: ts.to_string(),
            count: 1,
        }
    }

    #[test]
    fn ping_succeeds_on_open_db() {
        let db = setup_db();
        db.ping().expect("ping");
    }

    #[test]
    fn migrate_is_repeatable() {
        let mut db = setup_db();
        db.migrate().expect("second migrate");
        assert_eq!(db.collection(), "emails");
    }

    #[test]
    fn find_matches_customer_and_tenant_exactly() {
        let db = setup_db();
        db.insert_record(&new_record("C1", Tenant::Aadvanto, "2025-01-01T00:00:00.000000Z"))
            .expect("insert");

        assert!(
            db.find_record("C1", Tenant::Aadvanto)
                .expect("find")
                .is_some()
        );
        assert!(db.find_record("C1", Tenant::Movido).expect("find").is_none());
        assert!(
            db.find_record("c1", Tenant::Aadvanto)
                .expect("find")
                .is_none()
        );
    }

    #[test]
    fn increment_updates_count_timestamp_and_tenant() {
        let db = setup_db();
        let id = db
            .insert_record(&new_record("C1", Tenant::Movido, "2025-01-01T00:00:00.000000Z"))
            .expect("insert")
            .expect("id");

        let modified = db
            .increment_record(id, Tenant::Movido, "2025-01-02T00:00:00.000000Z")
            .expect("increment");
        assert_eq!(modified, 1);

        let record = db
            .find_record("C1", Tenant::Movido)
            .expect("find")
            .expect("record");
        assert_eq!(record.id, id);
        assert_eq!(record.count, 2);
        assert_eq!(record.timestamp, "2025-01-02T00:00:00.000000Z");
    }

    #[test]
    fn increment_of_missing_record_modifies_nothing() {
        let db = setup_db();
        let modified = db
            .increment_record(RecordId(42), Tenant::Aadvanto, "2025-01-02T00:00:00.000000Z")
            .expect("increment");
        assert_eq!(modified, 0);
    }
}
