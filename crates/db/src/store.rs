use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracker_core::{NewTrackingRecord, RecordId, Tenant, TrackingRecord};

use crate::Db;
use crate::error::{DbError, Result};
use crate::location::{StoreLocation, validate_collection_name};

/// Operations the tracking service needs from a document store.
#[async_trait]
pub trait TrackingStore: Send + Sync {
    /// Lightweight round trip confirming the store is reachable.
    async fn ping(&self) -> Result<()>;

    async fn find_record(
        &self,
        customer_number: &str,
        tenant: Tenant,
    ) -> Result<Option<TrackingRecord>>;

    /// Returns how many records were modified.
    async fn increment_record(
        &self,
        id: RecordId,
        tenant: Tenant,
        timestamp: &str,
    ) -> Result<u64>;

    /// Returns the new record's id, or `None` when nothing was written.
    async fn insert_record(&self, record: &NewTrackingRecord) -> Result<Option<RecordId>>;
}

/// Process-wide handle to one collection.
///
/// Cloning is cheap and every clone shares the same connection. The
/// connection is opened lazily on first use, and dropped again after a failed
/// ping so the next request reconnects.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    location: StoreLocation,
    collection: String,
    db: Mutex<Option<Db>>,
}

impl Store {
    pub fn new(location: StoreLocation, collection: impl Into<String>) -> Result<Self> {
        let collection = collection.into();
        validate_collection_name(&collection)?;
        Ok(Self {
            inner: Arc::new(StoreInner {
                location,
                collection,
                db: Mutex::new(None),
            }),
        })
    }

    pub fn location(&self) -> &StoreLocation {
        &self.inner.location
    }

    pub fn collection(&self) -> &str {
        &self.inner.collection
    }

    async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Db) -> Result<T> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let mut guard = inner.lock_db();
            let db = match guard.take() {
                Some(db) => db,
                None => {
                    let db = Db::open(&inner.location, &inner.collection)?;
                    tracing::debug!(
                        location = %inner.location,
                        collection = %inner.collection,
                        "opened store connection"
                    );
                    db
                }
            };
            let db = guard.insert(db);
            op(db)
        })
        .await
        .map_err(|err| DbError::Task(err.to_string()))?
    }

    async fn disconnect(&self) {
        let inner = Arc::clone(&self.inner);
        let _ = tokio::task::spawn_blocking(move || {
            inner.lock_db().take();
        })
        .await;
    }
}

impl StoreInner {
    /// Locks the connection slot. A panic while the lock was held drops the
    /// connection, so the next operation reopens it.
    fn lock_db(&self) -> MutexGuard<'_, Option<Db>> {
        self.db.lock().unwrap_or_else(|poisoned| {
            let mut guard = PoisonError::into_inner(poisoned);
            guard.take();
            self.db.clear_poison();
            tracing::warn!(
                collection = %self.collection,
                "store connection dropped after a panicked operation"
            );
            guard
        })
    }
}

#[async_trait]
impl TrackingStore for Store {
    async fn ping(&self) -> Result<()> {
        let result = self.with_db(|db| db.ping()).await;
        if result.is_err() {
            self.disconnect().await;
        }
        result
    }

    async fn find_record(
        &self,
        customer_number: &str,
        tenant: Tenant,
    ) -> Result<Option<TrackingRecord>> {
        let customer_number = customer_number.to_string();
        self.with_db(move |db| db.find_record(&customer_number, tenant))
            .await
    }

    async fn increment_record(
        &self,
        id: RecordId,
        tenant: Tenant,
        timestamp: &str,
    ) -> Result<u64> {
        let timestamp = timestamp.to_string();
        self.with_db(move |db| db.increment_record(id, tenant, &timestamp))
            .await
    }

    async fn insert_record(&self, record: &NewTrackingRecord) -> Result<Option<RecordId>> {
        let record = record.clone();
        self.with_db(move |db| db.insert_record(&record)).await
    }
}
