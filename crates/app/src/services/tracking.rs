use tracker_core::{NewTrackingRecord, SaveOutcome, TrackEmailRequest};

use crate::error::{AppError, Result};
use crate::services::SharedStore;
use crate::util::time::utc_timestamp;

#[derive(Clone)]
pub struct TrackingService {
    store: SharedStore,
}

impl TrackingService {
    pub(super) fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Fails with [`AppError::StoreUnavailable`] when the store does not
    /// answer a ping.
    pub async fn check_connection(&self) -> Result<()> {
        self.store.ping().await.map_err(|err| {
            tracing::warn!(error = %err, "store ping failed");
            AppError::StoreUnavailable(err.to_string())
        })
    }

    /// Records one email-track event for the request's key.
    ///
    /// Looks the key up first, then either increments the existing record or
    /// inserts a fresh one with `count = 1`. The lookup and the write are
    /// separate store calls.
    pub async fn track_email(&self, request: &TrackEmailRequest) -> Result<SaveOutcome> {
        self.check_connection().await?;

        let customer_number = request.customer_number();
        let tenant = request.tenant();
        let existing = self.store.find_record(customer_number, tenant).await?;

        match existing {
            Some(record) => {
                let timestamp = utc_timestamp();
                let modified = self
                    .store
                    .increment_record(record.id, tenant, &timestamp)
                    .await?;
                if modified > 0 {
                    tracing::info!(
                        customer_number,
                        %tenant,
                        count = record.count + 1,
                        "email tracking record updated"
                    );
                    return Ok(SaveOutcome::Updated);
                }
            }
            None => {
                let record = NewTrackingRecord::first_event(request, utc_timestamp());
                if self.store.insert_record(&record).await?.is_some() {
                    tracing::info!(customer_number, %tenant, "email tracking record created");
                    return Ok(SaveOutcome::Created);
                }
            }
        }

        tracing::warn!(customer_number, %tenant, "email tracking record not saved");
        Err(AppError::SaveFailed)
    }
}
