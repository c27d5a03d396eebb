mod tracking;

use std::sync::Arc;

use tracker_db::TrackingStore;

pub use tracking::TrackingService;

/// Store handle shared by every request.
pub type SharedStore = Arc<dyn TrackingStore>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub tracking: TrackingService,
}

impl AppServices {
    pub fn new(store: SharedStore) -> Self {
        Self {
            tracking: TrackingService::new(store),
        }
    }
}
