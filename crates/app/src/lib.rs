pub mod app;
pub mod config;
pub mod error;
pub mod services;
pub mod startup;
pub mod util;

pub use app::AppState;
pub use config::{AppConfig, ConfigLoad, ServerConfig, StoreConfig};
pub use error::{ApiError, ApiErrorDetail, AppError, Result};
pub use services::{AppServices, SharedStore, TrackingService};
pub use startup::ensure_store_dir;
pub use util::time::utc_timestamp;
