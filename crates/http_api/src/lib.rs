mod errors;
mod handlers;
mod state;

use axum::{Router, routing::get};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use state::HttpState;

pub fn router(state: HttpState) -> Router<()> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/track-email", get(handlers::track_email))
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(errors::panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
