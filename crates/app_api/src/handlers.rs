use tracker_app::{AppError, Result};
use tracker_core::{SaveOutcome, TrackEmailRequest};

use crate::{AppContext, MessageResponse, TrackEmailQuery};

pub const CREATED_MESSAGE: &str = "Email tracking data saved successfully!";
pub const UPDATED_MESSAGE: &str = "Email tracking data updated successfully!";

/// Validates the query, then records the event.
pub async fn track_email(ctx: &AppContext, query: TrackEmailQuery) -> Result<MessageResponse> {
    let request =
        TrackEmailRequest::validate(query.customer_number.as_deref(), query.tenant.as_deref())
            .map_err(AppError::Validation)?;
    let outcome = ctx.app_state.services.tracking.track_email(&request).await?;
    let message = match outcome {
        SaveOutcome::Created => CREATED_MESSAGE,
        SaveOutcome::Updated => UPDATED_MESSAGE,
    };
    Ok(MessageResponse::new(message))
}

pub fn welcome() -> MessageResponse {
    MessageResponse::new(format!(
        "Welcome to the Email Tracker API v{}!",
        env!("CARGO_PKG_VERSION")
    ))
}
