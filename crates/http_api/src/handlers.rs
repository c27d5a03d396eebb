use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};

use app_api::{MessageResponse, TrackEmailQuery};
use tracker_app::ApiError;

use crate::{errors::HttpError, state::HttpState};

pub async fn root() -> impl IntoResponse {
    Json(app_api::welcome())
}

pub async fn track_email(
    State(state): State<HttpState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let Query(pairs) = query.map_err(|rejection| ApiError::unknown(rejection.body_text()))?;
    let query = TrackEmailQuery::from_pairs(pairs);
    let response = app_api::track_email(&state.context, query).await?;
    Ok(Json(response))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(MessageResponse::new("Not Found")))
}
