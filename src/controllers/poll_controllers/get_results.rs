use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use mongodb::bson::{doc, oid::ObjectId};

use crate::models::poll_models::{Poll, PollResults};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::response::ApiResponse;

pub async fn get_results(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<PollResults>>> {
    let polls = state.db.collection::<Poll>("polls");

    let poll_oid = ObjectId::parse_str(&poll_id)
        .map_err(|_| AppError::BadRequest("Invalid poll id".to_string()))?;

    let poll = polls
        .find_one(doc! { "_id": poll_oid })
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    Ok(Json(ApiResponse::new(poll.results(Utc::now()))))
}
