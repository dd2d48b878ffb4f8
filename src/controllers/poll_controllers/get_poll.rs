use axum::{
    extract::{Path, State},
    Extension, Json,
};
use mongodb::bson::{doc, oid::ObjectId};

use crate::controllers::poll_controllers::models::{PollDetailResponse, PollResponse};
use crate::middleware::auth::CurrentUser;
use crate::models::{poll_models::Poll, vote_models::Vote};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::response::ApiResponse;

pub async fn get_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<PollDetailResponse>>> {
    let polls = state.db.collection::<Poll>("polls");
    let votes = state.db.collection::<Vote>("votes");

    let poll_oid = ObjectId::parse_str(&poll_id)
        .map_err(|_| AppError::BadRequest("Invalid poll id".to_string()))?;

    let poll = polls
        .find_one(doc! { "_id": poll_oid })
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    let existing_vote = votes
        .find_one(doc! { "poll_id": poll_oid, "user_id": user.id })
        .await?;

    let response = PollDetailResponse {
        poll: PollResponse::from(poll),
        has_voted: existing_vote.is_some(),
        user_vote: existing_vote.map(|vote| vote.selected_option),
    };

    Ok(Json(ApiResponse::new(response)))
}
