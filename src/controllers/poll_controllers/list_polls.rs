use axum::{extract::State, Json};
use futures::TryStreamExt;
use mongodb::bson::doc;

use crate::controllers::poll_controllers::models::PollSummary;
use crate::models::poll_models::Poll;
use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::utils::response::ApiResponse;

pub async fn list_polls(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<PollSummary>>>> {
    let polls_collection = state.db.collection::<Poll>("polls");

    let polls: Vec<Poll> = polls_collection
        .find(doc! {})
        .sort(doc! { "created_at": -1 })
        .await?
        .try_collect()
        .await?;

    let summaries = polls.into_iter().map(PollSummary::from).collect();

    Ok(Json(ApiResponse::new(summaries)))
}
