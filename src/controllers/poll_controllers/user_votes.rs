use axum::{extract::State, Extension, Json};
use futures::TryStreamExt;
use mongodb::bson::doc;
use std::collections::HashMap;

use crate::controllers::poll_controllers::models::{PollSummary, VotedPollResponse};
use crate::middleware::auth::CurrentUser;
use crate::models::{poll_models::Poll, vote_models::Vote};
use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::utils::response::ApiResponse;

pub async fn user_votes(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<VotedPollResponse>>>> {
    let votes_collection = state.db.collection::<Vote>("votes");
    let polls_collection = state.db.collection::<Poll>("polls");

    let votes: Vec<Vote> = votes_collection
        .find(doc! { "user_id": user.id })
        .sort(doc! { "voted_at": -1 })
        .await?
        .try_collect()
        .await?;

    let poll_ids: Vec<_> = votes.iter().map(|vote| vote.poll_id).collect();

    let polls: HashMap<_, _> = polls_collection
        .find(doc! { "_id": { "$in": poll_ids } })
        .await?
        .try_collect::<Vec<Poll>>()
        .await?
        .into_iter()
        .map(|poll| (poll.id, poll))
        .collect();

    // Votes whose poll has since been deleted are skipped rather than
    // surfaced as errors.
    let voted_polls = votes
        .into_iter()
        .filter_map(|vote| {
            polls.get(&vote.poll_id).map(|poll| VotedPollResponse {
                poll: PollSummary::from(poll.clone()),
                user_vote: vote.selected_option,
                voted_at: vote.voted_at,
            })
        })
        .collect();

    Ok(Json(ApiResponse::new(voted_polls)))
}
