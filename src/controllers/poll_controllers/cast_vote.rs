use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime, Document};
use mongodb::Collection;

use crate::controllers::poll_controllers::models::{CastVoteRequest, PollResponse};
use crate::db::connection::is_duplicate_key_error;
use crate::middleware::auth::CurrentUser;
use crate::models::{poll_models::Poll, vote_models::Vote};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::response::ApiResponse;

pub async fn cast_vote(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CastVoteRequest>,
) -> AppResult<Json<ApiResponse<PollResponse>>> {
    let polls = state.db.collection::<Poll>("polls");
    let votes = state.db.collection::<Vote>("votes");

    let poll_oid = ObjectId::parse_str(&poll_id)
        .map_err(|_| AppError::BadRequest("Invalid poll id".to_string()))?;

    let poll = polls
        .find_one(doc! { "_id": poll_oid })
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    // Expiry is recomputed from end_date here; the is_active flag may lag
    // behind the sweeper by up to one interval.
    let now = Utc::now();
    if !poll.is_open(now) {
        return Err(AppError::BadRequest("Poll is no longer active".to_string()));
    }

    if payload.option_index >= poll.options.len() {
        return Err(AppError::ValidationError(format!(
            "Option index {} is out of range for this poll",
            payload.option_index
        )));
    }

    // The ledger insert goes first: the unique (poll_id, user_id) index is
    // the only thing that decides between two concurrent submissions, so no
    // counter may move until it has accepted the vote.
    let vote = Vote {
        id: ObjectId::new(),
        poll_id: poll_oid,
        user_id: user.id,
        selected_option: payload.option_index as u32,
        voted_at: now,
    };

    if let Err(err) = votes.insert_one(&vote).await {
        if is_duplicate_key_error(&err) {
            return Err(AppError::Conflict(
                "User has already voted in this poll".to_string(),
            ));
        }
        return Err(err.into());
    }

    let mut increments = Document::new();
    increments.insert(format!("options.{}.votes", payload.option_index), 1_i64);
    increments.insert("total_votes", 1_i64);

    // One atomic $inc for both counters, re-conditioned on the poll still
    // being open. A poll that closed between the read above and this write
    // matches nothing and the inserted vote is compensated away.
    let filter = doc! {
        "_id": poll_oid,
        "is_active": true,
        "end_date": { "$gte": BsonDateTime::from_chrono(now) },
    };
    let update = doc! {
        "$inc": increments,
        "$set": { "updated_at": BsonDateTime::from_chrono(now) },
    };

    let update_result = match polls.update_one(filter, update).await {
        Ok(result) => result,
        Err(err) => {
            roll_back_vote(&votes, vote.id).await;
            return Err(err.into());
        }
    };

    if update_result.matched_count == 0 {
        roll_back_vote(&votes, vote.id).await;
        return Err(AppError::BadRequest("Poll is no longer active".to_string()));
    }

    let updated_poll = polls
        .find_one(doc! { "_id": poll_oid })
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    Ok(Json(ApiResponse::new(PollResponse::from(updated_poll))))
}

/// Removes a just-inserted vote whose tally never landed, so the ledger and
/// the counters cannot drift apart. Failure here leaves an untallied vote
/// and is loud in the log.
async fn roll_back_vote(votes: &Collection<Vote>, vote_id: ObjectId) {
    if let Err(err) = votes.delete_one(doc! { "_id": vote_id }).await {
        tracing::error!(
            vote_id = %vote_id,
            error = %err,
            "failed to roll back vote after tally update did not apply"
        );
    }
}
