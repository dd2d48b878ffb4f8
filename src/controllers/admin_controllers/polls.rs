use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime, Document};
use std::collections::HashMap;

use crate::controllers::admin_controllers::models::{
    AdminPollResponse, CreatorInfo, UpdatePollRequest,
};
use crate::controllers::poll_controllers::models::PollResponse;
use crate::models::{poll_models::Poll, user_models::User, vote_models::Vote};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::response::{ApiResponse, MessageResponse};

async fn load_creators(
    state: &AppState,
    creator_ids: Vec<ObjectId>,
) -> AppResult<HashMap<ObjectId, CreatorInfo>> {
    let users = state.db.collection::<User>("users");

    let creators = users
        .find(doc! { "_id": { "$in": creator_ids } })
        .await?
        .try_collect::<Vec<User>>()
        .await?
        .into_iter()
        .map(|user| {
            (
                user.id,
                CreatorInfo {
                    id: user.id.to_hex(),
                    name: user.name,
                    email: user.email,
                },
            )
        })
        .collect();

    Ok(creators)
}

pub async fn list_polls(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<AdminPollResponse>>>> {
    let polls_collection = state.db.collection::<Poll>("polls");

    let polls: Vec<Poll> = polls_collection
        .find(doc! {})
        .sort(doc! { "created_at": -1 })
        .await?
        .try_collect()
        .await?;

    let creator_ids: Vec<_> = polls.iter().map(|poll| poll.created_by).collect();
    let creators = load_creators(&state, creator_ids).await?;

    let responses = polls
        .into_iter()
        .map(|poll| {
            let creator = creators.get(&poll.created_by).cloned();
            AdminPollResponse {
                poll: PollResponse::from(poll),
                creator,
            }
        })
        .collect();

    Ok(Json(ApiResponse::new(responses)))
}

pub async fn get_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<AdminPollResponse>>> {
    let polls = state.db.collection::<Poll>("polls");

    let poll_oid = ObjectId::parse_str(&poll_id)
        .map_err(|_| AppError::BadRequest("Invalid poll id".to_string()))?;

    let poll = polls
        .find_one(doc! { "_id": poll_oid })
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    let creators = load_creators(&state, vec![poll.created_by]).await?;
    let creator = creators.get(&poll.created_by).cloned();

    Ok(Json(ApiResponse::new(AdminPollResponse {
        poll: PollResponse::from(poll),
        creator,
    })))
}

pub async fn update_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdatePollRequest>,
) -> AppResult<Json<MessageResponse>> {
    let polls = state.db.collection::<Poll>("polls");

    let poll_oid = ObjectId::parse_str(&poll_id)
        .map_err(|_| AppError::BadRequest("Invalid poll id".to_string()))?;

    let mut changes = Document::new();
    if let Some(title) = payload.title {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::ValidationError("Title cannot be empty".to_string()));
        }
        changes.insert("title", title);
    }
    if let Some(description) = payload.description {
        let description = description.trim().to_string();
        if description.is_empty() {
            return Err(AppError::ValidationError(
                "Description cannot be empty".to_string(),
            ));
        }
        changes.insert("description", description);
    }
    if let Some(end_date) = payload.end_date {
        changes.insert("end_date", BsonDateTime::from_chrono(end_date));
    }
    if let Some(is_active) = payload.is_active {
        changes.insert("is_active", is_active);
    }

    if changes.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }
    changes.insert("updated_at", BsonDateTime::from_chrono(Utc::now()));

    let update_result = polls
        .update_one(doc! { "_id": poll_oid }, doc! { "$set": changes })
        .await?;

    if update_result.matched_count == 0 {
        return Err(AppError::NotFound("Poll not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Poll updated")))
}

pub async fn delete_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    let polls = state.db.collection::<Poll>("polls");
    let votes = state.db.collection::<Vote>("votes");

    let poll_oid = ObjectId::parse_str(&poll_id)
        .map_err(|_| AppError::BadRequest("Invalid poll id".to_string()))?;

    let delete_result = polls.delete_one(doc! { "_id": poll_oid }).await?;

    if delete_result.deleted_count == 0 {
        return Err(AppError::NotFound("Poll not found".to_string()));
    }

    // A deleted poll takes its ledger with it. Orphans left by a failure
    // here are tolerated by every read path.
    if let Err(err) = votes.delete_many(doc! { "poll_id": poll_oid }).await {
        tracing::error!(
            poll_id = %poll_oid,
            error = %err,
            "failed to cascade-delete votes for deleted poll"
        );
    }

    Ok(Json(MessageResponse::new("Poll deleted")))
}
