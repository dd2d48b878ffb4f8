use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::controllers::poll_controllers::models::{CreatePollRequest, PollResponse};
use crate::middleware::auth::CurrentUser;
use crate::models::poll_models::{Poll, PollOption};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::response::ApiResponse;

pub async fn create_poll(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreatePollRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<PollResponse>>)> {
    let polls = state.db.collection::<Poll>("polls");

    let title = payload.title.trim().to_string();
    let description = payload.description.trim().to_string();

    if title.is_empty() {
        return Err(AppError::ValidationError("Title is required".to_string()));
    }
    if description.is_empty() {
        return Err(AppError::ValidationError(
            "Description is required".to_string(),
        ));
    }

    let options: Vec<String> = payload
        .options
        .iter()
        .map(|option| option.trim().to_string())
        .collect();

    if options.iter().any(|option| option.is_empty()) {
        return Err(AppError::ValidationError(
            "Poll options cannot be empty".to_string(),
        ));
    }

    if options.len() < 2 {
        return Err(AppError::ValidationError(
            "Poll must have at least 2 options".to_string(),
        ));
    }

    let mut deduped_options = Vec::new();
    for option in &options {
        if !deduped_options.contains(option) {
            deduped_options.push(option.clone());
        }
    }

    if deduped_options.len() != options.len() {
        return Err(AppError::ValidationError(
            "Poll options must be unique".to_string(),
        ));
    }

    let now = Utc::now();

    if payload.end_date <= now {
        return Err(AppError::ValidationError(
            "End date must be in the future".to_string(),
        ));
    }

    let new_poll = Poll {
        id: ObjectId::new(),
        title,
        description,
        options: options
            .into_iter()
            .map(|text| PollOption { text, votes: 0 })
            .collect(),
        start_date: payload.start_date.unwrap_or(now),
        end_date: payload.end_date,
        is_active: true,
        total_votes: 0,
        created_by: user.id,
        created_at: now,
        updated_at: now,
    };

    polls.insert_one(&new_poll).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(PollResponse::from(new_poll))),
    ))
}
