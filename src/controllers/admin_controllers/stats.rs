use axum::{extract::State, Json};
use mongodb::bson::doc;

use crate::controllers::admin_controllers::models::StatsResponse;
use crate::models::{poll_models::Poll, user_models::User, vote_models::Vote};
use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::utils::response::ApiResponse;

pub async fn get_stats(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<StatsResponse>>> {
    let users = state.db.collection::<User>("users");
    let polls = state.db.collection::<Poll>("polls");
    let votes = state.db.collection::<Vote>("votes");

    let stats = StatsResponse {
        total_users: users.count_documents(doc! {}).await?,
        verified_users: users.count_documents(doc! { "is_verified": true }).await?,
        admin_users: users.count_documents(doc! { "is_admin": true }).await?,
        total_polls: polls.count_documents(doc! {}).await?,
        active_polls: polls.count_documents(doc! { "is_active": true }).await?,
        total_votes: votes.count_documents(doc! {}).await?,
    };

    Ok(Json(ApiResponse::new(stats)))
}
