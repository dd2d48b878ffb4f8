use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime, Document};

use crate::controllers::admin_controllers::models::{UpdateUserRequest, UserResponse};
use crate::controllers::auth_controllers::normalize_email;
use crate::db::connection::is_duplicate_key_error;
use crate::models::{otp_models::Otp, user_models::User};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::response::{ApiResponse, MessageResponse};

pub async fn list_users(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users_collection = state.db.collection::<User>("users");

    let users: Vec<User> = users_collection
        .find(doc! {})
        .sort(doc! { "created_at": -1 })
        .await?
        .try_collect()
        .await?;

    let responses = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(ApiResponse::new(responses)))
}

pub async fn get_user(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let users = state.db.collection::<User>("users");

    let user_oid = ObjectId::parse_str(&user_id)
        .map_err(|_| AppError::BadRequest("Invalid user id".to_string()))?;

    let user = users
        .find_one(doc! { "_id": user_oid })
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::new(UserResponse::from(user))))
}

pub async fn update_user(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<MessageResponse>> {
    let users = state.db.collection::<User>("users");

    let user_oid = ObjectId::parse_str(&user_id)
        .map_err(|_| AppError::BadRequest("Invalid user id".to_string()))?;

    let mut changes = Document::new();
    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.len() < 2 {
            return Err(AppError::ValidationError(
                "Name must be at least 2 characters long".to_string(),
            ));
        }
        changes.insert("name", name);
    }
    if let Some(email) = payload.email {
        let email = normalize_email(&email);
        if !email.contains('@') {
            return Err(AppError::ValidationError(
                "A valid email address is required".to_string(),
            ));
        }
        changes.insert("email", email);
    }
    if let Some(is_verified) = payload.is_verified {
        changes.insert("is_verified", is_verified);
    }
    if let Some(is_admin) = payload.is_admin {
        changes.insert("is_admin", is_admin);
    }

    if changes.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }
    changes.insert("updated_at", BsonDateTime::from_chrono(Utc::now()));

    let update_result = match users
        .update_one(doc! { "_id": user_oid }, doc! { "$set": changes })
        .await
    {
        Ok(result) => result,
        Err(err) if is_duplicate_key_error(&err) => {
            return Err(AppError::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }
        Err(err) => return Err(err.into()),
    };

    if update_result.matched_count == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(Json(MessageResponse::new("User updated")))
}

pub async fn delete_user(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    let users = state.db.collection::<User>("users");
    let otps = state.db.collection::<Otp>("otps");

    let user_oid = ObjectId::parse_str(&user_id)
        .map_err(|_| AppError::BadRequest("Invalid user id".to_string()))?;

    let user = users
        .find_one(doc! { "_id": user_oid })
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    users.delete_one(doc! { "_id": user_oid }).await?;

    // Pending codes die with the account. Votes are kept: tallies already
    // counted them and remain valid.
    otps.delete_many(doc! { "email": &user.email }).await?;

    Ok(Json(MessageResponse::new("User deleted")))
}
