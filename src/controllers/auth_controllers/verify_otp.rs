use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{extract::State, Json};
use chrono::Utc;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};

use crate::controllers::auth_controllers::models::{AuthUserResponse, VerifyOtpRequest};
use crate::controllers::auth_controllers::{normalize_email, with_cookie};
use crate::db::connection::is_duplicate_key_error;
use crate::models::{
    otp_models::{Otp, OtpPurpose},
    user_models::User,
};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::password::hash_password;
use crate::utils::response::ApiResponse;
use crate::utils::session;

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOtpRequest>,
) -> AppResult<Response> {
    let users = state.db.collection::<User>("users");
    let otps = state.db.collection::<Otp>("otps");

    let email = normalize_email(&payload.email);
    let now = Utc::now();

    let otp_record = otps
        .find_one(doc! {
            "email": &email,
            "code": &payload.otp,
            "purpose": OtpPurpose::Registration.as_str(),
            "is_used": false,
            "expires_at": { "$gt": BsonDateTime::from_chrono(now) },
        })
        .await?
        .ok_or_else(|| {
            AppError::BadRequest("Invalid or expired verification code".to_string())
        })?;

    let name = payload.name.trim().to_string();
    let username = payload.username.trim().to_string();

    if name.len() < 2 {
        return Err(AppError::ValidationError(
            "Name must be at least 2 characters long".to_string(),
        ));
    }
    if username.len() < 3 {
        return Err(AppError::ValidationError(
            "Username must be at least 3 characters long".to_string(),
        ));
    }
    if payload.password.len() < 8 {
        return Err(AppError::ValidationError(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    let user = User {
        id: ObjectId::new(),
        name,
        username,
        email: email.clone(),
        password_hash: hash_password(&payload.password)?,
        is_verified: true,
        is_admin: false,
        created_at: now,
        updated_at: now,
    };

    // Unique indexes on email and username decide the race between two
    // simultaneous registrations.
    if let Err(err) = users.insert_one(&user).await {
        if is_duplicate_key_error(&err) {
            return Err(AppError::Conflict(
                "Email or username is already taken".to_string(),
            ));
        }
        return Err(err.into());
    }

    otps.update_one(
        doc! { "_id": otp_record.id },
        doc! { "$set": { "is_used": true } },
    )
    .await?;

    let token = session::create_token(&user.id, &state.config.jwt_secret)
        .map_err(|e| AppError::InternalError(format!("Failed to create session: {}", e)))?;

    let response = (
        StatusCode::CREATED,
        Json(ApiResponse::new(AuthUserResponse::from(user))),
    )
        .into_response();

    with_cookie(response, &session::auth_cookie(&token))
}
