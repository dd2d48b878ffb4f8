use axum::{extract::State, Json};
use chrono::Utc;
use mongodb::bson::{doc, DateTime as BsonDateTime};

use crate::controllers::auth_controllers::models::ResetPasswordRequest;
use crate::controllers::auth_controllers::normalize_email;
use crate::models::{
    otp_models::{Otp, OtpPurpose},
    user_models::User,
};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::password::hash_password;
use crate::utils::response::MessageResponse;

pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let users = state.db.collection::<User>("users");
    let otps = state.db.collection::<Otp>("otps");

    let email = normalize_email(&payload.email);
    let now = Utc::now();

    let otp_record = otps
        .find_one(doc! {
            "email": &email,
            "code": &payload.otp,
            "purpose": OtpPurpose::PasswordReset.as_str(),
            "is_used": false,
            "expires_at": { "$gt": BsonDateTime::from_chrono(now) },
        })
        .await?
        .ok_or_else(|| {
            AppError::BadRequest("Invalid or expired verification code".to_string())
        })?;

    if payload.new_password.len() < 8 {
        return Err(AppError::ValidationError(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    let password_hash = hash_password(&payload.new_password)?;

    let update_result = users
        .update_one(
            doc! { "email": &email },
            doc! { "$set": {
                "password_hash": password_hash,
                "updated_at": BsonDateTime::from_chrono(now),
            } },
        )
        .await?;

    if update_result.matched_count == 0 {
        return Err(AppError::NotFound("No account with this email".to_string()));
    }

    otps.update_one(
        doc! { "_id": otp_record.id },
        doc! { "$set": { "is_used": true } },
    )
    .await?;

    Ok(Json(MessageResponse::new("Password reset successful")))
}
