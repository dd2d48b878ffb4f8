use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use mongodb::bson::{doc, oid::ObjectId};

use crate::controllers::auth_controllers::models::SendOtpRequest;
use crate::controllers::auth_controllers::normalize_email;
use crate::models::{
    otp_models::{Otp, OtpPurpose},
    user_models::User,
};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::otp::{generate_otp, OTP_TTL_MINUTES};
use crate::utils::response::MessageResponse;

pub async fn send_otp(
    State(state): State<AppState>,
    Json(payload): Json<SendOtpRequest>,
) -> AppResult<Json<MessageResponse>> {
    let users = state.db.collection::<User>("users");
    let otps = state.db.collection::<Otp>("otps");

    let email = normalize_email(&payload.email);
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::ValidationError(
            "A valid email address is required".to_string(),
        ));
    }

    let existing = users.find_one(doc! { "email": &email }).await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "A user with this email already exists".to_string(),
        ));
    }

    let code = generate_otp();
    let now = Utc::now();

    let otp = Otp {
        id: ObjectId::new(),
        email: email.clone(),
        code: code.clone(),
        purpose: OtpPurpose::Registration,
        expires_at: now + Duration::minutes(OTP_TTL_MINUTES),
        is_used: false,
        created_at: now,
    };

    otps.insert_one(&otp).await?;

    state
        .mailer
        .send_otp(&email, &code, OtpPurpose::Registration)
        .await?;

    Ok(Json(MessageResponse::new("Verification code sent")))
}
