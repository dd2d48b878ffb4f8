use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use mongodb::bson::{doc, oid::ObjectId};

use crate::controllers::auth_controllers::models::ForgotPasswordRequest;
use crate::controllers::auth_controllers::normalize_email;
use crate::models::{
    otp_models::{Otp, OtpPurpose},
    user_models::User,
};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::otp::{generate_otp, OTP_TTL_MINUTES};
use crate::utils::response::MessageResponse;

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let users = state.db.collection::<User>("users");
    let otps = state.db.collection::<Otp>("otps");

    let email = normalize_email(&payload.email);

    users
        .find_one(doc! { "email": &email })
        .await?
        .ok_or_else(|| AppError::NotFound("No account with this email".to_string()))?;

    let code = generate_otp();
    let now = Utc::now();

    let otp = Otp {
        id: ObjectId::new(),
        email: email.clone(),
        code: code.clone(),
        purpose: OtpPurpose::PasswordReset,
        expires_at: now + Duration::minutes(OTP_TTL_MINUTES),
        is_used: false,
        created_at: now,
    };

    otps.insert_one(&otp).await?;

    state
        .mailer
        .send_otp(&email, &code, OtpPurpose::PasswordReset)
        .await?;

    Ok(Json(MessageResponse::new("Password reset code sent")))
}
