use axum::response::{IntoResponse, Response};
use axum::{extract::State, Json};
use mongodb::bson::doc;

use crate::controllers::auth_controllers::models::{AuthUserResponse, LoginRequest};
use crate::controllers::auth_controllers::{normalize_email, with_cookie};
use crate::models::user_models::User;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::password::verify_password;
use crate::utils::response::ApiResponse;
use crate::utils::session;

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Response> {
    let users = state.db.collection::<User>("users");

    let email = normalize_email(&payload.email);

    // Same message for unknown email and wrong password.
    let invalid = || AppError::AuthenticationError("Invalid email or password".to_string());

    let user = users
        .find_one(doc! { "email": &email })
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(invalid());
    }

    let token = session::create_token(&user.id, &state.config.jwt_secret)
        .map_err(|e| AppError::InternalError(format!("Failed to create session: {}", e)))?;

    let response = Json(ApiResponse::new(AuthUserResponse::from(user))).into_response();

    with_cookie(response, &session::auth_cookie(&token))
}
