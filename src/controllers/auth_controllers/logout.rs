use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::controllers::auth_controllers::with_cookie;
use crate::utils::error::AppResult;
use crate::utils::response::MessageResponse;
use crate::utils::session;

pub async fn logout() -> AppResult<Response> {
    let response = Json(MessageResponse::new("Logged out successfully")).into_response();

    with_cookie(response, &session::clear_auth_cookie())
}
