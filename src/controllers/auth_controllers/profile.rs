use axum::{Extension, Json};

use crate::controllers::auth_controllers::models::AuthUserResponse;
use crate::middleware::auth::CurrentUser;
use crate::utils::error::AppResult;
use crate::utils::response::ApiResponse;

pub async fn profile(
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<AuthUserResponse>>> {
    Ok(Json(ApiResponse::new(AuthUserResponse::from(user))))
}
