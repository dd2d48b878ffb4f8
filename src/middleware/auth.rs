use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    Extension,
};
use axum_extra::extract::cookie::CookieJar;
use mongodb::bson::{doc, oid::ObjectId};

use crate::models::user_models::User;
use crate::state::AppState;
use crate::utils::{error::AppError, session};

/// The authenticated caller, resolved from the JWT cookie against the users
/// collection. Handlers read this from request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: ObjectId,
    pub name: String,
    pub username: String,
    pub email: String,
    pub is_verified: bool,
    pub is_admin: bool,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            is_verified: user.is_verified,
            is_admin: user.is_admin,
        }
    }
}

pub async fn require_auth(
    State(state): State<AppState>,
    cookie_jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = cookie_jar
        .get(session::AUTH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| AppError::AuthenticationError("Not authenticated".to_string()))?;

    let claims = session::verify_token(&token, &state.config.jwt_secret)
        .map_err(|_| AppError::AuthenticationError("Invalid or expired token".to_string()))?;

    let user_id = ObjectId::parse_str(&claims.sub)
        .map_err(|_| AppError::AuthenticationError("Invalid token subject".to_string()))?;

    let user = state
        .db
        .collection::<User>("users")
        .find_one(doc! { "_id": user_id })
        .await?
        .ok_or_else(|| AppError::AuthenticationError("User not found".to_string()))?;

    req.extensions_mut().insert(CurrentUser::from(user));

    Ok(next.run(req).await)
}

pub async fn require_admin(
    Extension(user): Extension<CurrentUser>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !user.is_admin {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    Ok(next.run(req).await)
}
