use serde::{Deserialize, Serialize};

use crate::middleware::auth::CurrentUser;
use crate::models::user_models::User;

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
    pub password: String,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub username: String,
    pub is_verified: bool,
    pub is_admin: bool,
}

impl From<User> for AuthUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            email: user.email,
            name: user.name,
            username: user.username,
            is_verified: user.is_verified,
            is_admin: user.is_admin,
        }
    }
}

impl From<CurrentUser> for AuthUserResponse {
    fn from(user: CurrentUser) -> Self {
        Self {
            id: user.id.to_hex(),
            email: user.email,
            name: user.name,
            username: user.username,
            is_verified: user.is_verified,
            is_admin: user.is_admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_request_uses_camel_case_key() {
        let parsed: ResetPasswordRequest = serde_json::from_str(
            r#"{"email":"a@b.c","otp":"123456","newPassword":"secret-enough"}"#,
        )
        .unwrap();
        assert_eq!(parsed.new_password, "secret-enough");
    }
}
