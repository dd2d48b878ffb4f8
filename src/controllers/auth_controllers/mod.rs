use axum::http::{header::SET_COOKIE, HeaderValue};
use axum::response::Response;

use crate::utils::error::{AppError, AppResult};

pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod models;
pub mod profile;
pub mod reset_password;
pub mod send_otp;
pub mod verify_otp;

/// Attaches a Set-Cookie header to an already-built response.
pub fn with_cookie(mut response: Response, cookie: &str) -> AppResult<Response> {
    let value = HeaderValue::from_str(cookie)
        .map_err(|e| AppError::InternalError(format!("Invalid cookie value: {}", e)))?;
    response.headers_mut().insert(SET_COOKIE, value);
    Ok(response)
}

/// Lowercased, trimmed form used for storage and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
    }
}
