use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

pub const AUTH_COOKIE: &str = "auth_token";

const SESSION_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn create_token(
    user_id: &ObjectId,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = (Utc::now() + Duration::days(SESSION_DAYS)).timestamp();

    let claims = Claims {
        sub: user_id.to_hex(),
        exp: expiration as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

pub fn auth_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}",
        AUTH_COOKIE,
        token,
        SESSION_DAYS * 24 * 60 * 60
    )
}

pub fn clear_auth_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0", AUTH_COOKIE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn token_round_trip() {
        let user_id = ObjectId::new();
        let token = create_token(&user_id, SECRET).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id.to_hex());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_token(&ObjectId::new(), SECRET).unwrap();
        assert!(verify_token(&token, "another-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims {
            sub: ObjectId::new().to_hex(),
            exp: (Utc::now() - Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify_token("not-a-jwt", SECRET).is_err());
    }

    #[test]
    fn cookie_strings() {
        let cookie = auth_cookie("abc");
        assert!(cookie.starts_with("auth_token=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(clear_auth_cookie().contains("Max-Age=0"));
    }
}
