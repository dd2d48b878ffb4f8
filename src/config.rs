use std::env;

use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub cors_origin: String,
    pub mongo_uri: String,
    pub db_name: String,
    pub jwt_secret: String,
    pub sweep_interval_secs: u64,
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_name: String,
    pub from_address: String,
}

fn require(key: &str) -> AppResult<String> {
    env::var(key).map_err(|_| AppError::InternalError(format!("{} must be set in .env", key)))
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            cors_origin: require("CORS_ORIGIN")?,
            mongo_uri: require("MONGO_URI")?,
            db_name: require("DB_NAME")?,
            jwt_secret: require("JWT_SECRET")?,
            sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            smtp: SmtpConfig {
                host: require("SMTP_HOST")?,
                port: env::var("SMTP_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(587),
                username: require("SMTP_USERNAME")?,
                password: require("SMTP_PASSWORD")?,
                from_name: env::var("EMAIL_FROM_NAME").unwrap_or_else(|_| "Pollbox".to_string()),
                from_address: require("EMAIL_FROM")?,
            },
        })
    }
}
