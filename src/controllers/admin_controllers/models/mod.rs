use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::controllers::poll_controllers::models::PollResponse;
use crate::models::user_models::User;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub is_verified: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: user.name,
            username: user.username,
            email: user.email,
            is_verified: user.is_verified,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_verified: Option<bool>,
    pub is_admin: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePollRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

/// Creator identity joined onto a poll for the dashboard.
#[derive(Debug, Serialize, Clone)]
pub struct CreatorInfo {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPollResponse {
    #[serde(flatten)]
    pub poll: PollResponse,
    pub creator: Option<CreatorInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_users: u64,
    pub verified_users: u64,
    pub admin_users: u64,
    pub total_polls: u64,
    pub active_polls: u64,
    pub total_votes: u64,
}
