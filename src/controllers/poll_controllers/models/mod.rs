use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::poll_models::{Poll, PollOption};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePollRequest {
    pub title: String,
    pub description: String,
    pub options: Vec<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    pub option_index: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub options: Vec<PollOption>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
    pub total_votes: i64,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Poll> for PollResponse {
    fn from(poll: Poll) -> Self {
        Self {
            id: poll.id.to_hex(),
            title: poll.title,
            description: poll.description,
            options: poll.options,
            start_date: poll.start_date,
            end_date: poll.end_date,
            is_active: poll.is_active,
            total_votes: poll.total_votes,
            created_by: poll.created_by.to_hex(),
            created_at: poll.created_at,
            updated_at: poll.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollDetailResponse {
    #[serde(flatten)]
    pub poll: PollResponse,
    pub has_voted: bool,
    pub user_vote: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub is_active: bool,
    pub end_date: DateTime<Utc>,
    pub total_votes: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Poll> for PollSummary {
    fn from(poll: Poll) -> Self {
        Self {
            id: poll.id.to_hex(),
            title: poll.title,
            description: poll.description,
            is_active: poll.is_active,
            end_date: poll.end_date,
            total_votes: poll.total_votes,
            created_at: poll.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VotedPollResponse {
    #[serde(flatten)]
    pub poll: PollSummary,
    pub user_vote: u32,
    pub voted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn cast_vote_request_uses_option_index_key() {
        let parsed: CastVoteRequest = serde_json::from_str(r#"{"optionIndex": 1}"#).unwrap();
        assert_eq!(parsed.option_index, 1);
        assert!(serde_json::from_str::<CastVoteRequest>(r#"{"optionIndex": -1}"#).is_err());
    }

    #[test]
    fn poll_response_serializes_camel_case() {
        let now = Utc::now();
        let poll = Poll {
            id: ObjectId::new(),
            title: "t".to_string(),
            description: "d".to_string(),
            options: vec![PollOption {
                text: "A".to_string(),
                votes: 0,
            }],
            start_date: now,
            end_date: now + Duration::days(1),
            is_active: true,
            total_votes: 0,
            created_by: ObjectId::new(),
            created_at: now,
            updated_at: now,
        };
        let body = serde_json::to_value(PollDetailResponse {
            poll: PollResponse::from(poll),
            has_voted: false,
            user_vote: None,
        })
        .unwrap();
        assert!(body.get("totalVotes").is_some());
        assert!(body.get("endDate").is_some());
        assert!(body.get("hasVoted").is_some());
        assert!(body.get("userVote").is_some());
        assert!(body.get("total_votes").is_none());
    }
}
