use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

/// One user's vote on one poll. Immutable once written; the unique compound
/// index on (poll_id, user_id) is what enforces one vote per user per poll.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Vote {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub poll_id: ObjectId,
    pub user_id: ObjectId,
    pub selected_option: u32,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub voted_at: DateTime<Utc>,
}
