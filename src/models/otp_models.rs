use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    #[serde(rename = "REGISTRATION")]
    Registration,
    #[serde(rename = "PASSWORD_RESET")]
    PasswordReset,
}

impl OtpPurpose {
    /// Stored form, usable directly in query documents.
    pub fn as_str(self) -> &'static str {
        match self {
            OtpPurpose::Registration => "REGISTRATION",
            OtpPurpose::PasswordReset => "PASSWORD_RESET",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Otp {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    pub code: String,
    pub purpose: OtpPurpose,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub expires_at: DateTime<Utc>,
    pub is_used: bool,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purpose_serializes_to_stored_form() {
        let json = serde_json::to_string(&OtpPurpose::Registration).unwrap();
        assert_eq!(json, "\"REGISTRATION\"");
        assert_eq!(OtpPurpose::PasswordReset.as_str(), "PASSWORD_RESET");
    }
}
