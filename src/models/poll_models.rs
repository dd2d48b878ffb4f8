use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Poll {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub options: Vec<PollOption>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
    pub total_votes: i64,
    pub created_by: ObjectId,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PollOption {
    pub text: String,
    pub votes: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionResult {
    pub text: String,
    pub votes: i64,
    pub percentage: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PollResults {
    pub title: String,
    pub description: String,
    pub total_votes: i64,
    pub options: Vec<OptionResult>,
    pub is_active: bool,
}

impl Poll {
    /// Whether votes are accepted right now. The `is_active` flag alone is
    /// not authoritative: the sweeper only reconciles it with the end date
    /// periodically, so expiry is always recomputed from `end_date`.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.is_active && now <= self.end_date
    }

    pub fn results(&self, now: DateTime<Utc>) -> PollResults {
        let options = self
            .options
            .iter()
            .map(|option| OptionResult {
                text: option.text.clone(),
                votes: option.votes,
                percentage: if self.total_votes > 0 {
                    format!(
                        "{:.1}",
                        (option.votes as f64 / self.total_votes as f64) * 100.0
                    )
                } else {
                    "0.0".to_string()
                },
            })
            .collect();

        PollResults {
            title: self.title.clone(),
            description: self.description.clone(),
            total_votes: self.total_votes,
            options,
            is_active: self.is_open(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_poll(votes: Vec<i64>, is_active: bool, ends_in_hours: i64) -> Poll {
        let now = Utc::now();
        Poll {
            id: ObjectId::new(),
            title: "Bike lanes on Main Street".to_string(),
            description: "Should the city add protected bike lanes?".to_string(),
            options: votes
                .iter()
                .enumerate()
                .map(|(i, &v)| PollOption {
                    text: format!("Option {}", i),
                    votes: v,
                })
                .collect(),
            start_date: now - Duration::days(1),
            end_date: now + Duration::hours(ends_in_hours),
            is_active,
            total_votes: votes.iter().sum(),
            created_by: ObjectId::new(),
            created_at: now - Duration::days(1),
            updated_at: now,
        }
    }

    #[test]
    fn open_requires_flag_and_unexpired_end_date() {
        let now = Utc::now();
        assert!(sample_poll(vec![0, 0], true, 24).is_open(now));
        assert!(!sample_poll(vec![0, 0], false, 24).is_open(now));
        assert!(!sample_poll(vec![0, 0], true, -24).is_open(now));
        assert!(!sample_poll(vec![0, 0], false, -24).is_open(now));
    }

    #[test]
    fn results_with_no_votes_have_zero_percentages() {
        let poll = sample_poll(vec![0, 0], true, 24);
        let results = poll.results(Utc::now());
        assert_eq!(results.total_votes, 0);
        for option in &results.options {
            assert_eq!(option.percentage, "0.0");
        }
    }

    #[test]
    fn single_vote_gives_full_percentage() {
        let poll = sample_poll(vec![1, 0], true, 24);
        let results = poll.results(Utc::now());
        assert_eq!(results.total_votes, 1);
        assert_eq!(results.options[0].votes, 1);
        assert_eq!(results.options[0].percentage, "100.0");
        assert_eq!(results.options[1].votes, 0);
        assert_eq!(results.options[1].percentage, "0.0");
        assert!(results.is_active);
    }

    #[test]
    fn percentages_round_to_one_decimal() {
        let poll = sample_poll(vec![1, 2], true, 24);
        let results = poll.results(Utc::now());
        assert_eq!(results.options[0].percentage, "33.3");
        assert_eq!(results.options[1].percentage, "66.7");
    }

    #[test]
    fn expired_poll_reports_inactive_even_before_sweep() {
        // The sweeper has not flipped the flag yet, but results already
        // report the poll as closed.
        let poll = sample_poll(vec![3, 1], true, -1);
        let results = poll.results(Utc::now());
        assert!(!results.is_active);
        assert_eq!(results.total_votes, 4);
    }

    #[test]
    fn total_votes_matches_option_sum() {
        let poll = sample_poll(vec![5, 7, 2], true, 24);
        let sum: i64 = poll.options.iter().map(|o| o.votes).sum();
        assert_eq!(poll.total_votes, sum);
    }

    #[test]
    fn results_serialize_camel_case() {
        let poll = sample_poll(vec![1, 0], true, 24);
        let body = serde_json::to_value(poll.results(Utc::now())).unwrap();
        assert!(body.get("totalVotes").is_some());
        assert!(body.get("isActive").is_some());
        assert!(body["options"][0].get("percentage").is_some());
    }
}
