use chrono::Utc;
use mongodb::bson::{doc, DateTime as BsonDateTime};
use mongodb::Database;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::models::poll_models::Poll;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// Flips `is_active` off for every poll whose end date has passed. Idempotent:
/// the filter only matches polls still marked active, so a second run in a
/// row matches nothing. Vote submission re-checks `end_date` itself and does
/// not depend on this having run.
pub async fn deactivate_expired(db: &Database) -> AppResult<u64> {
    let polls = db.collection::<Poll>("polls");
    let now = BsonDateTime::from_chrono(Utc::now());

    let result = polls
        .update_many(
            doc! { "is_active": true, "end_date": { "$lt": now } },
            doc! { "$set": { "is_active": false } },
        )
        .await?;

    Ok(result.modified_count)
}

pub fn spawn(state: AppState) -> JoinHandle<()> {
    let period = Duration::from_secs(state.config.sweep_interval_secs);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match deactivate_expired(&state.db).await {
                Ok(0) => {}
                Ok(count) => tracing::info!(count, "swept expired polls"),
                Err(err) => tracing::error!(error = %err, "poll status sweep failed"),
            }
        }
    })
}
