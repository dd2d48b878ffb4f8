use axum::{extract::State, Json};

use crate::services::sweeper;
use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::utils::response::MessageResponse;

/// Manual sweep trigger; the same operation the background job runs.
pub async fn update_status(
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    let count = sweeper::deactivate_expired(&state.db).await?;

    if count > 0 {
        tracing::info!(count, "swept expired polls via endpoint");
    }

    Ok(Json(MessageResponse::new("Poll status updated")))
}
