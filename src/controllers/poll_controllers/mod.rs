pub mod cast_vote;
pub mod create_poll;
pub mod get_poll;
pub mod get_results;
pub mod list_polls;
pub mod models;
pub mod update_status;
pub mod user_votes;
