pub mod models;
pub mod polls;
pub mod stats;
pub mod users;
