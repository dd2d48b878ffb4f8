pub mod email;
pub mod sweeper;
