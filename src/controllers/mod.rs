pub mod admin_controllers;
pub mod auth_controllers;
pub mod poll_controllers;
