pub mod admin_routes;
pub mod auth_routes;
pub mod poll_routes;
