use axum::{middleware, routing::get, Router};

use crate::controllers::admin_controllers::{polls, stats, users};
use crate::middleware::auth::{require_admin, require_auth};
use crate::state::AppState;

pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(users::list_users))
        .route(
            "/users/:userId",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/polls", get(polls::list_polls))
        .route(
            "/polls/:pollId",
            get(polls::get_poll)
                .patch(polls::update_poll)
                .delete(polls::delete_poll),
        )
        .route("/stats", get(stats::get_stats))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}
