use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::controllers::poll_controllers::{
    cast_vote, create_poll, get_poll, get_results, list_polls, update_status, user_votes,
};
use crate::middleware::auth::{require_admin, require_auth};
use crate::state::AppState;

pub fn poll_routes(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(list_polls::list_polls))
        .route("/update-status", get(update_status::update_status))
        .route("/:pollId/results", get(get_results::get_results));

    let authenticated = Router::new()
        .route("/:pollId", get(get_poll::get_poll))
        .route("/:pollId/vote", post(cast_vote::cast_vote))
        .route("/user/votes", get(user_votes::user_votes))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let admin_only = Router::new()
        .route("/", post(create_poll::create_poll))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(authenticated)
        .merge(admin_only)
        .with_state(state)
}
