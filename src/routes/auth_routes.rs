use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::controllers::auth_controllers::{
    forgot_password, login, logout, profile, reset_password, send_otp, verify_otp,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn auth_routes(state: AppState) -> Router {
    let public = Router::new()
        .route("/register/send-otp", post(send_otp::send_otp))
        .route("/register/verify-otp", post(verify_otp::verify_otp))
        .route("/login", post(login::login))
        .route("/forgot-password", post(forgot_password::forgot_password))
        .route("/reset-password", post(reset_password::reset_password))
        .route("/logout", post(logout::logout));

    let protected = Router::new()
        .route("/profile", get(profile::profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new().merge(public).merge(protected).with_state(state)
}
