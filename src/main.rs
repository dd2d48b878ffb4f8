use axum::{
    http::{HeaderValue, Method},
    response::Json,
    routing::get,
    Router,
};
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

mod config;
mod controllers;
mod db;
mod middleware;
mod models;
mod routes;
mod services;
mod state;
mod utils;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pollbox=debug,tower_http=debug".into()),
        )
        .init();

    let config = match config::Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };

    let database = match db::connection::init_db(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize database");
            std::process::exit(1);
        }
    };

    let mailer = match services::email::Mailer::from_config(&config.smtp) {
        Ok(mailer) => Arc::new(mailer),
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize mailer");
            std::process::exit(1);
        }
    };

    let app_state = state::AppState::new(database, mailer, config.clone());

    let origin = match config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => origin,
        Err(_) => {
            tracing::error!(origin = %config.cors_origin, "failed to parse CORS origin");
            std::process::exit(1);
        }
    };

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::header::COOKIE,
        ])
        .allow_credentials(true);

    // Expired polls are swept in-process on an interval; the
    // /api/polls/update-status endpoint triggers the same operation on
    // demand.
    services::sweeper::spawn(app_state.clone());

    let app = Router::new()
        .route("/", get(root))
        .nest("/api/auth", routes::auth_routes::auth_routes(app_state.clone()))
        .nest("/api/polls", routes::poll_routes::poll_routes(app_state.clone()))
        .nest("/api/admin", routes::admin_routes::admin_routes(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = match config.server_addr.parse() {
        Ok(addr) => addr,
        Err(_) => {
            tracing::error!(addr = %config.server_addr, "failed to parse SERVER_ADDR");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, origin = %config.cors_origin, "server starting");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}

async fn root() -> Json<serde_json::Value> {
    let seconds = START_TIME.elapsed().as_secs();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let uptime = if days > 0 {
        format!("{}d {}h {}m {}s", days, hours % 24, minutes % 60, seconds % 60)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes % 60, seconds % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    };

    Json(json!({
        "status": "ok",
        "message": format!("Backend is running! Uptime: {}", uptime)
    }))
}
