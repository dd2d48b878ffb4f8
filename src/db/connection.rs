use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions},
    Client, Database, IndexModel,
};
use std::time::Duration;

use crate::config::Config;
use crate::models::{otp_models::Otp, poll_models::Poll, user_models::User, vote_models::Vote};
use crate::utils::error::{AppError, AppResult};

pub async fn init_db(config: &Config) -> AppResult<Database> {
    let mut client_options = ClientOptions::parse(&config.mongo_uri)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to parse MongoDB URI: {}", e)))?;

    client_options.app_name = Some("pollbox".to_string());

    let client = Client::with_options(client_options)
        .map_err(|e| AppError::DatabaseError(format!("Failed to initialize MongoDB client: {}", e)))?;

    let db = client.database(&config.db_name);
    ensure_indexes(&db).await?;

    tracing::info!(db = %config.db_name, "database connection established");

    Ok(db)
}

/// Creates the indexes the application relies on for correctness, not just
/// performance. The unique compound index on votes is the single concurrency
/// control for double voting; everything else would race without it.
pub async fn ensure_indexes(db: &Database) -> AppResult<()> {
    let unique = IndexOptions::builder().unique(true).build();

    db.collection::<Vote>("votes")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "poll_id": 1, "user_id": 1 })
                .options(unique.clone())
                .build(),
        )
        .await?;

    // Covers the sweeper's expiry scan.
    db.collection::<Poll>("polls")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "is_active": 1, "end_date": 1 })
                .build(),
        )
        .await?;

    let users = db.collection::<User>("users");
    users
        .create_index(
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique.clone())
                .build(),
        )
        .await?;
    users
        .create_index(
            IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(unique)
                .build(),
        )
        .await?;

    let otps = db.collection::<Otp>("otps");
    otps.create_index(
        IndexModel::builder()
            .keys(doc! { "email": 1, "purpose": 1 })
            .build(),
    )
    .await?;
    // TTL index: MongoDB removes expired codes on its own.
    otps.create_index(
        IndexModel::builder()
            .keys(doc! { "expires_at": 1 })
            .options(
                IndexOptions::builder()
                    .expire_after(Duration::from_secs(0))
                    .build(),
            )
            .build(),
    )
    .await?;

    Ok(())
}

/// True when the error is a violation of a unique index (MongoDB code 11000).
pub fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_err)) => write_err.code == 11000,
        _ => false,
    }
}
