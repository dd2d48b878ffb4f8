use mongodb::Database;
use std::sync::Arc;

use crate::config::Config;
use crate::services::email::Mailer;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub mailer: Arc<Mailer>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: Arc<Database>, mailer: Arc<Mailer>, config: Arc<Config>) -> Self {
        Self { db, mailer, config }
    }
}
