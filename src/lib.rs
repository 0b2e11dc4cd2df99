// Library modules for the Q&A forum
pub mod config;
pub mod models;
pub mod db;
pub mod routes;
pub mod services;
pub mod auth;
pub mod error;
pub mod utils;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use config::{AppConfig, ListingOrder};

use std::sync::Arc;

// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: db::DatabaseClient,
    pub question_service: Arc<services::QuestionService>,
    pub auth_service: Arc<auth::AuthService>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let db = db::DatabaseClient::new(&config).await?;
        Ok(Self::with_database(config, db))
    }

    /// Builds the state around an already-connected store
    pub fn with_database(config: AppConfig, db: db::DatabaseClient) -> Self {
        let auth_service = Arc::new(auth::AuthService::new(&config.jwt_secret));
        let question_service = Arc::new(services::QuestionService::new(
            db.question_repo.clone(),
            config.listing_order,
        ));

        Self {
            config,
            db,
            question_service,
            auth_service,
        }
    }
}
