pub mod postgres;
pub mod repository;

// Database connection and state management
use std::sync::Arc;
use crate::config::AppConfig;
use crate::utils::database_retry::{retry_database_operation, DatabaseRetryConfig};
use crate::Result;
use repository::{MemoryQuestionRepository, QuestionRepository};

#[derive(Clone)]
pub struct DatabaseClient {
    pub question_repo: Arc<dyn QuestionRepository>,
}

impl DatabaseClient {
    /// Connects to PostgreSQL when `DATABASE_URL` is configured, otherwise
    /// falls back to an empty in-memory store.
    pub async fn new(config: &AppConfig) -> Result<Self> {
        match &config.database_url {
            Some(url) => {
                let retry_config = DatabaseRetryConfig {
                    max_retries: config.db_connect_retries,
                    ..DatabaseRetryConfig::default()
                };
                let database = retry_database_operation(
                    || postgres::PostgresDatabase::new(url),
                    retry_config,
                ).await?;
                database.run_migrations().await?;
                Ok(Self::from_repo(Arc::new(database.question_repo())))
            }
            None => {
                tracing::warn!("⚠️ DATABASE: DATABASE_URL not set, using in-memory store");
                Ok(Self::from_repo(Arc::new(MemoryQuestionRepository::new())))
            }
        }
    }

    pub fn from_repo(question_repo: Arc<dyn QuestionRepository>) -> Self {
        Self { question_repo }
    }

    pub async fn health_check(&self) -> Result<()> {
        self.question_repo.ping().await
    }
}
