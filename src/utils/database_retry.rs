use std::time::Duration;
use tokio::time::sleep;
use crate::{AppError, Result};

/// Configuration for database operation retries
#[derive(Debug, Clone)]
pub struct DatabaseRetryConfig {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for DatabaseRetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
        }
    }
}

impl DatabaseRetryConfig {
    fn next_delay(&self, delay_ms: u64) -> u64 {
        (((delay_ms as f64) * self.backoff_multiplier) as u64).min(self.max_delay_ms)
    }
}

/// Retry a database operation with exponential backoff
pub async fn retry_database_operation<F, Fut, T>(
    operation: F,
    config: DatabaseRetryConfig,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut delay = config.initial_delay_ms;
    let mut last_error = AppError::DatabaseError("Operation was never attempted".to_string());

    for attempt in 1..=config.max_retries.max(1) {
        tracing::debug!("🔄 DATABASE_RETRY: Attempt {}/{}", attempt, config.max_retries);

        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::info!("✅ DATABASE_RETRY: Operation succeeded on attempt {}", attempt);
                }
                return Ok(result);
            }
            Err(e) => {
                last_error = e;

                if attempt < config.max_retries {
                    tracing::warn!("⚠️ DATABASE_RETRY: Attempt {} failed: {}, retrying in {}ms",
                                  attempt, last_error, delay);
                    sleep(Duration::from_millis(delay)).await;
                    delay = config.next_delay(delay);
                }
            }
        }
    }

    tracing::error!("❌ DATABASE_RETRY: All {} attempts failed, last error: {}",
                   config.max_retries, last_error);
    Err(last_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_config(max_retries: u32) -> DatabaseRetryConfig {
        DatabaseRetryConfig {
            max_retries,
            initial_delay_ms: 1,
            max_delay_ms: 2,
            backoff_multiplier: 2.0,
        }
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;

        let result = retry_database_operation(|| async move {
            if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(AppError::DatabaseError("connection refused".to_string()))
            } else {
                Ok(42)
            }
        }, fast_config(3)).await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_returns_last_error_when_exhausted() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;

        let result: Result<()> = retry_database_operation(|| async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(AppError::DatabaseError("still down".to_string()))
        }, fast_config(2)).await;

        assert!(matches!(result, Err(AppError::DatabaseError(msg)) if msg == "still down"));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_delay_is_capped() {
        let config = DatabaseRetryConfig::default();
        assert_eq!(config.next_delay(100), 200);
        assert_eq!(config.next_delay(4000), 5000);
    }
}
