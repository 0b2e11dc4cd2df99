// PostgreSQL repository implementation using sqlx
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use std::sync::Arc;
use std::time::Duration;
use crate::{Result, AppError};
use crate::models::{Answer, Comment, Question, QuestionRecord, User, Vote};
use crate::db::repository::{assemble_records, QuestionRepository};

// PostgreSQL connection pool wrapper
pub struct PostgresDatabase {
    pub pool: Arc<PgPool>,
}

impl PostgresDatabase {
    pub async fn new(database_url: &str) -> Result<Self> {
        tracing::info!("🔗 DATABASE: Configuring connection pool");
        tracing::info!("   📊 Max connections: 20");
        tracing::info!("   ⏰ Connection timeout: 30s");

        let pool = PgPoolOptions::new()
            .max_connections(20)
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(3600))
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await
            .map_err(|e| {
                tracing::error!("❌ DATABASE: Failed to create connection pool: {}", e);
                AppError::DatabaseError(format!("Failed to connect to PostgreSQL: {}", e))
            })?;

        tracing::info!("✅ DATABASE: Connection pool configured successfully");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&*self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to run migrations: {}", e)))?;
        tracing::info!("✅ DATABASE: Migrations applied");
        Ok(())
    }

    pub fn question_repo(&self) -> PostgresQuestionRepository {
        PostgresQuestionRepository { pool: self.pool.clone() }
    }
}

#[derive(FromRow)]
struct AuthoredQuestionRow {
    #[sqlx(flatten)]
    question: Question,
    author_username: String,
}

#[derive(FromRow)]
struct AuthoredAnswerRow {
    #[sqlx(flatten)]
    answer: Answer,
    author_username: String,
}

impl AuthoredQuestionRow {
    fn split(self) -> (Question, User) {
        let author = User { id: self.question.author_id, username: self.author_username };
        (self.question, author)
    }
}

impl AuthoredAnswerRow {
    fn split(self) -> (Answer, User) {
        let author = User { id: self.answer.author_id, username: self.author_username };
        (self.answer, author)
    }
}

/// Escapes LIKE wildcards so the search term matches literally
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

// PostgreSQL Question Repository
pub struct PostgresQuestionRepository {
    pool: Arc<PgPool>,
}

impl PostgresQuestionRepository {
    /// Loads answers, comments and votes for already-fetched questions
    async fn load_associations(&self, rows: Vec<AuthoredQuestionRow>) -> Result<Vec<QuestionRecord>> {
        if rows.is_empty() {
            return Ok(vec![]);
        }
        let questions: Vec<(Question, User)> = rows.into_iter().map(AuthoredQuestionRow::split).collect();
        let question_ids: Vec<i64> = questions.iter().map(|(q, _)| q.id).collect();

        let answers: Vec<(Answer, User)> = sqlx::query_as::<_, AuthoredAnswerRow>(
            r#"
            SELECT a.id, a.question_id, a.author_id, a.body, a.created_at, u.username AS author_username
            FROM answers a
            JOIN users u ON u.id = a.author_id
            WHERE a.question_id = ANY($1)
            ORDER BY a.created_at, a.id
            "#,
        )
        .bind(&question_ids)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to load answers: {}", e)))?
        .into_iter()
        .map(AuthoredAnswerRow::split)
        .collect();

        let answer_ids: Vec<i64> = answers.iter().map(|(a, _)| a.id).collect();
        let comments = if answer_ids.is_empty() {
            vec![]
        } else {
            sqlx::query_as::<_, Comment>(
                r#"
                SELECT id, answer_id, author_id, body, created_at
                FROM comments
                WHERE answer_id = ANY($1)
                ORDER BY created_at, id
                "#,
            )
            .bind(&answer_ids)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to load comments: {}", e)))?
        };

        let votes = sqlx::query_as::<_, Vote>(
            "SELECT id, user_id, question_id, is_up_vote FROM votes WHERE question_id = ANY($1)",
        )
        .bind(&question_ids)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to load votes: {}", e)))?;

        Ok(assemble_records(questions, answers, comments, votes))
    }
}

#[async_trait]
impl QuestionRepository for PostgresQuestionRepository {
    async fn list_question_records(&self) -> Result<Vec<QuestionRecord>> {
        let rows = sqlx::query_as::<_, AuthoredQuestionRow>(
            r#"
            SELECT q.id, q.author_id, q.body, q.created_at, q.updated_at, u.username AS author_username
            FROM questions q
            JOIN users u ON u.id = q.author_id
            ORDER BY q.created_at DESC, q.id DESC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list questions: {}", e)))?;

        self.load_associations(rows).await
    }

    async fn get_question_records(&self, ids: &[i64]) -> Result<Vec<QuestionRecord>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let rows = sqlx::query_as::<_, AuthoredQuestionRow>(
            r#"
            SELECT q.id, q.author_id, q.body, q.created_at, q.updated_at, u.username AS author_username
            FROM questions q
            JOIN users u ON u.id = q.author_id
            WHERE q.id = ANY($1)
            ORDER BY q.created_at DESC, q.id DESC
            "#,
        )
        .bind(ids)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to get questions: {}", e)))?;

        self.load_associations(rows).await
    }

    async fn search_question_ids(&self, term: &str) -> Result<Vec<i64>> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM questions
            WHERE body ILIKE $1 ESCAPE '\'
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(like_pattern(term))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to search questions: {}", e)))
    }

    async fn get_votes_by_user(&self, user_id: i64) -> Result<Vec<Vote>> {
        sqlx::query_as::<_, Vote>(
            "SELECT id, user_id, question_id, is_up_vote FROM votes WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to get user votes: {}", e)))
    }

    async fn create_question(&self, author_id: i64, body: &str) -> Result<Question> {
        sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (author_id, body)
            VALUES ($1, $2)
            RETURNING id, author_id, body, created_at, updated_at
            "#,
        )
        .bind(author_id)
        .bind(body)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create question: {}", e)))
    }

    async fn update_question_body(&self, id: i64, body: &str) -> Result<Option<Question>> {
        sqlx::query_as::<_, Question>(
            r#"
            UPDATE questions
            SET body = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, author_id, body, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(body)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update question: {}", e)))
    }

    async fn delete_question(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&*self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete question: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&*self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Database ping failed: {}", e)))?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("foo"), "%foo%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("snake_case"), "%snake\\_case%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
