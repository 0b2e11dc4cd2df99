use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::{Comment, User};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub author_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// An answer joined with its author and the comments left on it.
#[derive(Debug, Clone)]
pub struct AnswerRecord {
    pub answer: Answer,
    pub author: User,
    pub comments: Vec<Comment>,
}
