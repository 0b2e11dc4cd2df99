use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::{AnswerRecord, User, Vote};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub author_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A question with every association the forum pages need already loaded.
#[derive(Debug, Clone)]
pub struct QuestionRecord {
    pub question: Question,
    pub author: User,
    pub answers: Vec<AnswerRecord>,
    pub votes: Vec<Vote>,
}

#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuestionRequest {
    #[serde(rename = "newQue")]
    pub new_que: String,
}

#[derive(Debug, Serialize)]
pub struct CreateQuestionResponse {
    pub author: String,
    pub question: Question,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}
