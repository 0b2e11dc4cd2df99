//! View models handed to the template layer. Field names follow the
//! camelCase keys the templates read.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{UserVoteRef, VoteTally};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub author_id: i64,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerView {
    pub author_id: i64,
    pub author: String,
    pub body: String,
    pub comments: Vec<CommentView>,
}

/// A question as shown on the listing page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: i64,
    pub body: String,
    pub author: String,
    pub author_id: i64,
    pub answers: Vec<AnswerView>,
    pub votes: VoteTally,
}

/// A search hit; answers are shown without their comments
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    pub id: i64,
    pub body: String,
    pub author: String,
    pub author_id: i64,
    pub answers: Vec<AnswerView>,
    pub num_upvotes: usize,
    pub num_downvotes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionHeader {
    pub id: i64,
    pub body: String,
    pub author: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDetail {
    pub id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub author: String,
    pub author_id: i64,
    pub comments: Vec<CommentView>,
}

/// Single question thread page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetail {
    pub title: String,
    pub question: QuestionHeader,
    pub answers: Vec<AnswerDetail>,
    pub votes: VoteTally,
}

/// Context of the `home` template
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage<Q> {
    pub questions: Vec<Q>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_votes: Option<Vec<UserVoteRef>>,
}

/// Context of the `search-not-found` template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchNotFound {
    pub search: String,
}
