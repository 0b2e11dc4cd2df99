use std::sync::Arc;

use crate::config::ListingOrder;
use crate::db::repository::QuestionRepository;
use crate::models::{
    HomePage, Question, QuestionDetail, QuestionSummary, QuestionView, SearchNotFound, UserVoteRef,
};
use crate::services::aggregator;
use crate::{AppError, Result};

/// Result of a body search: either matching questions or the term that found nothing
#[derive(Debug)]
pub enum SearchOutcome {
    Found(HomePage<QuestionSummary>),
    NotFound(SearchNotFound),
}

pub struct QuestionService {
    question_repo: Arc<dyn QuestionRepository>,
    listing_order: ListingOrder,
}

impl QuestionService {
    pub fn new(question_repo: Arc<dyn QuestionRepository>, listing_order: ListingOrder) -> Self {
        Self { question_repo, listing_order }
    }

    pub async fn list_questions(&self, current_user: i64) -> Result<HomePage<QuestionView>> {
        let records = self.question_repo.list_question_records().await?;

        let mut questions: Vec<QuestionView> = records.into_iter()
            .map(|record| aggregator::shape_question(record, Some(current_user)))
            .collect();

        if self.listing_order == ListingOrder::Engagement {
            aggregator::sort_by_engagement(&mut questions);
        }

        let user_votes = self.question_repo.get_votes_by_user(current_user).await?
            .iter()
            .map(UserVoteRef::from)
            .collect();

        tracing::debug!("Listed {} questions for user {}", questions.len(), current_user);

        Ok(HomePage {
            questions,
            user_votes: Some(user_votes),
        })
    }

    pub async fn get_question_detail(&self, id: i64, current_user: i64) -> Result<QuestionDetail> {
        let record = self.question_repo.get_question_records(&[id]).await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("Question {} not found", id)))?;

        Ok(aggregator::shape_detail(record, Some(current_user)))
    }

    /// Case-insensitive substring search over question bodies.
    /// A blank term finds nothing.
    pub async fn search_questions(&self, term: &str) -> Result<SearchOutcome> {
        let term = term.trim();

        let ids = if term.is_empty() {
            vec![]
        } else {
            self.question_repo.search_question_ids(term).await?
        };

        if ids.is_empty() {
            tracing::debug!("Search for {:?} found nothing", term);
            return Ok(SearchOutcome::NotFound(SearchNotFound { search: term.to_string() }));
        }

        // Matches can be deleted between the id lookup and the load
        let mut summaries: Vec<QuestionSummary> = self.question_repo.get_question_records(&ids).await?
            .into_iter()
            .map(aggregator::summarize_question)
            .collect();
        if summaries.is_empty() {
            tracing::debug!("Search for {:?} matched questions that are gone", term);
            return Ok(SearchOutcome::NotFound(SearchNotFound { search: term.to_string() }));
        }
        aggregator::sort_by_upvotes(&mut summaries);

        tracing::debug!("Search for {:?} matched {} questions", term, summaries.len());

        Ok(SearchOutcome::Found(HomePage {
            questions: summaries,
            user_votes: None,
        }))
    }

    pub async fn create_question(&self, author_id: i64, body: &str) -> Result<Question> {
        Self::validate_body(body)?;
        let question = self.question_repo.create_question(author_id, body).await?;
        tracing::info!("✅ Created question {} by user {}", question.id, author_id);
        Ok(question)
    }

    pub async fn update_question(&self, id: i64, body: &str) -> Result<Question> {
        Self::validate_body(body)?;
        let question = self.question_repo.update_question_body(id, body).await?
            .ok_or_else(|| AppError::NotFound(format!("Question {} not found", id)))?;
        tracing::info!("✅ Updated question {}", id);
        Ok(question)
    }

    pub async fn delete_question(&self, id: i64) -> Result<()> {
        if !self.question_repo.delete_question(id).await? {
            return Err(AppError::NotFound(format!("Question {} not found", id)));
        }
        tracing::info!("✅ Deleted question {}", id);
        Ok(())
    }

    /// Whitespace-only bodies are rejected; accepted bodies are stored as sent
    fn validate_body(body: &str) -> Result<()> {
        if body.trim().is_empty() {
            return Err(AppError::ValidationError("Question body must not be empty".to_string()));
        }
        Ok(())
    }
}
