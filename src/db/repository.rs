// Repository trait abstraction for forum storage
use crate::models::{Answer, AnswerRecord, Comment, Question, QuestionRecord, User, Vote};
use crate::{AppError, Result};
use async_trait::async_trait;

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Every question with its associations, newest first
    async fn list_question_records(&self) -> Result<Vec<QuestionRecord>>;
    /// Questions with the given ids and their associations, newest first
    async fn get_question_records(&self, ids: &[i64]) -> Result<Vec<QuestionRecord>>;
    /// Ids of questions whose body contains `term`, ignoring case
    async fn search_question_ids(&self, term: &str) -> Result<Vec<i64>>;
    async fn get_votes_by_user(&self, user_id: i64) -> Result<Vec<Vote>>;
    async fn create_question(&self, author_id: i64, body: &str) -> Result<Question>;
    /// Returns `None` when no question has this id
    async fn update_question_body(&self, id: i64, body: &str) -> Result<Option<Question>>;
    /// Returns `false` when no question has this id
    async fn delete_question(&self, id: i64) -> Result<bool>;
    async fn ping(&self) -> Result<()>;
    fn backend(&self) -> &'static str;
}

// In-memory implementation for development and tests
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use chrono::Utc;

#[derive(Default)]
struct ForumData {
    users: HashMap<i64, User>,
    questions: Vec<Question>,
    answers: Vec<Answer>,
    comments: Vec<Comment>,
    votes: Vec<Vote>,
    last_id: i64,
}

impl ForumData {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn user(&self, id: i64) -> Result<User> {
        self.users.get(&id)
            .cloned()
            .ok_or_else(|| AppError::DatabaseError(format!("User {} referenced but not stored", id)))
    }

    fn records_for(&self, questions: Vec<&Question>) -> Result<Vec<QuestionRecord>> {
        let ids: Vec<i64> = questions.iter().map(|q| q.id).collect();

        let authored_questions = questions.into_iter()
            .map(|q| Ok((q.clone(), self.user(q.author_id)?)))
            .collect::<Result<Vec<_>>>()?;

        let authored_answers = self.answers.iter()
            .filter(|a| ids.contains(&a.question_id))
            .map(|a| Ok((a.clone(), self.user(a.author_id)?)))
            .collect::<Result<Vec<_>>>()?;

        let answer_ids: Vec<i64> = authored_answers.iter().map(|(a, _)| a.id).collect();
        let comments = self.comments.iter()
            .filter(|c| answer_ids.contains(&c.answer_id))
            .cloned()
            .collect();

        let votes = self.votes.iter()
            .filter(|v| ids.contains(&v.question_id))
            .cloned()
            .collect();

        Ok(assemble_records(authored_questions, authored_answers, comments, votes))
    }

    fn newest_first(&self) -> Vec<&Question> {
        let mut questions: Vec<&Question> = self.questions.iter().collect();
        questions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        questions
    }
}

pub struct MemoryQuestionRepository {
    data: Arc<Mutex<ForumData>>,
}

impl MemoryQuestionRepository {
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(ForumData::default())),
        }
    }

    fn data(&self) -> Result<MutexGuard<'_, ForumData>> {
        self.data.lock()
            .map_err(|_| AppError::InternalError("In-memory store lock poisoned".to_string()))
    }

    pub fn insert_user(&self, id: i64, username: &str) -> Result<User> {
        let mut data = self.data()?;
        let user = User { id, username: username.to_string() };
        data.users.insert(id, user.clone());
        Ok(user)
    }

    pub fn add_answer(&self, question_id: i64, author_id: i64, body: &str) -> Result<Answer> {
        let mut data = self.data()?;
        if !data.questions.iter().any(|q| q.id == question_id) {
            return Err(AppError::NotFound(format!("Question {} not found", question_id)));
        }
        let answer = Answer {
            id: data.next_id(),
            question_id,
            author_id,
            body: body.to_string(),
            created_at: Utc::now(),
        };
        data.answers.push(answer.clone());
        Ok(answer)
    }

    pub fn add_comment(&self, answer_id: i64, author_id: i64, body: &str) -> Result<Comment> {
        let mut data = self.data()?;
        if !data.answers.iter().any(|a| a.id == answer_id) {
            return Err(AppError::NotFound(format!("Answer {} not found", answer_id)));
        }
        let comment = Comment {
            id: data.next_id(),
            answer_id,
            author_id,
            body: body.to_string(),
            created_at: Utc::now(),
        };
        data.comments.push(comment.clone());
        Ok(comment)
    }

    /// Casts or replaces the user's vote on a question
    pub fn cast_vote(&self, user_id: i64, question_id: i64, is_up_vote: bool) -> Result<Vote> {
        let mut data = self.data()?;
        if let Some(existing) = data.votes.iter_mut()
            .find(|v| v.user_id == user_id && v.question_id == question_id)
        {
            existing.is_up_vote = is_up_vote;
            return Ok(existing.clone());
        }
        let vote = Vote {
            id: data.next_id(),
            user_id,
            question_id,
            is_up_vote,
        };
        data.votes.push(vote.clone());
        Ok(vote)
    }
}

impl Default for MemoryQuestionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionRepository for MemoryQuestionRepository {
    async fn list_question_records(&self) -> Result<Vec<QuestionRecord>> {
        let data = self.data()?;
        data.records_for(data.newest_first())
    }

    async fn get_question_records(&self, ids: &[i64]) -> Result<Vec<QuestionRecord>> {
        let data = self.data()?;
        let questions = data.newest_first()
            .into_iter()
            .filter(|q| ids.contains(&q.id))
            .collect();
        data.records_for(questions)
    }

    async fn search_question_ids(&self, term: &str) -> Result<Vec<i64>> {
        let needle = term.to_lowercase();
        let data = self.data()?;
        Ok(data.newest_first()
            .into_iter()
            .filter(|q| q.body.to_lowercase().contains(&needle))
            .map(|q| q.id)
            .collect())
    }

    async fn get_votes_by_user(&self, user_id: i64) -> Result<Vec<Vote>> {
        let data = self.data()?;
        Ok(data.votes.iter().filter(|v| v.user_id == user_id).cloned().collect())
    }

    async fn create_question(&self, author_id: i64, body: &str) -> Result<Question> {
        let mut data = self.data()?;
        let now = Utc::now();
        let question = Question {
            id: data.next_id(),
            author_id,
            body: body.to_string(),
            created_at: now,
            updated_at: now,
        };
        data.questions.push(question.clone());
        Ok(question)
    }

    async fn update_question_body(&self, id: i64, body: &str) -> Result<Option<Question>> {
        let mut data = self.data()?;
        Ok(data.questions.iter_mut().find(|q| q.id == id).map(|question| {
            question.body = body.to_string();
            question.updated_at = Utc::now();
            question.clone()
        }))
    }

    async fn delete_question(&self, id: i64) -> Result<bool> {
        let mut data = self.data()?;
        let before = data.questions.len();
        data.questions.retain(|q| q.id != id);
        if data.questions.len() == before {
            return Ok(false);
        }

        // Cascade to everything hanging off the question
        let removed_answers: Vec<i64> = data.answers.iter()
            .filter(|a| a.question_id == id)
            .map(|a| a.id)
            .collect();
        data.answers.retain(|a| a.question_id != id);
        data.comments.retain(|c| !removed_answers.contains(&c.answer_id));
        data.votes.retain(|v| v.question_id != id);
        Ok(true)
    }

    async fn ping(&self) -> Result<()> {
        self.data().map(|_| ())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Groups flat rows into question records. Question order is preserved;
/// answers and comments are attached oldest first.
pub(crate) fn assemble_records(
    questions: Vec<(Question, User)>,
    answers: Vec<(Answer, User)>,
    comments: Vec<Comment>,
    votes: Vec<Vote>,
) -> Vec<QuestionRecord> {
    let mut comments_by_answer: HashMap<i64, Vec<Comment>> = HashMap::new();
    for comment in comments {
        comments_by_answer.entry(comment.answer_id).or_default().push(comment);
    }

    let mut answers_by_question: HashMap<i64, Vec<AnswerRecord>> = HashMap::new();
    for (answer, author) in answers {
        let mut comments = comments_by_answer.remove(&answer.id).unwrap_or_default();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        answers_by_question.entry(answer.question_id).or_default().push(AnswerRecord {
            answer,
            author,
            comments,
        });
    }

    let mut votes_by_question: HashMap<i64, Vec<Vote>> = HashMap::new();
    for vote in votes {
        votes_by_question.entry(vote.question_id).or_default().push(vote);
    }

    questions.into_iter()
        .map(|(question, author)| {
            let mut answers = answers_by_question.remove(&question.id).unwrap_or_default();
            answers.sort_by(|a, b| a.answer.created_at.cmp(&b.answer.created_at).then(a.answer.id.cmp(&b.answer.id)));
            let votes = votes_by_question.remove(&question.id).unwrap_or_default();
            QuestionRecord { question, author, answers, votes }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> MemoryQuestionRepository {
        let repo = MemoryQuestionRepository::new();
        repo.insert_user(1, "ada").unwrap();
        repo.insert_user(2, "grace").unwrap();
        repo
    }

    #[tokio::test]
    async fn test_records_carry_nested_associations() {
        let repo = seeded();
        let question = repo.create_question(1, "How do lifetimes work?").await.unwrap();
        let answer = repo.add_answer(question.id, 2, "They bound references").unwrap();
        repo.add_comment(answer.id, 1, "Thanks!").unwrap();
        repo.cast_vote(2, question.id, true).unwrap();

        let records = repo.list_question_records().await.unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.author.username, "ada");
        assert_eq!(record.answers.len(), 1);
        assert_eq!(record.answers[0].author.username, "grace");
        assert_eq!(record.answers[0].comments[0].body, "Thanks!");
        assert_eq!(record.votes.len(), 1);
    }

    #[tokio::test]
    async fn test_cast_vote_replaces_existing_vote() {
        let repo = seeded();
        let question = repo.create_question(1, "Borrowck?").await.unwrap();

        repo.cast_vote(2, question.id, true).unwrap();
        repo.cast_vote(2, question.id, false).unwrap();

        let votes = repo.get_votes_by_user(2).await.unwrap();
        assert_eq!(votes.len(), 1);
        assert!(!votes[0].is_up_vote);
    }

    #[tokio::test]
    async fn test_search_ignores_case() {
        let repo = seeded();
        let hit = repo.create_question(1, "What is a FOOBAR?").await.unwrap();
        repo.create_question(1, "Unrelated").await.unwrap();

        let ids = repo.search_question_ids("foo").await.unwrap();

        assert_eq!(ids, vec![hit.id]);
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let repo = seeded();
        let question = repo.create_question(1, "Delete me").await.unwrap();
        let answer = repo.add_answer(question.id, 2, "ok").unwrap();
        repo.add_comment(answer.id, 1, "bye").unwrap();
        repo.cast_vote(2, question.id, false).unwrap();

        assert!(repo.delete_question(question.id).await.unwrap());
        assert!(!repo.delete_question(question.id).await.unwrap());

        assert!(repo.list_question_records().await.unwrap().is_empty());
        assert!(repo.get_votes_by_user(2).await.unwrap().is_empty());
        assert!(repo.add_comment(answer.id, 1, "gone").is_err());
    }

    #[tokio::test]
    async fn test_update_missing_question_returns_none() {
        let repo = seeded();
        assert!(repo.update_question_body(404, "new").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_author_is_reported() {
        let repo = MemoryQuestionRepository::new();
        repo.create_question(7, "orphan").await.unwrap();

        let result = repo.list_question_records().await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }
}
