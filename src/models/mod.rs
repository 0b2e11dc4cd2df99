pub mod user;
pub mod question;
pub mod answer;
pub mod comment;
pub mod vote;
pub mod view;

// Re-export models for convenience
pub use user::User;
pub use question::{Question, QuestionRecord, CreateQuestionRequest, UpdateQuestionRequest, CreateQuestionResponse, SearchParams};
pub use answer::{Answer, AnswerRecord};
pub use comment::Comment;
pub use vote::{Vote, VoteTally, VoteBucket, CurrentUserVote, UserVoteRef};
pub use view::{QuestionView, AnswerView, CommentView, QuestionSummary, QuestionHeader, AnswerDetail, QuestionDetail, HomePage, SearchNotFound};
