pub mod aggregator;
pub mod question_service;

// Re-export services for convenience
pub use question_service::{QuestionService, SearchOutcome};
