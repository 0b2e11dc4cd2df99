//! Reshapes loaded question records into the view models the templates
//! consume. Everything here is a pure function of its input.

use std::cmp::Ordering;

use crate::models::{
    AnswerDetail, AnswerRecord, AnswerView, Comment, CommentView, QuestionDetail, QuestionHeader,
    QuestionRecord, QuestionSummary, QuestionView, VoteTally,
};

fn shape_comments(comments: Vec<Comment>) -> Vec<CommentView> {
    comments.into_iter()
        .map(|comment| CommentView {
            author_id: comment.author_id,
            body: comment.body,
        })
        .collect()
}

/// Maps each answer to `{authorId, author, body, comments}`.
/// Search results drop the comments.
pub fn shape_answers(answers: Vec<AnswerRecord>, with_comments: bool) -> Vec<AnswerView> {
    answers.into_iter()
        .map(|record| AnswerView {
            author_id: record.answer.author_id,
            author: record.author.username,
            body: record.answer.body,
            comments: if with_comments { shape_comments(record.comments) } else { vec![] },
        })
        .collect()
}

/// Listing entry: answers with comments plus the full vote tally
pub fn shape_question(record: QuestionRecord, current_user: Option<i64>) -> QuestionView {
    let votes = VoteTally::from_votes(&record.votes, current_user);

    QuestionView {
        id: record.question.id,
        body: record.question.body,
        author: record.author.username,
        author_id: record.author.id,
        answers: shape_answers(record.answers, true),
        votes,
    }
}

/// Search entry: plain up/down counts instead of the tally
pub fn summarize_question(record: QuestionRecord) -> QuestionSummary {
    let num_upvotes = record.votes.iter().filter(|vote| vote.is_up_vote).count();
    let num_downvotes = record.votes.len() - num_upvotes;

    QuestionSummary {
        id: record.question.id,
        body: record.question.body,
        author: record.author.username,
        author_id: record.author.id,
        answers: shape_answers(record.answers, false),
        num_upvotes,
        num_downvotes,
    }
}

pub fn shape_detail(record: QuestionRecord, current_user: Option<i64>) -> QuestionDetail {
    let votes = VoteTally::from_votes(&record.votes, current_user);

    let answers = record.answers.into_iter()
        .map(|answer| AnswerDetail {
            id: answer.answer.id,
            body: answer.answer.body,
            created_at: answer.answer.created_at,
            author: answer.author.username,
            author_id: answer.author.id,
            comments: shape_comments(answer.comments),
        })
        .collect();

    QuestionDetail {
        title: record.question.body.clone(),
        question: QuestionHeader {
            id: record.question.id,
            body: record.question.body,
            author: record.author.username,
            author_id: record.author.id,
            created_at: record.question.created_at,
        },
        answers,
        votes,
    }
}

/// Highest upvote/downvote ratio first. Stable, so ties keep store order.
pub fn sort_by_engagement(questions: &mut [QuestionView]) {
    questions.sort_by(|a, b| {
        b.votes.engagement_ratio()
            .partial_cmp(&a.votes.engagement_ratio())
            .unwrap_or(Ordering::Equal)
    });
}

/// Most upvotes first. Stable, so ties keep store order.
pub fn sort_by_upvotes(summaries: &mut [QuestionSummary]) {
    summaries.sort_by(|a, b| b.num_upvotes.cmp(&a.num_upvotes));
}
