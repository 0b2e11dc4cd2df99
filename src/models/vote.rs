use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user's up or down vote on a question
/// At most one vote exists per (user, question); the schema enforces it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: i64,
    pub user_id: i64,
    pub question_id: i64,
    /// Upvote (true) or downvote (false)
    pub is_up_vote: bool,
}

/// Votes cast in one direction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteBucket {
    pub count: usize,
    pub user_ids: Vec<i64>,
}

/// How the requesting user voted on a question, if at all
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserVote {
    pub voted: bool,
    pub is_up_vote: bool,
}

/// Per-question vote tally handed to the templates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    pub up: VoteBucket,
    pub down: VoteBucket,
    pub current_user: CurrentUserVote,
}

/// One of the current user's votes, keyed by question, for the listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserVoteRef {
    pub id: i64,
    #[serde(rename = "isUpvote")]
    pub is_upvote: bool,
}

impl VoteTally {
    /// Single pass over the votes of one question.
    /// `current_user` is `None` for anonymous requests.
    pub fn from_votes(votes: &[Vote], current_user: Option<i64>) -> Self {
        let mut tally = Self::default();

        for vote in votes {
            if current_user == Some(vote.user_id) {
                tally.current_user = CurrentUserVote {
                    voted: true,
                    is_up_vote: vote.is_up_vote,
                };
            }

            let bucket = if vote.is_up_vote { &mut tally.up } else { &mut tally.down };
            bucket.count += 1;
            bucket.user_ids.push(vote.user_id);
        }

        tally
    }

    pub fn total(&self) -> usize {
        self.up.count + self.down.count
    }

    /// Upvote/downvote ratio used for engagement ranking.
    /// Questions with only upvotes rank above everything else; no votes at all is 0.
    pub fn engagement_ratio(&self) -> f64 {
        match (self.up.count, self.down.count) {
            (0, 0) => 0.0,
            (_, 0) => f64::INFINITY,
            (up, down) => up as f64 / down as f64,
        }
    }
}

impl From<&Vote> for UserVoteRef {
    fn from(vote: &Vote) -> Self {
        Self {
            id: vote.question_id,
            is_upvote: vote.is_up_vote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(id: i64, user_id: i64, is_up_vote: bool) -> Vote {
        Vote { id, user_id, question_id: 1, is_up_vote }
    }

    #[test]
    fn test_tally_counts_every_vote_once() {
        let votes = vec![
            vote(1, 10, true),
            vote(2, 11, false),
            vote(3, 12, true),
            vote(4, 13, true),
        ];

        let tally = VoteTally::from_votes(&votes, Some(99));

        assert_eq!(tally.up.count, 3);
        assert_eq!(tally.up.user_ids, vec![10, 12, 13]);
        assert_eq!(tally.down.count, 1);
        assert_eq!(tally.down.user_ids, vec![11]);
        assert_eq!(tally.total(), votes.len());
        assert!(!tally.current_user.voted);
    }

    #[test]
    fn test_tally_flags_current_user_downvote() {
        let votes = vec![vote(1, 10, true), vote(2, 42, false)];

        let tally = VoteTally::from_votes(&votes, Some(42));

        assert_eq!(tally.current_user, CurrentUserVote { voted: true, is_up_vote: false });
        assert_eq!(tally.down.user_ids.iter().filter(|id| **id == 42).count(), 1);
        assert!(!tally.up.user_ids.contains(&42));
    }

    #[test]
    fn test_tally_over_all_small_vote_sets() {
        // Voters 1..=n; bit i of `mask` decides voter i+1's direction
        for n in 0..=4usize {
            for mask in 0..(1u32 << n) {
                let votes: Vec<Vote> = (0..n)
                    .map(|i| vote(i as i64, i as i64 + 1, mask & (1 << i) != 0))
                    .collect();
                let ups = votes.iter().filter(|v| v.is_up_vote).count();

                for current_user in [None, Some(1), Some(n as i64), Some(99)] {
                    let tally = VoteTally::from_votes(&votes, current_user);
                    let case = format!("n={} mask={:b} user={:?}", n, mask, current_user);

                    assert_eq!(tally.total(), n, "{}", case);
                    assert_eq!(tally.up.count, ups, "{}", case);
                    assert_eq!(tally.up.user_ids.len(), tally.up.count, "{}", case);
                    assert_eq!(tally.down.user_ids.len(), tally.down.count, "{}", case);

                    let own = current_user.and_then(|user| votes.iter().find(|v| v.user_id == user));
                    match own {
                        Some(own) => {
                            assert_eq!(
                                tally.current_user,
                                CurrentUserVote { voted: true, is_up_vote: own.is_up_vote },
                                "{}", case
                            );
                            let (mine, other) = if own.is_up_vote {
                                (&tally.up, &tally.down)
                            } else {
                                (&tally.down, &tally.up)
                            };
                            assert_eq!(mine.user_ids.iter().filter(|id| **id == own.user_id).count(), 1, "{}", case);
                            assert!(!other.user_ids.contains(&own.user_id), "{}", case);
                        }
                        None => assert_eq!(tally.current_user, CurrentUserVote::default(), "{}", case),
                    }
                }
            }
        }
    }

    #[test]
    fn test_tally_for_anonymous_request() {
        let votes = vec![vote(1, 10, true)];

        let tally = VoteTally::from_votes(&votes, None);

        assert_eq!(tally.current_user, CurrentUserVote::default());
        assert_eq!(tally.up.count, 1);
    }

    #[test]
    fn test_empty_tally() {
        let tally = VoteTally::from_votes(&[], Some(1));
        assert_eq!(tally, VoteTally::default());
        assert_eq!(tally.engagement_ratio(), 0.0);
    }

    #[test]
    fn test_engagement_ratio() {
        let only_up = VoteTally::from_votes(&[vote(1, 1, true)], None);
        assert!(only_up.engagement_ratio().is_infinite());

        let mixed = VoteTally::from_votes(
            &[vote(1, 1, true), vote(2, 2, true), vote(3, 3, true), vote(4, 4, false), vote(5, 5, false)],
            None,
        );
        assert_eq!(mixed.engagement_ratio(), 1.5);

        let only_down = VoteTally::from_votes(&[vote(1, 1, false)], None);
        assert_eq!(only_down.engagement_ratio(), 0.0);
    }

    #[test]
    fn test_tally_serializes_for_templates() {
        let tally = VoteTally::from_votes(&[vote(1, 7, true)], Some(7));
        let json = serde_json::to_value(&tally).unwrap();

        assert_eq!(json["up"]["count"], 1);
        assert_eq!(json["up"]["userIds"][0], 7);
        assert_eq!(json["currentUser"]["voted"], true);
        assert_eq!(json["currentUser"]["isUpVote"], true);
    }
}
