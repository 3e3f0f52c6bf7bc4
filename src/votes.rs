//! Vote tally and the cast-vote command.

use serde::Serialize;
use tracing::{debug, info};

use crate::auth::Viewer;
use crate::error::AppError;
use crate::models::Vote;
use crate::repository::Repository;

/// Net score of a post plus the viewer's own current vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub score: i64,
    /// `Some(true)` upvoted, `Some(false)` downvoted, `None` no vote or anonymous.
    pub viewer_choice: Option<bool>,
}

/// Compute the tally for `votes`, which must be ordered most recent first.
///
/// Every record counts towards the score, including several from the same
/// user. When the sum is exactly zero for a non-empty list, the score takes
/// the sign of the first vote instead, so a post with votes never shows 0.
#[must_use]
pub fn tally(votes: &[Vote], viewer: Option<&str>) -> Tally {
    let score = match votes.first() {
        None => 0,
        Some(first) => match votes
            .iter()
            .map(|v| if v.upvote { 1_i64 } else { -1 })
            .sum::<i64>()
        {
            0 if first.upvote => 1,
            0 => -1,
            sum => sum,
        },
    };

    let viewer_choice =
        viewer.and_then(|name| votes.iter().find(|v| v.username == name).map(|v| v.upvote));

    Tally {
        score,
        viewer_choice,
    }
}

/// What a vote click should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum VoteAction {
    /// Already voted this way; nothing to send.
    Unchanged,
    Insert { upvote: bool },
}

/// Decide the action for a vote click given the viewer's current choice.
///
/// # Errors
///
/// Returns [`AppError::NotAuthenticated`] when there is no viewer.
pub fn cast_vote(
    viewer: Option<&Viewer>,
    current: Option<bool>,
    is_upvote: bool,
) -> Result<VoteAction, AppError> {
    if viewer.is_none() {
        return Err(AppError::NotAuthenticated);
    }
    if current == Some(is_upvote) {
        return Ok(VoteAction::Unchanged);
    }
    Ok(VoteAction::Insert { upvote: is_upvote })
}

/// Result of [`submit_vote`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteOutcome {
    #[serde(flatten)]
    pub action: VoteAction,
    pub tally: Tally,
}

/// Run a vote click end to end: read the current votes, decide, insert a
/// new vote record if needed, then re-query so the tally reflects the
/// service's state.
///
/// # Errors
///
/// Returns [`AppError::NotAuthenticated`] before any remote call when there
/// is no viewer, or [`AppError::Remote`] if a query or the mutation fails.
pub async fn submit_vote(
    repo: &dyn Repository,
    viewer: Option<&Viewer>,
    post_id: i64,
    is_upvote: bool,
) -> Result<VoteOutcome, AppError> {
    let Some(viewer) = viewer else {
        return Err(AppError::NotAuthenticated);
    };

    let votes = repo.query_votes_by_post(post_id).await?;
    let current = tally(&votes, Some(&viewer.username));

    let action = cast_vote(Some(viewer), current.viewer_choice, is_upvote)?;
    let VoteAction::Insert { upvote } = action else {
        debug!(post_id, username = %viewer.username, "Vote unchanged, skipping mutation");
        return Ok(VoteOutcome {
            action,
            tally: current,
        });
    };

    let vote = repo
        .insert_vote(post_id, &viewer.username, upvote)
        .await?;
    info!(post_id, vote_id = vote.id, upvote, username = %viewer.username, "Vote recorded");

    let refreshed = repo.query_votes_by_post(post_id).await?;
    Ok(VoteOutcome {
        action,
        tally: tally(&refreshed, Some(&viewer.username)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryRepository, RepoCall};

    fn vote(username: &str, upvote: bool) -> Vote {
        Vote {
            id: 0,
            post_id: 1,
            username: username.to_string(),
            upvote,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_empty_votes_score_zero() {
        assert_eq!(tally(&[], Some("alice")).score, 0);
        assert_eq!(tally(&[], None).viewer_choice, None);
    }

    #[test]
    fn test_single_votes() {
        assert_eq!(tally(&[vote("a", true)], None).score, 1);
        assert_eq!(tally(&[vote("a", false)], None).score, -1);
    }

    #[test]
    fn test_zero_sum_takes_sign_of_first_vote() {
        assert_eq!(tally(&[vote("a", true), vote("b", false)], None).score, 1);
        assert_eq!(tally(&[vote("a", false), vote("b", true)], None).score, -1);
        assert_eq!(
            tally(
                &[vote("a", false), vote("b", true), vote("c", true), vote("d", false)],
                None
            )
            .score,
            -1
        );
    }

    #[test]
    fn test_duplicate_votes_all_count() {
        let votes = [vote("a", true), vote("a", true), vote("a", true), vote("b", false)];
        assert_eq!(tally(&votes, None).score, 2);
    }

    #[test]
    fn test_viewer_choice_uses_first_match() {
        let votes = [vote("bob", true), vote("alice", false), vote("alice", true)];
        assert_eq!(tally(&votes, Some("alice")).viewer_choice, Some(false));
        assert_eq!(tally(&votes, Some("bob")).viewer_choice, Some(true));
        assert_eq!(tally(&votes, Some("carol")).viewer_choice, None);
        assert_eq!(tally(&votes, None).viewer_choice, None);
    }

    #[test]
    fn test_cast_vote_requires_viewer() {
        assert!(matches!(
            cast_vote(None, None, true),
            Err(AppError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_cast_vote_same_direction_is_noop() {
        let viewer = Viewer::new("alice");
        assert_eq!(
            cast_vote(Some(&viewer), Some(true), true).unwrap(),
            VoteAction::Unchanged
        );
        assert_eq!(
            cast_vote(Some(&viewer), Some(false), false).unwrap(),
            VoteAction::Unchanged
        );
    }

    #[test]
    fn test_cast_vote_switch_or_first_vote_inserts() {
        let viewer = Viewer::new("alice");
        assert_eq!(
            cast_vote(Some(&viewer), Some(true), false).unwrap(),
            VoteAction::Insert { upvote: false }
        );
        assert_eq!(
            cast_vote(Some(&viewer), None, true).unwrap(),
            VoteAction::Insert { upvote: true }
        );
    }

    #[tokio::test]
    async fn test_submit_vote_anonymous_issues_no_calls() {
        let repo = InMemoryRepository::new();
        let err = submit_vote(&repo, None, 1, true).await.unwrap_err();
        assert!(matches!(err, AppError::NotAuthenticated));
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_submit_vote_is_idempotent() {
        let repo = InMemoryRepository::new();
        let viewer = Viewer::new("alice");

        let first = submit_vote(&repo, Some(&viewer), 1, true).await.unwrap();
        assert_eq!(first.action, VoteAction::Insert { upvote: true });
        assert_eq!(first.tally.score, 1);
        assert_eq!(first.tally.viewer_choice, Some(true));

        let second = submit_vote(&repo, Some(&viewer), 1, true).await.unwrap();
        assert_eq!(second.action, VoteAction::Unchanged);
        assert_eq!(second.tally, first.tally);

        assert_eq!(
            repo.mutations(),
            vec![RepoCall::InsertVote {
                post_id: 1,
                username: "alice".to_string(),
                upvote: true
            }]
        );
    }

    #[tokio::test]
    async fn test_switching_vote_prepends_new_record() {
        let repo = InMemoryRepository::new();
        let viewer = Viewer::new("alice");

        submit_vote(&repo, Some(&viewer), 1, true).await.unwrap();
        let outcome = submit_vote(&repo, Some(&viewer), 1, false).await.unwrap();

        // [down, up] sums to zero, first record is the downvote
        assert_eq!(outcome.tally.score, -1);
        assert_eq!(outcome.tally.viewer_choice, Some(false));
        assert_eq!(repo.mutations().len(), 2);
    }

    #[test]
    fn test_outcome_serializes_flat() {
        let outcome = VoteOutcome {
            action: VoteAction::Insert { upvote: true },
            tally: Tally {
                score: 3,
                viewer_choice: Some(true),
            },
        };
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(json["action"], "insert");
        assert_eq!(json["upvote"], true);
        assert_eq!(json["tally"]["score"], 3);
    }
}
