//! Post and comment submission.
//!
//! Creating a post resolves its topic to a subreddit first: an existing
//! subreddit with that exact topic is reused, otherwise one is created.
//! The lookup and the creation are separate remote calls, so two
//! concurrent submissions for a brand-new topic can both create a
//! subreddit. Uniqueness of topics is left to the remote service.

use tracing::{debug, info};

use crate::auth::Viewer;
use crate::error::AppError;
use crate::models::{Comment, NewPost, Post};
use crate::repository::Repository;

/// Input of the create-post form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPostRequest {
    pub topic: String,
    pub title: String,
    pub body: Option<String>,
    pub image: Option<String>,
}

/// Create a post in the subreddit named `request.topic`, creating the
/// subreddit first if no subreddit with that topic exists.
///
/// # Errors
///
/// [`AppError::NotAuthenticated`] without a viewer and
/// [`AppError::Validation`] for a blank title or topic, both before any
/// remote call. [`AppError::Remote`] if a query or mutation fails; a
/// subreddit created before a failed post insert is left in place.
pub async fn create_post(
    repo: &dyn Repository,
    viewer: Option<&Viewer>,
    request: NewPostRequest,
) -> Result<Post, AppError> {
    let Some(author) = viewer else {
        return Err(AppError::NotAuthenticated);
    };

    let topic = request.topic.trim();
    if request.title.trim().is_empty() {
        return Err(AppError::validation("A Post Title is required"));
    }
    if topic.is_empty() {
        return Err(AppError::validation("A Subreddit is required"));
    }

    let existing = repo.query_subreddits_by_topic(topic).await?;
    let subreddit_id = if let Some(subreddit) = existing.first() {
        debug!(
            topic,
            subreddit_id = subreddit.id,
            matches = existing.len(),
            "Using existing subreddit"
        );
        subreddit.id
    } else {
        let created = repo.insert_subreddit(topic).await?;
        info!(topic, subreddit_id = created.id, "Created subreddit");
        created.id
    };

    let post = repo
        .insert_post(NewPost {
            subreddit_id,
            username: author.username.clone(),
            title: request.title,
            body: request.body.unwrap_or_default(),
            image: request.image.unwrap_or_default(),
        })
        .await?;

    info!(post_id = post.id, subreddit_id, username = %author.username, "Created post");
    Ok(post)
}

/// Add a comment to a post.
///
/// # Errors
///
/// [`AppError::NotAuthenticated`] without a viewer, [`AppError::Validation`]
/// for blank text, [`AppError::Remote`] if the mutation fails.
pub async fn add_comment(
    repo: &dyn Repository,
    viewer: Option<&Viewer>,
    post_id: i64,
    text: &str,
) -> Result<Comment, AppError> {
    let Some(author) = viewer else {
        return Err(AppError::NotAuthenticated);
    };
    if text.trim().is_empty() {
        return Err(AppError::validation("A comment cannot be empty"));
    }

    let comment = repo
        .insert_comment(post_id, &author.username, text)
        .await?;
    info!(post_id, comment_id = comment.id, username = %author.username, "Added comment");
    Ok(comment)
}
