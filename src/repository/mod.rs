//! Data access for the remote service.
//!
//! The vote and post commands only see the [`Repository`] trait, one method
//! per query or mutation the UI issues. [`GraphqlRepository`] talks to the
//! remote GraphQL API; [`InMemoryRepository`] keeps everything in process
//! for local development and tests.

mod graphql;
mod memory;
pub mod queries;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Comment, NewPost, Post, Subreddit, Vote};

pub use graphql::GraphqlRepository;
pub use memory::{InMemoryRepository, RepoCall};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("request to GraphQL service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("GraphQL service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("{}", .0.join("; "))]
    GraphQl(Vec<String>),
    #[error("GraphQL response is missing field `{0}`")]
    MissingData(&'static str),
    #[error("failed to decode `{field}`: {source}")]
    Decode {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Queries and mutations against the remote service.
///
/// Every mutation is followed by a re-query on the caller's side; nothing
/// here caches.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Votes for a post, most recent first.
    async fn query_votes_by_post(&self, post_id: i64) -> RepoResult<Vec<Vote>>;

    /// A post with its comments, votes and subreddit.
    async fn query_post_by_id(&self, post_id: i64) -> RepoResult<Option<Post>>;

    /// Subreddits whose topic matches exactly.
    async fn query_subreddits_by_topic(&self, topic: &str) -> RepoResult<Vec<Subreddit>>;

    async fn query_subreddits_limit(&self, limit: u32) -> RepoResult<Vec<Subreddit>>;

    async fn query_posts_all(&self) -> RepoResult<Vec<Post>>;

    async fn query_posts_by_topic(&self, topic: &str) -> RepoResult<Vec<Post>>;

    async fn insert_vote(&self, post_id: i64, username: &str, upvote: bool) -> RepoResult<Vote>;

    async fn insert_subreddit(&self, topic: &str) -> RepoResult<Subreddit>;

    async fn insert_post(&self, post: NewPost) -> RepoResult<Post>;

    async fn insert_comment(&self, post_id: i64, username: &str, text: &str)
        -> RepoResult<Comment>;
}
