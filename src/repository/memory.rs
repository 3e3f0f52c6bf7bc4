use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use super::{RepoResult, Repository, RepositoryError};
use crate::models::{Comment, NewPost, Post, Subreddit, Vote};

/// One call made against an [`InMemoryRepository`], in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoCall {
    QueryVotesByPost(i64),
    QueryPostById(i64),
    QuerySubredditsByTopic(String),
    QuerySubredditsLimit(u32),
    QueryPostsAll,
    QueryPostsByTopic(String),
    InsertVote {
        post_id: i64,
        username: String,
        upvote: bool,
    },
    InsertSubreddit(String),
    InsertPost(NewPost),
    InsertComment {
        post_id: i64,
        username: String,
        text: String,
    },
}

impl RepoCall {
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::InsertVote { .. }
                | Self::InsertSubreddit(_)
                | Self::InsertPost(_)
                | Self::InsertComment { .. }
        )
    }
}

#[derive(Default)]
struct Store {
    next_id: i64,
    subreddits: Vec<Subreddit>,
    // Stored without nested relations; those are joined on read.
    posts: Vec<Post>,
    votes: Vec<Vote>,
    comments: Vec<Comment>,
    calls: Vec<RepoCall>,
    mutation_failure: Option<String>,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check_mutation(&self) -> RepoResult<()> {
        match &self.mutation_failure {
            Some(message) => Err(RepositoryError::GraphQl(vec![message.clone()])),
            None => Ok(()),
        }
    }

    /// Insertion order is creation order, so reversing gives newest first.
    fn votes_for(&self, post_id: i64) -> Vec<Vote> {
        self.votes
            .iter()
            .rev()
            .filter(|v| v.post_id == post_id)
            .cloned()
            .collect()
    }

    fn with_relations(&self, post: &Post) -> Post {
        Post {
            votes: self.votes_for(post.id),
            comments: self
                .comments
                .iter()
                .rev()
                .filter(|c| c.post_id == post.id)
                .cloned()
                .collect(),
            subreddit: self
                .subreddits
                .iter()
                .filter(|s| s.id == post.subreddit_id)
                .take(1)
                .cloned()
                .collect(),
            ..post.clone()
        }
    }
}

/// Process-local repository.
///
/// Backs the `memory` data backend and the tests. Every call is recorded so
/// callers can assert exactly which queries and mutations a command issued.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All calls made so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RepoCall> {
        self.lock().calls.clone()
    }

    /// Mutations made so far.
    #[must_use]
    pub fn mutations(&self) -> Vec<RepoCall> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.is_mutation())
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Make every subsequent mutation fail with `message` (or succeed again with `None`).
    pub fn fail_mutations_with(&self, message: Option<&str>) {
        self.lock().mutation_failure = message.map(str::to_string);
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn query_votes_by_post(&self, post_id: i64) -> RepoResult<Vec<Vote>> {
        let mut store = self.lock();
        store.calls.push(RepoCall::QueryVotesByPost(post_id));
        Ok(store.votes_for(post_id))
    }

    async fn query_post_by_id(&self, post_id: i64) -> RepoResult<Option<Post>> {
        let mut store = self.lock();
        store.calls.push(RepoCall::QueryPostById(post_id));
        Ok(store
            .posts
            .iter()
            .find(|p| p.id == post_id)
            .map(|p| store.with_relations(p)))
    }

    async fn query_subreddits_by_topic(&self, topic: &str) -> RepoResult<Vec<Subreddit>> {
        let mut store = self.lock();
        store
            .calls
            .push(RepoCall::QuerySubredditsByTopic(topic.to_string()));
        Ok(store
            .subreddits
            .iter()
            .filter(|s| s.topic == topic)
            .cloned()
            .collect())
    }

    async fn query_subreddits_limit(&self, limit: u32) -> RepoResult<Vec<Subreddit>> {
        let mut store = self.lock();
        store.calls.push(RepoCall::QuerySubredditsLimit(limit));
        Ok(store
            .subreddits
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn query_posts_all(&self) -> RepoResult<Vec<Post>> {
        let mut store = self.lock();
        store.calls.push(RepoCall::QueryPostsAll);
        Ok(store
            .posts
            .iter()
            .rev()
            .map(|p| store.with_relations(p))
            .collect())
    }

    async fn query_posts_by_topic(&self, topic: &str) -> RepoResult<Vec<Post>> {
        let mut store = self.lock();
        store
            .calls
            .push(RepoCall::QueryPostsByTopic(topic.to_string()));
        Ok(store
            .posts
            .iter()
            .rev()
            .map(|p| store.with_relations(p))
            .filter(|p| p.topic() == Some(topic))
            .collect())
    }

    async fn insert_vote(&self, post_id: i64, username: &str, upvote: bool) -> RepoResult<Vote> {
        let mut store = self.lock();
        store.calls.push(RepoCall::InsertVote {
            post_id,
            username: username.to_string(),
            upvote,
        });
        store.check_mutation()?;

        let vote = Vote {
            id: store.next_id(),
            post_id,
            username: username.to_string(),
            upvote,
            created_at: Utc::now().to_rfc3339(),
        };
        store.votes.push(vote.clone());
        Ok(vote)
    }

    async fn insert_subreddit(&self, topic: &str) -> RepoResult<Subreddit> {
        let mut store = self.lock();
        store
            .calls
            .push(RepoCall::InsertSubreddit(topic.to_string()));
        store.check_mutation()?;

        let subreddit = Subreddit {
            id: store.next_id(),
            topic: topic.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };
        store.subreddits.push(subreddit.clone());
        Ok(subreddit)
    }

    async fn insert_post(&self, post: NewPost) -> RepoResult<Post> {
        let mut store = self.lock();
        store.calls.push(RepoCall::InsertPost(post.clone()));
        store.check_mutation()?;

        let created = Post {
            id: store.next_id(),
            title: post.title,
            body: post.body,
            image: Some(post.image),
            username: post.username,
            subreddit_id: post.subreddit_id,
            created_at: Utc::now().to_rfc3339(),
            votes: Vec::new(),
            comments: Vec::new(),
            subreddit: Vec::new(),
        };
        store.posts.push(created.clone());
        Ok(created)
    }

    async fn insert_comment(
        &self,
        post_id: i64,
        username: &str,
        text: &str,
    ) -> RepoResult<Comment> {
        let mut store = self.lock();
        store.calls.push(RepoCall::InsertComment {
            post_id,
            username: username.to_string(),
            text: text.to_string(),
        });
        store.check_mutation()?;

        let comment = Comment {
            id: store.next_id(),
            post_id,
            username: username.to_string(),
            text: text.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };
        store.comments.push(comment.clone());
        Ok(comment)
    }
}
