use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::queries;
use super::{RepoResult, Repository, RepositoryError};
use crate::config::Config;
use crate::models::{Comment, NewPost, Post, Subreddit, Vote};

/// Envelope of every GraphQL response.
#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorMessage {
    message: String,
}

/// Repository backed by the remote GraphQL API.
#[derive(Clone)]
pub struct GraphqlRepository {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GraphqlRepository {
    /// Create a client for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> RepoResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("reddit-clone/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no endpoint is configured or the client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let endpoint = config
            .graphql_endpoint
            .clone()
            .context("GRAPHQL_ENDPOINT is not configured")?;
        if config.graphql_api_key.is_none() {
            warn!("GRAPHQL_API_KEY is not set; requests will be sent unauthenticated");
        }
        Self::new(
            endpoint,
            config.graphql_api_key.clone(),
            config.graphql_timeout,
        )
        .context("Failed to create GraphQL client")
    }

    /// Run one operation and decode the root field `field` from `data`.
    async fn execute<T: DeserializeOwned>(
        &self,
        field: &'static str,
        query: &str,
        variables: Value,
    ) -> RepoResult<T> {
        debug!(operation = field, "Sending GraphQL request");

        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(key) = &self.api_key {
            request = request.header(AUTHORIZATION, format!("APIKey {key}"));
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(RepositoryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphqlResponse = response.json().await?;

        if !envelope.errors.is_empty() {
            return Err(RepositoryError::GraphQl(
                envelope.errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        let value = envelope
            .data
            .and_then(|mut data| data.get_mut(field).map(Value::take))
            .ok_or(RepositoryError::MissingData(field))?;

        serde_json::from_value(value).map_err(|source| RepositoryError::Decode { field, source })
    }

    /// Like [`execute`](Self::execute) for list fields; `null` decodes as empty.
    async fn execute_list<T: DeserializeOwned>(
        &self,
        field: &'static str,
        query: &str,
        variables: Value,
    ) -> RepoResult<Vec<T>> {
        let list: Option<Vec<T>> = self.execute(field, query, variables).await?;
        Ok(list.unwrap_or_default())
    }

    /// Like [`execute`](Self::execute) for mutations; `null` is an error.
    async fn execute_required<T: DeserializeOwned>(
        &self,
        field: &'static str,
        query: &str,
        variables: Value,
    ) -> RepoResult<T> {
        let item: Option<T> = self.execute(field, query, variables).await?;
        item.ok_or(RepositoryError::MissingData(field))
    }
}

#[async_trait]
impl Repository for GraphqlRepository {
    async fn query_votes_by_post(&self, post_id: i64) -> RepoResult<Vec<Vote>> {
        self.execute_list(
            "getVotesByPostId",
            queries::GET_VOTES_BY_POST_ID,
            json!({ "post_id": post_id }),
        )
        .await
    }

    async fn query_post_by_id(&self, post_id: i64) -> RepoResult<Option<Post>> {
        self.execute(
            "getPostListByPostId",
            queries::GET_POST_BY_POST_ID,
            json!({ "post_id": post_id }),
        )
        .await
    }

    async fn query_subreddits_by_topic(&self, topic: &str) -> RepoResult<Vec<Subreddit>> {
        self.execute_list(
            "getSubredditListByTopic",
            queries::GET_SUBREDDIT_BY_TOPIC,
            json!({ "topic": topic }),
        )
        .await
    }

    async fn query_subreddits_limit(&self, limit: u32) -> RepoResult<Vec<Subreddit>> {
        self.execute_list(
            "getSubredditListLimit",
            queries::GET_SUBREDDITS_WITH_LIMIT,
            json!({ "limit": limit }),
        )
        .await
    }

    async fn query_posts_all(&self) -> RepoResult<Vec<Post>> {
        self.execute_list("getPostList", queries::GET_ALL_POSTS, json!({}))
            .await
    }

    async fn query_posts_by_topic(&self, topic: &str) -> RepoResult<Vec<Post>> {
        self.execute_list(
            "getPostListByTopic",
            queries::GET_ALL_POSTS_BY_TOPIC,
            json!({ "topic": topic }),
        )
        .await
    }

    async fn insert_vote(&self, post_id: i64, username: &str, upvote: bool) -> RepoResult<Vote> {
        self.execute_required(
            "insertVote",
            queries::ADD_VOTE,
            json!({ "post_id": post_id, "username": username, "upvote": upvote }),
        )
        .await
    }

    async fn insert_subreddit(&self, topic: &str) -> RepoResult<Subreddit> {
        self.execute_required(
            "insertSubreddit",
            queries::ADD_SUBREDDIT,
            json!({ "topic": topic }),
        )
        .await
    }

    async fn insert_post(&self, post: NewPost) -> RepoResult<Post> {
        let variables = json!({
            "body": post.body,
            "image": post.image,
            "subreddit_id": post.subreddit_id,
            "title": post.title,
            "username": post.username,
        });
        self.execute_required("insertPost", queries::ADD_POST, variables)
            .await
    }

    async fn insert_comment(
        &self,
        post_id: i64,
        username: &str,
        text: &str,
    ) -> RepoResult<Comment> {
        self.execute_required(
            "insertComment",
            queries::ADD_COMMENT,
            json!({ "post_id": post_id, "username": username, "text": text }),
        )
        .await
    }
}
