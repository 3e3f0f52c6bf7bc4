use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use futures_util::future::join_all;
use maud::Markup;
use serde::Deserialize;

use super::pages::{
    render_home_page, render_not_found_page, render_post_page, render_subreddit_page, FeedItem,
    HomePageParams, PageContext, PostPageParams, SubredditPageParams,
};
use super::AppState;
use crate::auth::{MaybeViewer, Viewer};
use crate::components::Alert;
use crate::error::AppError;
use crate::models::Post;
use crate::posts::{self, NewPostRequest};
use crate::repository::Repository;
use crate::votes::{self, Tally, VoteOutcome};

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/subreddit/:topic", get(subreddit))
        .route("/post", post(create_post))
        .route("/post/:id", get(post_detail))
        .route("/post/:id/vote", post(vote))
        .route("/post/:id/comment", post(comment))
        .route("/api/post/:id/votes", get(api_votes))
        .route("/api/post/:id/vote", post(api_vote))
        .route("/healthz", get(health))
        .fallback(not_found)
}

// ========== Helpers ==========

/// Outcome of the command that redirected to the current page.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeParams {
    notice: Option<String>,
    error: Option<String>,
}

impl NoticeParams {
    fn alert(&self) -> Option<Alert<'_>> {
        if let Some(error) = self.error.as_deref() {
            return Some(Alert::error(error));
        }
        self.notice.as_deref().map(Alert::success)
    }
}

/// Only local absolute paths are followed; anything else goes to `/`.
/// Any query string is dropped so stale notices do not stack up.
fn sanitize_return_to(return_to: Option<&str>) -> String {
    let path = return_to
        .and_then(|r| r.split(['?', '#']).next())
        .unwrap_or("/");
    if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') {
        path.to_string()
    } else {
        "/".to_string()
    }
}

fn redirect_with(path: &str, key: &str, message: &str) -> Response {
    Redirect::to(&format!("{path}?{key}={}", urlencoding::encode(message))).into_response()
}

/// User-facing text for a failed command. `action` completes "sign in to ...".
fn error_message(err: &AppError, action: &str) -> String {
    match err {
        AppError::NotAuthenticated => format!("You'll need to sign in to {action}"),
        AppError::Validation(message) => message.clone(),
        AppError::Remote(e) => format!("Whoops something went wrong! {e}"),
    }
}

fn log_command_error(err: &AppError, command: &'static str) {
    match err {
        AppError::Remote(e) => tracing::error!(command, error = %e, "Remote call failed"),
        other => tracing::debug!(command, reason = %other, "Command rejected"),
    }
}

fn remote_failure(e: &impl std::fmt::Display) -> Response {
    (
        StatusCode::BAD_GATEWAY,
        format!("Whoops something went wrong! {e}"),
    )
        .into_response()
}

/// Attach a fresh tally to each post, querying votes for all posts concurrently.
///
/// A post whose vote query fails falls back to the votes nested in the post.
async fn build_feed(
    repo: &dyn Repository,
    posts: Vec<Post>,
    viewer: Option<&Viewer>,
) -> Vec<FeedItem> {
    let username = viewer.map(|v| v.username.as_str());
    let vote_lists = join_all(posts.iter().map(|p| repo.query_votes_by_post(p.id))).await;

    posts
        .into_iter()
        .zip(vote_lists)
        .map(|(post, votes)| {
            let tally = match votes {
                Ok(votes) => votes::tally(&votes, username),
                Err(e) => {
                    tracing::warn!(post_id = post.id, error = %e, "Failed to fetch votes, using nested votes");
                    votes::tally(&post.votes, username)
                }
            };
            FeedItem { post, tally }
        })
        .collect()
}

// ========== HTML Routes ==========

async fn home(
    State(state): State<AppState>,
    MaybeViewer(viewer): MaybeViewer,
    Query(notice): Query<NoticeParams>,
) -> Response {
    let posts = match state.repo.query_posts_all().await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("Failed to fetch posts: {e}");
            return remote_failure(&e);
        }
    };

    let communities = match state
        .repo
        .query_subreddits_limit(state.config.top_communities_limit)
        .await
    {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to fetch top communities: {e}");
            Vec::new()
        }
    };

    let feed = build_feed(state.repo.as_ref(), posts, viewer.as_ref()).await;

    let params = HomePageParams {
        context: PageContext::new(viewer.as_ref(), &state.config).with_notice(notice.alert()),
        feed: &feed,
        communities: &communities,
    };
    render_home_page(&params).into_response()
}

async fn subreddit(
    State(state): State<AppState>,
    MaybeViewer(viewer): MaybeViewer,
    Path(topic): Path<String>,
    Query(notice): Query<NoticeParams>,
) -> Response {
    let posts = match state.repo.query_posts_by_topic(&topic).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(topic = %topic, "Failed to fetch subreddit posts: {e}");
            return remote_failure(&e);
        }
    };

    let feed = build_feed(state.repo.as_ref(), posts, viewer.as_ref()).await;

    let params = SubredditPageParams {
        context: PageContext::new(viewer.as_ref(), &state.config).with_notice(notice.alert()),
        topic: &topic,
        feed: &feed,
    };
    render_subreddit_page(&params).into_response()
}

async fn post_detail(
    State(state): State<AppState>,
    MaybeViewer(viewer): MaybeViewer,
    Path(id): Path<i64>,
    Query(notice): Query<NoticeParams>,
) -> Response {
    let context = PageContext::new(viewer.as_ref(), &state.config).with_notice(notice.alert());

    let post = match state.repo.query_post_by_id(id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            let page = render_not_found_page(&context, &format!("Post {id} does not exist."));
            return (StatusCode::NOT_FOUND, page).into_response();
        }
        Err(e) => {
            tracing::error!(post_id = id, "Failed to fetch post: {e}");
            return remote_failure(&e);
        }
    };

    let item = build_feed(state.repo.as_ref(), vec![post], viewer.as_ref())
        .await
        .into_iter()
        .next();
    let Some(item) = item else {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build post view").into_response();
    };

    render_post_page(&PostPageParams {
        context,
        item: &item,
    })
    .into_response()
}

async fn not_found(State(state): State<AppState>, MaybeViewer(viewer): MaybeViewer) -> Response {
    let context = PageContext::new(viewer.as_ref(), &state.config);
    let page: Markup = render_not_found_page(&context, "That page does not exist.");
    (StatusCode::NOT_FOUND, page).into_response()
}

// ========== Commands ==========

#[derive(Debug, Deserialize)]
pub struct CreatePostForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    subreddit: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    return_to: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn create_post(
    State(state): State<AppState>,
    MaybeViewer(viewer): MaybeViewer,
    Form(form): Form<CreatePostForm>,
) -> Response {
    let return_to = sanitize_return_to(form.return_to.as_deref());
    let request = NewPostRequest {
        topic: form.subreddit,
        title: form.title,
        body: non_blank(form.body),
        image: non_blank(form.image),
    };

    match posts::create_post(state.repo.as_ref(), viewer.as_ref(), request).await {
        Ok(_) => redirect_with(&return_to, "notice", "New post created!"),
        Err(e) => {
            log_command_error(&e, "create_post");
            redirect_with(&return_to, "error", &error_message(&e, "post"))
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

#[derive(Debug, Deserialize)]
pub struct VoteForm {
    direction: VoteDirection,
    #[serde(default)]
    return_to: Option<String>,
}

async fn vote(
    State(state): State<AppState>,
    MaybeViewer(viewer): MaybeViewer,
    Path(id): Path<i64>,
    Form(form): Form<VoteForm>,
) -> Response {
    let return_to = sanitize_return_to(form.return_to.as_deref());
    let is_upvote = matches!(form.direction, VoteDirection::Up);

    match votes::submit_vote(state.repo.as_ref(), viewer.as_ref(), id, is_upvote).await {
        Ok(_) => Redirect::to(&return_to).into_response(),
        Err(e) => {
            log_command_error(&e, "vote");
            redirect_with(&return_to, "error", &error_message(&e, "vote"))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    text: String,
}

async fn comment(
    State(state): State<AppState>,
    MaybeViewer(viewer): MaybeViewer,
    Path(id): Path<i64>,
    Form(form): Form<CommentForm>,
) -> Response {
    let post_path = format!("/post/{id}");

    match posts::add_comment(state.repo.as_ref(), viewer.as_ref(), id, &form.text).await {
        Ok(_) => redirect_with(&post_path, "notice", "Comment Successfully Posted!"),
        Err(e) => {
            log_command_error(&e, "comment");
            redirect_with(&post_path, "error", &error_message(&e, "comment"))
        }
    }
}

// ========== API Routes ==========

async fn api_votes(
    State(state): State<AppState>,
    MaybeViewer(viewer): MaybeViewer,
    Path(id): Path<i64>,
) -> Result<Json<Tally>, AppError> {
    let votes = state.repo.query_votes_by_post(id).await.map_err(|e| {
        tracing::error!(post_id = id, "Failed to fetch votes: {e}");
        AppError::from(e)
    })?;
    let username = viewer.as_ref().map(|v| v.username.as_str());
    Ok(Json(votes::tally(&votes, username)))
}

#[derive(Debug, Deserialize)]
pub struct ApiVoteRequest {
    upvote: bool,
}

async fn api_vote(
    State(state): State<AppState>,
    MaybeViewer(viewer): MaybeViewer,
    Path(id): Path<i64>,
    Json(body): Json<ApiVoteRequest>,
) -> Result<Json<VoteOutcome>, AppError> {
    votes::submit_vote(state.repo.as_ref(), viewer.as_ref(), id, body.upvote)
        .await
        .map(Json)
        .inspect_err(|e| log_command_error(e, "api_vote"))
}

async fn health() -> &'static str {
    "OK"
}
