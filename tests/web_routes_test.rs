//! Integration tests for web routes against the in-memory repository.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use reddit_clone::config::Config;
use reddit_clone::models::NewPost;
use reddit_clone::repository::{InMemoryRepository, RepoCall, Repository};
use reddit_clone::web::{create_app, AppState};
use serde_json::Value;
use tower::ServiceExt;

const USER_HEADER: &str = "x-forwarded-user";

fn create_test_app(repo: &InMemoryRepository) -> Router {
    create_app(AppState::new(Config::for_testing(), Arc::new(repo.clone())))
}

/// Seed a subreddit with one post and return the post id.
async fn seed_post(repo: &InMemoryRepository, topic: &str, title: &str) -> i64 {
    let subreddit = repo.insert_subreddit(topic).await.unwrap();
    let post = repo
        .insert_post(NewPost {
            subreddit_id: subreddit.id,
            username: "sonny".to_string(),
            title: title.to_string(),
            body: "Some body".to_string(),
            image: String::new(),
        })
        .await
        .unwrap();
    repo.clear_calls();
    post.id
}

fn form_request(uri: &str, user: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(user) = user {
        builder = builder.header(USER_HEADER, user);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn json_request(uri: &str, user: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(user) = user {
        builder = builder.header(USER_HEADER, user);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_HEADER, user);
    }
    builder.body(Body::empty()).unwrap()
}

/// Decoded `Location` header of a redirect.
fn location(response: &Response<Body>) -> String {
    let raw = response
        .headers()
        .get(header::LOCATION)
        .expect("redirect has a location")
        .to_str()
        .unwrap();
    urlencoding::decode(raw).unwrap().into_owned()
}

async fn body_string(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let repo = InMemoryRepository::new();
    let response = create_test_app(&repo)
        .oneshot(get_request("/healthz", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
}

#[tokio::test]
async fn test_home_page_shows_feed_and_communities() {
    let repo = InMemoryRepository::new();
    seed_post(&repo, "rust", "Borrow checker tips").await;

    let response = create_test_app(&repo)
        .oneshot(get_request("/", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Borrow checker tips"));
    assert!(html.contains("Top Communities"));
    assert!(html.contains("r/rust"));
    assert!(html.contains("Sign In"));
    assert!(html.contains("Sign in to post"));

    assert!(repo.calls().contains(&RepoCall::QuerySubredditsLimit(10)));
}

#[tokio::test]
async fn test_home_page_shows_viewer_name_and_notice() {
    let repo = InMemoryRepository::new();
    let response = create_test_app(&repo)
        .oneshot(get_request("/?notice=New%20post%20created%21", Some("alice")))
        .await
        .unwrap();

    let html = body_string(response).await;
    assert!(html.contains(r#"<span class="viewer-name">alice</span>"#));
    assert!(html.contains("New post created!"));
}

#[tokio::test]
async fn test_subreddit_page_lists_only_its_posts() {
    let repo = InMemoryRepository::new();
    seed_post(&repo, "rust", "Rust post").await;
    seed_post(&repo, "golang", "Go post").await;

    let response = create_test_app(&repo)
        .oneshot(get_request("/subreddit/rust", Some("alice")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Rust post"));
    assert!(!html.contains("Go post"));
    assert!(html.contains("Create a post in r/rust"));
}

#[tokio::test]
async fn test_post_page_and_missing_post() {
    let repo = InMemoryRepository::new();
    let post_id = seed_post(&repo, "rust", "Lifetimes explained").await;
    repo.insert_comment(post_id, "bob", "Great write-up")
        .await
        .unwrap();

    let app = create_test_app(&repo);
    let response = app
        .clone()
        .oneshot(get_request(&format!("/post/{post_id}"), Some("alice")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Lifetimes explained"));
    assert!(html.contains("Great write-up"));
    assert!(html.contains("1 Comment"));

    let response = app
        .oneshot(get_request("/post/999", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("Post 999 does not exist."));
}

#[tokio::test]
async fn test_anonymous_vote_is_rejected_without_mutation() {
    let repo = InMemoryRepository::new();
    let post_id = seed_post(&repo, "rust", "Hello").await;

    let response = create_test_app(&repo)
        .oneshot(form_request(
            &format!("/post/{post_id}/vote"),
            None,
            "direction=up&return_to=%2Fsubreddit%2Frust",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/subreddit/rust?error=You'll need to sign in to vote"
    );
    assert!(repo.calls().is_empty());
}

#[tokio::test]
async fn test_repeated_vote_is_a_no_op() {
    let repo = InMemoryRepository::new();
    let post_id = seed_post(&repo, "rust", "Hello").await;
    let app = create_test_app(&repo);
    let uri = format!("/post/{post_id}/vote");

    let response = app
        .clone()
        .oneshot(form_request(&uri, Some("alice"), "direction=up&return_to=%2F"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = app
        .oneshot(form_request(&uri, Some("alice"), "direction=up&return_to=%2F"))
        .await
        .unwrap();
    assert_eq!(location(&response), "/");

    assert_eq!(
        repo.mutations(),
        vec![RepoCall::InsertVote {
            post_id,
            username: "alice".to_string(),
            upvote: true,
        }]
    );
}

#[tokio::test]
async fn test_vote_redirect_ignores_external_return_to() {
    let repo = InMemoryRepository::new();
    let post_id = seed_post(&repo, "rust", "Hello").await;

    let response = create_test_app(&repo)
        .oneshot(form_request(
            &format!("/post/{post_id}/vote"),
            Some("alice"),
            "direction=down&return_to=https%3A%2F%2Fevil.example",
        ))
        .await
        .unwrap();

    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_create_post_in_new_subreddit() {
    let repo = InMemoryRepository::new();

    let response = create_test_app(&repo)
        .oneshot(form_request(
            "/post",
            Some("alice"),
            "title=First+post&body=&subreddit=rust&image=&return_to=%2F",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?notice=New post created!");

    let mutations = repo.mutations();
    assert_eq!(mutations.len(), 2);
    assert_eq!(mutations[0], RepoCall::InsertSubreddit("rust".to_string()));
    match &mutations[1] {
        RepoCall::InsertPost(post) => {
            assert_eq!(post.title, "First post");
            assert_eq!(post.username, "alice");
            assert_eq!(post.body, "");
            assert_eq!(post.image, "");
        }
        other => panic!("Expected InsertPost, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_post_without_title_is_rejected() {
    let repo = InMemoryRepository::new();

    let response = create_test_app(&repo)
        .oneshot(form_request(
            "/post",
            Some("alice"),
            "title=&subreddit=rust&return_to=%2Fsubreddit%2Frust",
        ))
        .await
        .unwrap();

    assert_eq!(
        location(&response),
        "/subreddit/rust?error=A Post Title is required"
    );
    assert!(repo.calls().is_empty());
}

#[tokio::test]
async fn test_remote_failure_is_shown_to_the_user() {
    let repo = InMemoryRepository::new();
    repo.fail_mutations_with(Some("quota exceeded"));

    let response = create_test_app(&repo)
        .oneshot(form_request(
            "/post",
            Some("alice"),
            "title=Hello&subreddit=rust",
        ))
        .await
        .unwrap();

    assert_eq!(
        location(&response),
        "/?error=Whoops something went wrong! quota exceeded"
    );
}

#[tokio::test]
async fn test_comment_is_posted() {
    let repo = InMemoryRepository::new();
    let post_id = seed_post(&repo, "rust", "Hello").await;

    let response = create_test_app(&repo)
        .oneshot(form_request(
            &format!("/post/{post_id}/comment"),
            Some("bob"),
            "text=Nice+post",
        ))
        .await
        .unwrap();

    assert_eq!(
        location(&response),
        format!("/post/{post_id}?notice=Comment Successfully Posted!")
    );
    assert_eq!(
        repo.mutations(),
        vec![RepoCall::InsertComment {
            post_id,
            username: "bob".to_string(),
            text: "Nice post".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_api_vote_requires_sign_in() {
    let repo = InMemoryRepository::new();
    let post_id = seed_post(&repo, "rust", "Hello").await;

    let response = create_test_app(&repo)
        .oneshot(json_request(
            &format!("/api/post/{post_id}/vote"),
            None,
            r#"{"upvote": true}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(body["error"].as_str().unwrap().contains("sign in"));
    assert!(repo.calls().is_empty());
}

#[tokio::test]
async fn test_api_vote_and_tally() {
    let repo = InMemoryRepository::new();
    let post_id = seed_post(&repo, "rust", "Hello").await;
    repo.insert_vote(post_id, "bob", true).await.unwrap();
    let app = create_test_app(&repo);

    let response = app
        .clone()
        .oneshot(json_request(
            &format!("/api/post/{post_id}/vote"),
            Some("alice"),
            r#"{"upvote": false}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["action"], "insert");
    assert_eq!(body["upvote"], false);
    // +1 -1 sums to zero, so the most recent vote decides the sign.
    assert_eq!(body["tally"]["score"], -1);
    assert_eq!(body["tally"]["viewer_choice"], false);

    let response = app
        .oneshot(get_request(&format!("/api/post/{post_id}/votes"), Some("bob")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["score"], -1);
    assert_eq!(body["viewer_choice"], true);
}

#[tokio::test]
async fn test_api_vote_remote_failure_is_bad_gateway() {
    let repo = InMemoryRepository::new();
    let post_id = seed_post(&repo, "rust", "Hello").await;
    repo.fail_mutations_with(Some("boom"));

    let response = create_test_app(&repo)
        .oneshot(json_request(
            &format!("/api/post/{post_id}/vote"),
            Some("alice"),
            r#"{"upvote": true}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "boom");
}

#[tokio::test]
async fn test_unknown_route_renders_not_found_page() {
    let repo = InMemoryRepository::new();
    let response = create_test_app(&repo)
        .oneshot(get_request("/no/such/page", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("That page does not exist."));
}
