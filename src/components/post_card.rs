//! Post card with its vote column.

use maud::{html, Markup, Render};

use super::time::TimeAgo;
use crate::models::Post;
use crate::votes::Tally;

/// A post as shown in feeds and on its detail page.
///
/// The up and down arrows are small forms posting to `/post/:id/vote`; the
/// arrow matching the viewer's current vote is highlighted.
#[derive(Debug, Clone)]
pub struct PostCard<'a> {
    pub post: &'a Post,
    pub tally: Tally,
    /// Where the vote forms send the browser back to.
    pub return_to: &'a str,
}

impl<'a> PostCard<'a> {
    #[must_use]
    pub const fn new(post: &'a Post, tally: Tally, return_to: &'a str) -> Self {
        Self {
            post,
            tally,
            return_to,
        }
    }

    fn vote_button(&self, direction: &str, label: &str, active: bool) -> Markup {
        let class = if active {
            format!("vote-button vote-{direction} active")
        } else {
            format!("vote-button vote-{direction}")
        };

        html! {
            form method="post" action={ "/post/" (self.post.id) "/vote" } class="vote-form" {
                input type="hidden" name="direction" value=(direction);
                input type="hidden" name="return_to" value=(self.return_to);
                button type="submit" class=(class) aria-label=(label) title=(label) {
                    @if direction == "up" { "▲" } @else { "▼" }
                }
            }
        }
    }
}

impl Render for PostCard<'_> {
    fn render(&self) -> Markup {
        let post = self.post;
        let comment_count = post.comments.len();

        html! {
            article class="post-card" id={ "post-" (post.id) } {
                div class="post-votes" {
                    (self.vote_button("up", "Upvote", self.tally.viewer_choice == Some(true)))
                    p class="post-score" { (self.tally.score) }
                    (self.vote_button("down", "Downvote", self.tally.viewer_choice == Some(false)))
                }

                div class="post-main" {
                    p class="post-meta" {
                        @if let Some(topic) = post.topic() {
                            a class="post-subreddit" href={ "/subreddit/" (urlencoding::encode(topic)) } {
                                "r/" (topic)
                            }
                            " • "
                        }
                        "Posted by u/" (post.username) " "
                        (TimeAgo::new(&post.created_at))
                    }

                    h2 class="post-title" {
                        a href={ "/post/" (post.id) } { (post.title) }
                    }
                    @if !post.body.is_empty() {
                        p class="post-body" { (post.body) }
                    }

                    @if let Some(image) = post.image_url() {
                        img class="post-image" src=(image) alt="Post Image" loading="lazy";
                    }

                    div class="post-footer" {
                        a href={ "/post/" (post.id) } {
                            (comment_count) @if comment_count == 1 { " Comment" } @else { " Comments" }
                        }
                    }
                }
            }
        }
    }
}
