//! Post detail page and the not-found page.

use maud::{html, Markup};

use super::{FeedItem, PageContext};
use crate::components::{CommentRow, PostCard, TextArea};

/// Parameters for the post detail page.
#[derive(Debug, Clone)]
pub struct PostPageParams<'a> {
    pub context: PageContext<'a>,
    pub item: &'a FeedItem,
}

/// Render a single post with its comment form and comments.
#[must_use]
pub fn render_post_page(params: &PostPageParams<'_>) -> Markup {
    let ctx = &params.context;
    let post = &params.item.post;
    let return_to = format!("/post/{}", post.id);
    let anonymous = ctx.viewer.is_none();
    let placeholder = if anonymous {
        "Please sign in to comment"
    } else {
        "What are your thoughts?"
    };

    let content = html! {
        (ctx.render_notice())

        (PostCard::new(post, params.item.tally, &return_to))

        section class="comment-box" {
            @if let Some(viewer) = ctx.viewer {
                p class="comment-as" {
                    "Comment as " span class="viewer-name" { (viewer.username) }
                }
            }
            form method="post" action={ "/post/" (post.id) "/comment" } {
                (TextArea::new("text")
                    .id("comment-text")
                    .placeholder(placeholder)
                    .rows(4)
                    .required()
                    .disabled_if(anonymous))
                button type="submit" class="button-primary" disabled[anonymous] { "Comment" }
            }
        }

        section class="comments" {
            @if post.comments.is_empty() {
                p class="empty-state" { "No comments yet." }
            }
            @for comment in &post.comments {
                (CommentRow { comment })
            }
        }
    };

    ctx.layout(&post.title).render(content)
}

/// Render the page shown for an unknown post id or route.
#[must_use]
pub fn render_not_found_page(context: &PageContext<'_>, message: &str) -> Markup {
    let content = html! {
        section class="not-found" {
            h1 { "Not Found" }
            p { (message) }
            p { a href="/" { "Back to the front page" } }
        }
    };

    context.layout("Not Found").render(content)
}
