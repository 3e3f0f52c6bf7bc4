//! Maud-based page templates for the web UI.
//!
//! Each page module exports a render function that produces the complete HTML.

pub mod home;
pub mod post;
pub mod subreddit;

use maud::{html, Markup};

use crate::auth::Viewer;
use crate::components::{Alert, BaseLayout, PostCard};
use crate::config::Config;
use crate::models::Post;
use crate::votes::Tally;

pub use home::{render_home_page, HomePageParams};
pub use post::{render_not_found_page, render_post_page, PostPageParams};
pub use subreddit::{render_subreddit_page, SubredditPageParams};

/// A post with the tally computed for the current viewer.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub post: Post,
    pub tally: Tally,
}

/// Per-request state shared by every page.
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub viewer: Option<&'a Viewer>,
    pub config: &'a Config,
    /// Result of the command that redirected here, if any.
    pub notice: Option<Alert<'a>>,
}

impl<'a> PageContext<'a> {
    #[must_use]
    pub const fn new(viewer: Option<&'a Viewer>, config: &'a Config) -> Self {
        Self {
            viewer,
            config,
            notice: None,
        }
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Option<Alert<'a>>) -> Self {
        self.notice = notice;
        self
    }

    fn layout<'t>(&'t self, title: &'t str) -> BaseLayout<'t> {
        let config = self.config;
        BaseLayout::new(title, self.viewer).auth_links(&config.sign_in_url, &config.sign_out_url)
    }

    fn render_notice(&self) -> Markup {
        html! {
            @if let Some(alert) = &self.notice {
                (alert)
            }
        }
    }
}

/// A list of post cards, newest first as returned by the service.
fn render_feed(items: &[FeedItem], return_to: &str) -> Markup {
    html! {
        div class="feed" {
            @if items.is_empty() {
                p class="empty-state" { "No posts yet. Be the first to post!" }
            }
            @for item in items {
                (PostCard::new(&item.post, item.tally, return_to))
            }
        }
    }
}
