//! Front page: post box, feed of all posts and the "Top Communities" panel.

use maud::{html, Markup};

use super::{render_feed, FeedItem, PageContext};
use crate::components::{PostBox, TopCommunities};
use crate::models::Subreddit;

/// Parameters for the home page.
#[derive(Debug, Clone)]
pub struct HomePageParams<'a> {
    pub context: PageContext<'a>,
    pub feed: &'a [FeedItem],
    pub communities: &'a [Subreddit],
}

#[must_use]
pub fn render_home_page(params: &HomePageParams<'_>) -> Markup {
    let ctx = &params.context;

    let content = html! {
        (ctx.render_notice())

        (PostBox {
            signed_in: ctx.viewer.is_some(),
            fixed_topic: None,
        })

        div class="home-columns" {
            (render_feed(params.feed, "/"))
            (TopCommunities { subreddits: params.communities })
        }
    };

    ctx.layout("Home").render(content)
}
