//! Subreddit page: banner, post box fixed to the topic, and the topic's feed.

use maud::{html, Markup};

use super::{render_feed, FeedItem, PageContext};
use crate::components::PostBox;

#[derive(Debug, Clone)]
pub struct SubredditPageParams<'a> {
    pub context: PageContext<'a>,
    pub topic: &'a str,
    pub feed: &'a [FeedItem],
}

#[must_use]
pub fn render_subreddit_page(params: &SubredditPageParams<'_>) -> Markup {
    let ctx = &params.context;
    let topic = params.topic;
    let return_to = format!("/subreddit/{}", urlencoding::encode(topic));
    let title = format!("r/{topic}");

    let content = html! {
        section class="subreddit-banner" {
            h1 { "Welcome to the r/" (topic) " subreddit" }
            p class="subreddit-name" { "r/" (topic) }
        }

        (ctx.render_notice())

        (PostBox {
            signed_in: ctx.viewer.is_some(),
            fixed_topic: Some(topic),
        })

        (render_feed(params.feed, &return_to))
    };

    ctx.layout(&title).render(content)
}
