use maud::{html, Markup, Render};

use crate::models::Subreddit;

/// One ranked row of the "Top Communities" panel.
#[derive(Debug, Clone)]
pub struct SubredditRow<'a> {
    pub subreddit: &'a Subreddit,
    pub index: usize,
}

impl Render for SubredditRow<'_> {
    fn render(&self) -> Markup {
        let href = format!("/subreddit/{}", urlencoding::encode(&self.subreddit.topic));
        html! {
            li class="subreddit-row" {
                span class="subreddit-rank" { (self.index + 1) }
                span class="subreddit-topic" { "r/" (self.subreddit.topic) }
                a class="subreddit-view" href=(href) { "View" }
            }
        }
    }
}

/// Sidebar panel listing subreddits in the order given.
#[derive(Debug, Clone)]
pub struct TopCommunities<'a> {
    pub subreddits: &'a [Subreddit],
}

impl Render for TopCommunities<'_> {
    fn render(&self) -> Markup {
        html! {
            aside class="top-communities" {
                p class="panel-title" { "Top Communities" }
                @if self.subreddits.is_empty() {
                    p class="empty-state" { "No communities yet" }
                } @else {
                    ol {
                        @for (index, subreddit) in self.subreddits.iter().enumerate() {
                            (SubredditRow { subreddit, index })
                        }
                    }
                }
            }
        }
    }
}
