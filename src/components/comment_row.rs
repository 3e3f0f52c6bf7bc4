use maud::{html, Markup, Render};

use super::time::TimeAgo;
use crate::models::Comment;

#[derive(Debug, Clone)]
pub struct CommentRow<'a> {
    pub comment: &'a Comment,
}

impl Render for CommentRow<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="comment-row" id={ "comment-" (self.comment.id) } {
                p class="comment-meta" {
                    span class="comment-author" { (self.comment.username) }
                    " "
                    (TimeAgo::new(&self.comment.created_at))
                }
                p class="comment-text" { (self.comment.text) }
            }
        }
    }
}
