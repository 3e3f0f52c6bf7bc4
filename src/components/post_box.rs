use maud::{html, Markup, Render};

use super::form::{FormRow, Input};

/// The create-post form.
///
/// On a subreddit page the topic is fixed and sent as a hidden field;
/// elsewhere the author types it. Fields are disabled for anonymous viewers.
#[derive(Debug, Clone, Copy)]
pub struct PostBox<'a> {
    pub signed_in: bool,
    pub fixed_topic: Option<&'a str>,
}

impl Render for PostBox<'_> {
    fn render(&self) -> Markup {
        let anonymous = !self.signed_in;
        let title_placeholder = match (self.signed_in, self.fixed_topic) {
            (false, _) => "Sign in to post".to_string(),
            (true, Some(topic)) => format!("Create a post in r/{topic}"),
            (true, None) => "Create a post by entering a title!".to_string(),
        };
        let return_to = self.fixed_topic.map_or_else(
            || "/".to_string(),
            |topic| format!("/subreddit/{}", urlencoding::encode(topic)),
        );

        html! {
            form class="post-box" method="post" action="/post" {
                (Input::hidden("return_to", &return_to))
                (Input::text("title")
                    .id("post-title")
                    .class("post-box-title")
                    .placeholder(&title_placeholder)
                    .required()
                    .disabled_if(anonymous))

                (FormRow {
                    label: "Body:",
                    id: "post-body",
                    input: html! {
                        (Input::text("body")
                            .id("post-body")
                            .placeholder("Text (optional)")
                            .disabled_if(anonymous))
                    },
                })

                @if let Some(topic) = self.fixed_topic {
                    (Input::hidden("subreddit", topic))
                } @else {
                    (FormRow {
                        label: "Subreddit:",
                        id: "post-subreddit",
                        input: html! {
                            (Input::text("subreddit")
                                .id("post-subreddit")
                                .placeholder("i.e. reactjs")
                                .required()
                                .disabled_if(anonymous))
                        },
                    })
                }

                (FormRow {
                    label: "Image URL:",
                    id: "post-image",
                    input: html! {
                        (Input::url("image")
                            .id("post-image")
                            .placeholder("Optional...")
                            .disabled_if(anonymous))
                    },
                })

                button type="submit" class="button-primary" disabled[anonymous] { "Create Post" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_post_box_is_disabled() {
        let html = PostBox {
            signed_in: false,
            fixed_topic: None,
        }
        .render()
        .into_string();

        assert!(html.contains(r#"placeholder="Sign in to post""#));
        assert!(html.contains(r#"<button type="submit" class="button-primary" disabled>"#));
    }

    #[test]
    fn test_post_box_with_free_topic() {
        let html = PostBox {
            signed_in: true,
            fixed_topic: None,
        }
        .render()
        .into_string();

        assert!(html.contains("Create a post by entering a title!"));
        assert!(html.contains(r#"placeholder="i.e. reactjs""#));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn test_post_box_with_fixed_topic() {
        let html = PostBox {
            signed_in: true,
            fixed_topic: Some("rust"),
        }
        .render()
        .into_string();

        assert!(html.contains("Create a post in r/rust"));
        assert!(html.contains(r#"type="hidden" name="subreddit" value="rust""#));
        assert!(!html.contains("i.e. reactjs"));
        assert!(html.contains(r#"name="return_to" value="/subreddit/rust""#));
    }
}
