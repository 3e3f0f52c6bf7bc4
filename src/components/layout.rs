//! Base layout components for the web UI.
//!
//! This module provides the main page layout structure including
//! the HTML skeleton, header with sign-in state, and footer.

use maud::{html, Markup, DOCTYPE};

use crate::auth::Viewer;

/// Base page layout builder.
///
/// The viewer is required so every page explicitly handles the signed-in
/// and anonymous states.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::layout::BaseLayout;
///
/// let content = html! { h1 { "Hello World" } };
/// let page = BaseLayout::new("My Page", viewer.as_ref())
///     .auth_links("/oauth2/sign_in", "/oauth2/sign_out")
///     .render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
    viewer: Option<&'a Viewer>,
    sign_in_url: &'a str,
    sign_out_url: &'a str,
}

impl<'a> BaseLayout<'a> {
    /// Create a new base layout with the given page title and viewer.
    #[must_use]
    pub fn new(title: &'a str, viewer: Option<&'a Viewer>) -> Self {
        Self {
            title,
            viewer,
            sign_in_url: "/oauth2/sign_in",
            sign_out_url: "/oauth2/sign_out",
        }
    }

    /// Set the session proxy's sign-in and sign-out URLs.
    #[must_use]
    pub fn auth_links(mut self, sign_in_url: &'a str, sign_out_url: &'a str) -> Self {
        self.sign_in_url = sign_in_url;
        self.sign_out_url = sign_out_url;
        self
    }

    /// Render the complete HTML page with the given content.
    ///
    /// The content will be placed inside the `<main class="container">` element.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (self.title) " - Reddit Clone" }
                    link rel="stylesheet" href="/static/css/style.css";
                }
                body {
                    (self.render_header())
                    main class="container" {
                        (content)
                    }
                    (Self::render_footer())
                }
            }
        }
    }

    /// Render the page header with navigation.
    fn render_header(&self) -> Markup {
        html! {
            header class="site-header" {
                nav class="container" {
                    a href="/" class="site-logo" { "reddit" }
                    a href="/" class="nav-home" { "Home" }
                    (self.render_auth_nav())
                }
            }
        }
    }

    fn render_auth_nav(&self) -> Markup {
        match self.viewer {
            Some(viewer) => html! {
                div class="auth-nav" {
                    span class="viewer-name" { (viewer.username) }
                    a href=(self.sign_out_url) { "Sign Out" }
                }
            },
            None => html! {
                div class="auth-nav" {
                    a href=(self.sign_in_url) { "Sign In" }
                }
            },
        }
    }

    fn render_footer() -> Markup {
        html! {
            footer class="container" {
                small { "Reddit Clone" }
            }
        }
    }
}
