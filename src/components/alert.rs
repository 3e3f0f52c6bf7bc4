//! Alert components for notifications.
//!
//! Commands report their result through a redirect carrying a notice; the
//! page renders it with [`Alert`].

use maud::{html, Markup, Render};

/// Alert variant types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertVariant {
    Success,
    Error,
    Info,
}

impl AlertVariant {
    /// Get the CSS class for the alert element.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Success => "alert success",
            Self::Error => "alert error",
            Self::Info => "alert info",
        }
    }
}

/// An alert message component.
///
/// # Example
///
/// ```ignore
/// use crate::components::alert::Alert;
///
/// let alert = Alert::success("New post created!");
/// ```
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub variant: AlertVariant,
    pub title: Option<&'a str>,
    pub message: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new alert with the given variant and message.
    #[must_use]
    pub const fn new(variant: AlertVariant, message: &'a str) -> Self {
        Self {
            variant,
            title: None,
            message,
        }
    }

    #[must_use]
    pub const fn success(message: &'a str) -> Self {
        Self::new(AlertVariant::Success, message)
    }

    #[must_use]
    pub const fn error(message: &'a str) -> Self {
        Self::new(AlertVariant::Error, message)
    }

    #[must_use]
    pub const fn info(message: &'a str) -> Self {
        Self::new(AlertVariant::Info, message)
    }

    /// Add a title to the alert.
    #[must_use]
    pub const fn with_title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }
}

impl Render for Alert<'_> {
    fn render(&self) -> Markup {
        html! {
            div class=(self.variant.class()) role="status" {
                @if let Some(title) = self.title {
                    strong { (title) }
                    " "
                }
                (self.message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_success() {
        let html = Alert::success("New post created!").render().into_string();
        assert!(html.contains(r#"class="alert success""#));
        assert!(html.contains("New post created!"));
    }

    #[test]
    fn test_alert_error_with_title() {
        let html = Alert::error("Service unavailable")
            .with_title("Whoops")
            .render()
            .into_string();
        assert!(html.contains(r#"class="alert error""#));
        assert!(html.contains("<strong>Whoops</strong>"));
        assert!(html.contains("Service unavailable"));
    }

    #[test]
    fn test_alert_escapes_message() {
        let html = Alert::info("<b>hi</b>").render().into_string();
        assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
    }
}
