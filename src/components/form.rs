//! Form components for maud templates.
//!
//! This module provides the input builders used by the post box and the
//! comment form.

use maud::{html, Markup, Render};

/// An input element.
#[derive(Debug, Clone)]
pub struct Input<'a> {
    /// Input name attribute
    pub name: &'a str,
    /// Input type ("text", "url", "hidden", etc.)
    pub r#type: &'a str,
    /// Current value
    pub value: Option<&'a str>,
    /// Placeholder text
    pub placeholder: Option<&'a str>,
    /// Whether the field is required
    pub required: bool,
    /// Whether the field is disabled
    pub disabled: bool,
    /// Optional ID attribute
    pub id: Option<&'a str>,
    /// Optional CSS class
    pub class: Option<&'a str>,
}

impl<'a> Input<'a> {
    /// Create a new input with the given name and type.
    #[must_use]
    pub fn new(name: &'a str, r#type: &'a str) -> Self {
        Self {
            name,
            r#type,
            value: None,
            placeholder: None,
            required: false,
            disabled: false,
            id: None,
            class: None,
        }
    }

    /// Create a text input.
    #[must_use]
    pub fn text(name: &'a str) -> Self {
        Self::new(name, "text")
    }

    /// Create a URL input.
    #[must_use]
    pub fn url(name: &'a str) -> Self {
        Self::new(name, "url")
    }

    /// Create a hidden input with a value.
    #[must_use]
    pub fn hidden(name: &'a str, value: &'a str) -> Self {
        Self::new(name, "hidden").value(value)
    }

    #[must_use]
    pub fn value(mut self, value: &'a str) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the disabled state.
    #[must_use]
    pub fn disabled_if(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }
}

impl Render for Input<'_> {
    fn render(&self) -> Markup {
        html! {
            input
                type=(self.r#type)
                name=(self.name)
                value=[self.value]
                placeholder=[self.placeholder]
                required[self.required]
                disabled[self.disabled]
                id=[self.id]
                class=[self.class];
        }
    }
}

/// A textarea element.
#[derive(Debug, Clone)]
pub struct TextArea<'a> {
    /// Textarea name attribute
    pub name: &'a str,
    /// Placeholder text
    pub placeholder: Option<&'a str>,
    /// Number of visible rows
    pub rows: Option<u32>,
    /// Whether the field is required
    pub required: bool,
    /// Whether the field is disabled
    pub disabled: bool,
    /// Optional ID attribute
    pub id: Option<&'a str>,
}

impl<'a> TextArea<'a> {
    /// Create a new textarea with the given name.
    #[must_use]
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            placeholder: None,
            rows: None,
            required: false,
            disabled: false,
            id: None,
        }
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    #[must_use]
    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the disabled state.
    #[must_use]
    pub fn disabled_if(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }
}

impl Render for TextArea<'_> {
    fn render(&self) -> Markup {
        html! {
            textarea
                name=(self.name)
                placeholder=[self.placeholder]
                rows=[self.rows]
                required[self.required]
                disabled[self.disabled]
                id=[self.id]
            {}
        }
    }
}

/// A labelled form row.
#[derive(Debug)]
pub struct FormRow<'a> {
    pub label: &'a str,
    pub id: &'a str,
    pub input: Markup,
}

impl Render for FormRow<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="form-row" {
                label for=(self.id) { (self.label) }
                (self.input)
            }
        }
    }
}
