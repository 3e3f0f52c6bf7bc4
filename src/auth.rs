//! Viewer identity.
//!
//! Sign-in is handled by the session proxy in front of this service, which
//! forwards the signed-in username in a trusted header (`IDENTITY_HEADER`).
//! Handlers extract a [`MaybeViewer`] and pass the viewer explicitly into
//! every command.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use serde::Serialize;

use crate::config::Config;

/// The signed-in user viewing the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Viewer {
    pub username: String,
}

impl Viewer {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Current viewer (if any). Never rejects; anonymous requests yield `None`.
#[derive(Debug, Clone)]
pub struct MaybeViewer(pub Option<Viewer>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeViewer
where
    S: Send + Sync,
    Arc<Config>: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Arc::<Config>::from_ref(state);
        Ok(Self(viewer_from_headers(
            &parts.headers,
            &config.identity_header,
        )))
    }
}

/// Read the forwarded username from `header`. Blank or non-UTF-8 values are anonymous.
#[must_use]
pub fn viewer_from_headers(headers: &HeaderMap, header: &str) -> Option<Viewer> {
    headers
        .get(header)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(Viewer::new)
}
