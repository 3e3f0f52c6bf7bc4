//! Reddit Clone library.
//!
//! A server-rendered client for a hosted GraphQL backend: a feed of posts
//! grouped into subreddits, with voting and comments.

// Allow raw string hashes for safety - they're harmless and prevent issues if content changes
#![allow(clippy::needless_raw_string_hashes)]

pub mod auth;
pub mod components;
pub mod config;
pub mod error;
pub mod models;
pub mod posts;
pub mod repository;
pub mod votes;
pub mod web;
