//! Read-only projections of the entities owned by the remote service.

use serde::{Deserialize, Deserializer, Serialize};

/// A single vote record. A user may have several; the newest one is their
/// current vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    #[serde(deserialize_with = "flexible_id")]
    pub id: i64,
    #[serde(deserialize_with = "flexible_id")]
    pub post_id: i64,
    pub username: String,
    pub upvote: bool,
    #[serde(default)]
    pub created_at: String,
}

/// A subreddit, keyed by its topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subreddit {
    #[serde(deserialize_with = "flexible_id")]
    pub id: i64,
    pub topic: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(deserialize_with = "flexible_id")]
    pub id: i64,
    #[serde(deserialize_with = "flexible_id")]
    pub post_id: i64,
    pub username: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(deserialize_with = "flexible_id")]
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    #[serde(default)]
    pub image: Option<String>,
    pub username: String,
    #[serde(deserialize_with = "flexible_id")]
    pub subreddit_id: i64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub votes: Vec<Vote>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comments: Vec<Comment>,
    /// Single-element list under the current schema.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subreddit: Vec<Subreddit>,
}

impl Post {
    /// Topic of the subreddit this post belongs to, if the query included it.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.subreddit.first().map(|s| s.topic.as_str())
    }

    /// Image URL, treating an empty string as no image.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Fields sent with the `insertPost` mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub subreddit_id: i64,
    pub username: String,
    pub title: String,
    pub body: String,
    pub image: String,
}

/// Accepts ids encoded either as JSON integers or as numeric strings.
fn flexible_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Str(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Int(id) => Ok(id),
        RawId::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid id: {s:?}"))),
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
