//! Maud HTML template components for the web UI.
//!
//! - `layout`: Base page layout and header
//! - `alert`: Notifications shown after a command
//! - `form`: Input builders
//! - `post_card`: A post with its vote column
//! - `post_box`: The create-post form
//! - `subreddit_row`: "Top Communities" panel
//! - `comment_row`: One comment in a thread
//! - `time`: Relative timestamps

pub mod alert;
pub mod comment_row;
pub mod form;
pub mod layout;
pub mod post_box;
pub mod post_card;
pub mod subreddit_row;
pub mod time;

pub use alert::{Alert, AlertVariant};
pub use comment_row::CommentRow;
pub use form::{FormRow, Input, TextArea};
pub use layout::BaseLayout;
pub use post_box::PostBox;
pub use post_card::PostCard;
pub use subreddit_row::{SubredditRow, TopCommunities};
pub use time::TimeAgo;
