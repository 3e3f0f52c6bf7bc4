//! GraphQL documents sent to the remote service.
//!
//! Root field names match the remote schema and double as the key under
//! `data` in the response.

pub const GET_VOTES_BY_POST_ID: &str = r"
query getVotesByPostId($post_id: ID!) {
  getVotesByPostId(post_id: $post_id) {
    id
    created_at
    post_id
    upvote
    username
  }
}";

pub const GET_POST_BY_POST_ID: &str = r"
query getPostListByPostId($post_id: ID!) {
  getPostListByPostId(post_id: $post_id) {
    body
    created_at
    id
    image
    title
    subreddit_id
    username
    comments {
      created_at
      id
      post_id
      text
      username
    }
    subreddit {
      created_at
      id
      topic
    }
    votes {
      created_at
      id
      post_id
      upvote
      username
    }
  }
}";

pub const GET_SUBREDDIT_BY_TOPIC: &str = r"
query getSubredditListByTopic($topic: String!) {
  getSubredditListByTopic(topic: $topic) {
    id
    topic
    created_at
  }
}";

pub const GET_SUBREDDITS_WITH_LIMIT: &str = r"
query getSubredditListLimit($limit: Int!) {
  getSubredditListLimit(limit: $limit) {
    id
    topic
    created_at
  }
}";

pub const GET_ALL_POSTS: &str = r"
query getPostList {
  getPostList {
    body
    created_at
    id
    image
    title
    subreddit_id
    username
    comments {
      created_at
      id
      post_id
      text
      username
    }
    subreddit {
      created_at
      id
      topic
    }
    votes {
      created_at
      id
      post_id
      upvote
      username
    }
  }
}";

pub const GET_ALL_POSTS_BY_TOPIC: &str = r"
query getPostListByTopic($topic: String!) {
  getPostListByTopic(topic: $topic) {
    body
    created_at
    id
    image
    title
    subreddit_id
    username
    comments {
      created_at
      id
      post_id
      text
      username
    }
    subreddit {
      created_at
      id
      topic
    }
    votes {
      created_at
      id
      post_id
      upvote
      username
    }
  }
}";

pub const ADD_VOTE: &str = r"
mutation insertVote($post_id: ID!, $username: String!, $upvote: Boolean!) {
  insertVote(post_id: $post_id, username: $username, upvote: $upvote) {
    id
    created_at
    post_id
    upvote
    username
  }
}";

pub const ADD_SUBREDDIT: &str = r"
mutation insertSubreddit($topic: String!) {
  insertSubreddit(topic: $topic) {
    id
    topic
    created_at
  }
}";

pub const ADD_POST: &str = r"
mutation insertPost(
  $body: String!
  $image: String!
  $subreddit_id: ID!
  $title: String!
  $username: String!
) {
  insertPost(
    body: $body
    image: $image
    subreddit_id: $subreddit_id
    title: $title
    username: $username
  ) {
    body
    created_at
    id
    image
    subreddit_id
    title
    username
  }
}";

pub const ADD_COMMENT: &str = r"
mutation insertComment($post_id: ID!, $username: String!, $text: String!) {
  insertComment(post_id: $post_id, username: $username, text: $text) {
    created_at
    id
    post_id
    text
    username
  }
}";
