use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored tweet. The row columns are `id` through `retweet_id`; the remaining
/// fields are derived by the populator and stay `None` until it fills them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    pub id: i64,
    pub text: String,
    pub author_id: i64,
    pub created_on: NaiveDate,
    pub retweet_id: Option<i64>,

    #[cfg_attr(feature = "postgres", sqlx(skip))]
    #[serde(default)]
    pub retweet: Option<Box<Tweet>>,
    #[cfg_attr(feature = "postgres", sqlx(skip))]
    #[serde(default)]
    pub comments: Option<Vec<Comment>>,
    #[cfg_attr(feature = "postgres", sqlx(skip))]
    #[serde(default)]
    pub liked_by: Option<Vec<i64>>,
    #[cfg_attr(feature = "postgres", sqlx(skip))]
    #[serde(default)]
    pub pictures: Option<Vec<i64>>,
}

/// A stored comment. `liked_by` is derived.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub author_id: i64,
    pub tweet_id: i64,
    pub created_on: NaiveDate,

    #[cfg_attr(feature = "postgres", sqlx(skip))]
    #[serde(default)]
    pub liked_by: Option<Vec<i64>>,
}

/// Request body for creating a tweet. Every field may be missing on the wire;
/// the service decides which ones are required.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewTweet {
    pub text: String,
    pub author_id: Option<i64>,
    pub retweet_id: Option<i64>,
    pub pictures: Option<Vec<i64>>,
}

/// Request body for creating a comment.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewComment {
    pub text: String,
    pub author_id: Option<i64>,
    pub tweet_id: Option<i64>,
}

/// A validated tweet row waiting for its id.
#[derive(Clone, Debug, PartialEq)]
pub struct TweetDraft {
    pub text: String,
    pub author_id: i64,
    pub created_on: NaiveDate,
    pub retweet_id: Option<i64>,
}

/// A validated comment row waiting for its id.
#[derive(Clone, Debug, PartialEq)]
pub struct CommentDraft {
    pub text: String,
    pub author_id: i64,
    pub tweet_id: i64,
    pub created_on: NaiveDate,
}

impl TweetDraft {
    pub fn into_tweet(self, id: i64) -> Tweet {
        Tweet {
            id,
            text: self.text,
            author_id: self.author_id,
            created_on: self.created_on,
            retweet_id: self.retweet_id,
            retweet: None,
            comments: None,
            liked_by: None,
            pictures: None,
        }
    }
}

impl CommentDraft {
    pub fn into_comment(self, id: i64) -> Comment {
        Comment {
            id,
            text: self.text,
            author_id: self.author_id,
            tweet_id: self.tweet_id,
            created_on: self.created_on,
            liked_by: None,
        }
    }
}
