use anyhow::Result;
use async_trait::async_trait;

use crate::{Comment, CommentDraft, Tweet, TweetDraft};

/// Keyed access to the `tweet` table and its like/picture association tables.
///
/// Every method maps to a single statement. Nothing here runs inside a
/// transaction, so callers composing several calls get no atomicity.
#[async_trait]
pub trait TweetStore: Send + Sync + 'static {
    async fn find_tweet_by_id(&self, id: i64) -> Result<Option<Tweet>>;
    async fn tweet_exists_by_id(&self, id: i64) -> Result<bool>;
    /// Inserts a new row and returns it with its assigned id.
    async fn save_tweet(&self, draft: TweetDraft) -> Result<Tweet>;
    async fn delete_tweet_by_id(&self, id: i64) -> Result<()>;

    async fn find_all_tweets_by_author_id(&self, author_id: i64) -> Result<Vec<Tweet>>;
    async fn find_all_tweets_by_author_id_in(&self, author_ids: &[i64]) -> Result<Vec<Tweet>>;
    async fn find_all_tweets_by_id_in(&self, ids: &[i64]) -> Result<Vec<Tweet>>;
    /// Case-insensitive substring match on the tweet text.
    async fn find_all_tweets_by_text_containing(&self, word: &str) -> Result<Vec<Tweet>>;

    /// Clears `retweet_id` on every tweet pointing at `id`.
    async fn set_retweet_ids_null_by_tweet_id(&self, id: i64) -> Result<()>;

    async fn get_all_likes_by_tweet_id(&self, id: i64) -> Result<Vec<i64>>;
    /// Inserting an existing pair is a no-op.
    async fn add_like_to_tweet(&self, tweet_id: i64, user_id: i64) -> Result<()>;
    async fn delete_like_by_tweet_id_and_user_id(&self, tweet_id: i64, user_id: i64) -> Result<()>;
    async fn delete_all_likes_by_tweet_id(&self, id: i64) -> Result<()>;
    async fn count_likes_by_tweet_id(&self, id: i64) -> Result<i64>;

    /// Picture ids in the order they were attached.
    async fn get_all_pictures_by_tweet_id(&self, id: i64) -> Result<Vec<i64>>;
    async fn add_picture_to_tweet(&self, tweet_id: i64, picture_id: i64) -> Result<()>;
    async fn delete_all_pictures_by_tweet_id(&self, id: i64) -> Result<()>;
}

/// Keyed access to the `comment` table and its like association table.
#[async_trait]
pub trait CommentStore: Send + Sync + 'static {
    async fn find_comment_by_id(&self, id: i64) -> Result<Option<Comment>>;
    async fn comment_exists_by_id(&self, id: i64) -> Result<bool>;
    async fn save_comment(&self, draft: CommentDraft) -> Result<Comment>;
    async fn delete_comment_by_id(&self, id: i64) -> Result<()>;

    /// Comments of a tweet in creation order.
    async fn find_comments_by_tweet_id(&self, tweet_id: i64) -> Result<Vec<Comment>>;
    async fn find_all_comments_by_text_containing(&self, word: &str) -> Result<Vec<Comment>>;
    /// Owning tweet ids of the given comments. May contain duplicates.
    async fn find_all_tweet_ids_by_comment_ids_in(&self, ids: &[i64]) -> Result<Vec<i64>>;

    async fn get_all_likes_by_comment_id(&self, id: i64) -> Result<Vec<i64>>;
    async fn add_like_to_comment(&self, comment_id: i64, user_id: i64) -> Result<()>;
    async fn delete_like_by_comment_id_and_user_id(&self, comment_id: i64, user_id: i64) -> Result<()>;
    async fn delete_all_likes_by_comment_id(&self, id: i64) -> Result<()>;
    async fn count_likes_by_comment_id(&self, id: i64) -> Result<i64>;
}

/// Everything the services need from persistence.
pub trait RecordStore: TweetStore + CommentStore {}

impl<T: TweetStore + CommentStore> RecordStore for T {}
