use std::sync::Arc;

use anyhow::Result;
use futures::future::try_join_all;
use tweetservice_database::{Comment, RecordStore, Tweet};

/// Attaches the derived fields (likes, comments, pictures, retweet) to fetched records.
///
/// Every method either returns the fully populated record or the first store
/// error; a record is never handed back half populated.
pub struct Populator<S> {
    store: Arc<S>,
}

impl<S> Clone for Populator<S> {
    fn clone(&self) -> Self {
        Self { store: self.store.clone() }
    }
}

impl<S: RecordStore> Populator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn comment_likes(&self, mut comment: Comment) -> Result<Comment> {
        comment.liked_by = Some(self.store.get_all_likes_by_comment_id(comment.id).await?);
        Ok(comment)
    }

    pub async fn comments_likes(&self, comments: Vec<Comment>) -> Result<Vec<Comment>> {
        let futures = comments.into_iter().map(|comment| self.comment_likes(comment)).collect::<Vec<_>>();
        try_join_all(futures).await
    }

    pub async fn likes(&self, mut tweet: Tweet) -> Result<Tweet> {
        tweet.liked_by = Some(self.store.get_all_likes_by_tweet_id(tweet.id).await?);
        Ok(tweet)
    }

    pub async fn comments(&self, mut tweet: Tweet) -> Result<Tweet> {
        tweet.comments = Some(self.comments_of(tweet.id).await?);
        Ok(tweet)
    }

    pub async fn pictures(&self, mut tweet: Tweet) -> Result<Tweet> {
        tweet.pictures = Some(self.store.get_all_pictures_by_tweet_id(tweet.id).await?);
        Ok(tweet)
    }

    pub async fn retweet(&self, mut tweet: Tweet) -> Result<Tweet> {
        tweet.retweet = self.retweet_of(tweet.retweet_id).await?;
        Ok(tweet)
    }

    /// Likes, retweet, comments and pictures, fetched concurrently.
    pub async fn all(&self, mut tweet: Tweet) -> Result<Tweet> {
        let (liked_by, retweet, comments, pictures) = tokio::try_join!(
            self.store.get_all_likes_by_tweet_id(tweet.id),
            self.retweet_of(tweet.retweet_id),
            self.comments_of(tweet.id),
            self.store.get_all_pictures_by_tweet_id(tweet.id),
        )?;

        tweet.liked_by = Some(liked_by);
        tweet.retweet = retweet;
        tweet.comments = Some(comments);
        tweet.pictures = Some(pictures);
        Ok(tweet)
    }

    /// [`Populator::all`] over a list, keeping its order.
    pub async fn all_many(&self, tweets: Vec<Tweet>) -> Result<Vec<Tweet>> {
        let futures = tweets.into_iter().map(|tweet| self.all(tweet)).collect::<Vec<_>>();
        try_join_all(futures).await
    }

    async fn comments_of(&self, tweet_id: i64) -> Result<Vec<Comment>> {
        let comments = self.store.find_comments_by_tweet_id(tweet_id).await?;
        self.comments_likes(comments).await
    }

    // Only one level deep: the retweet gets its likes and comments, not its own retweet or pictures.
    async fn retweet_of(&self, retweet_id: Option<i64>) -> Result<Option<Box<Tweet>>> {
        let Some(retweet_id) = retweet_id else {
            return Ok(None);
        };

        let Some(mut retweet) = self.store.find_tweet_by_id(retweet_id).await? else {
            tracing::warn!("[Populator::retweet] retweeted tweet {} no longer exists", retweet_id);
            return Ok(None);
        };

        let (liked_by, comments) = tokio::try_join!(
            self.store.get_all_likes_by_tweet_id(retweet.id),
            self.comments_of(retweet.id),
        )?;
        retweet.liked_by = Some(liked_by);
        retweet.comments = Some(comments);
        Ok(Some(Box::new(retweet)))
    }
}
