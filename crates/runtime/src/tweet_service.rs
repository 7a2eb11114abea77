use std::sync::Arc;

use tweetservice_clients::{EnrichmentClient, HashtagLikes, HashtagText};
use tweetservice_common::get_current_date;
use tweetservice_database::{NewTweet, RecordStore, Tweet, TweetDraft};

use crate::comment_service::CommentService;
use crate::error::{required, Field, ServiceError, ServiceResult};
use crate::populator::Populator;

/// Tweet side of the aggregation service. Owns the comment side so that
/// deleting a tweet can cascade into its comments.
pub struct TweetService<S, E> {
    store: Arc<S>,
    enrichment: Arc<E>,
    populator: Populator<S>,
    comments: CommentService<S, E>,
}

impl<S, E> Clone for TweetService<S, E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            enrichment: self.enrichment.clone(),
            populator: self.populator.clone(),
            comments: self.comments.clone(),
        }
    }
}

impl<S: RecordStore, E: EnrichmentClient> TweetService<S, E> {
    pub fn new(store: Arc<S>, enrichment: Arc<E>) -> Self {
        Self {
            populator: Populator::new(store.clone()),
            comments: CommentService::new(store.clone(), enrichment.clone()),
            store,
            enrichment,
        }
    }

    pub fn comments(&self) -> &CommentService<S, E> {
        &self.comments
    }

    pub async fn get_user_tweets(&self, user_id: Option<i64>) -> ServiceResult<Vec<Tweet>> {
        let user_id = required(user_id, Field::UserId)?;
        tracing::info!("[TweetService::get_user_tweets] Getting all tweets of user {}", user_id);

        let tweets = self.store.find_all_tweets_by_author_id(user_id).await?;
        Ok(self.populator.all_many(tweets).await?)
    }

    pub async fn get_followings_tweets(&self, user_id: Option<i64>) -> ServiceResult<Vec<Tweet>> {
        let user_id = required(user_id, Field::UserId)?;
        tracing::info!("[TweetService::get_followings_tweets] Getting tweets of the users {} follows", user_id);

        let follows = self.enrichment.follows(user_id).await?;
        tracing::debug!("[TweetService::get_followings_tweets] user {} follows {} users", user_id, follows.len());

        let tweets = self.store.find_all_tweets_by_author_id_in(&follows).await?;
        Ok(self.populator.all_many(tweets).await?)
    }

    pub async fn get_tweets_by_hashtag(&self, hashtag: Option<&str>) -> ServiceResult<Vec<Tweet>> {
        let hashtag = required(hashtag, Field::Hashtag)?;
        tracing::info!("[TweetService::get_tweets_by_hashtag] Getting tweets for hashtag {}", hashtag);

        let ids = self.enrichment.tweet_ids_by_hashtag(hashtag).await?;
        self.get_tweets_by_ids(&ids).await
    }

    pub async fn get_tweets_by_comments_hashtag(&self, hashtag: Option<&str>) -> ServiceResult<Vec<Tweet>> {
        let ids = self.comments.tweet_ids_by_hashtag(hashtag).await?;
        self.get_tweets_by_ids(&ids).await
    }

    pub async fn get_tweets_containing(&self, word: Option<&str>) -> ServiceResult<Vec<Tweet>> {
        let word = required(word, Field::Word)?;
        tracing::info!("[TweetService::get_tweets_containing] Getting tweets containing {}", word);

        let tweets = self.store.find_all_tweets_by_text_containing(word).await?;
        Ok(self.populator.all_many(tweets).await?)
    }

    pub async fn get_tweets_by_comments_containing(&self, word: Option<&str>) -> ServiceResult<Vec<Tweet>> {
        let ids = self.comments.tweet_ids_by_word(word).await?;
        self.get_tweets_by_ids(&ids).await
    }

    pub async fn get_tweet(&self, tweet_id: Option<i64>) -> ServiceResult<Tweet> {
        let tweet_id = required(tweet_id, Field::TweetId)?;
        tracing::info!("[TweetService::get_tweet] Getting tweet {}", tweet_id);

        let tweet = self.store.find_tweet_by_id(tweet_id).await?
            .ok_or_else(|| ServiceError::NotFound("This Tweet does not exist".to_string()))?;
        Ok(self.populator.all(tweet).await?)
    }

    /// Saves the row, then its pictures in order. A failed picture insert leaves
    /// the saved row in place and skips the hashtag notification.
    pub async fn create_tweet(&self, new_tweet: NewTweet) -> ServiceResult<Tweet> {
        let author_id = required(new_tweet.author_id, Field::AuthorId)?;
        tracing::info!("[TweetService::create_tweet] Creating a new tweet for user {}", author_id);

        if let Some(retweet_id) = new_tweet.retweet_id {
            if !self.store.tweet_exists_by_id(retweet_id).await? {
                tracing::warn!("[TweetService::create_tweet] retweeted tweet {} does not exist", retweet_id);
                return Err(ServiceError::NotFound("This Tweet does not exist".to_string()));
            }
        }

        let mut tweet = self.store.save_tweet(TweetDraft {
            text: new_tweet.text,
            author_id,
            created_on: get_current_date(),
            retweet_id: new_tweet.retweet_id,
        }).await?;
        tracing::debug!("[TweetService::create_tweet] tweet {} created", tweet.id);

        if let Some(pictures) = new_tweet.pictures {
            for picture_id in &pictures {
                self.store.add_picture_to_tweet(tweet.id, *picture_id).await?;
            }
            tweet.pictures = Some(pictures);
        }

        self.send_text(tweet.id, tweet.text.clone());
        Ok(tweet)
    }

    pub async fn add_picture(&self, tweet_id: Option<i64>, picture_id: Option<i64>) -> ServiceResult<()> {
        let tweet_id = required(tweet_id, Field::TweetId)?;
        let picture_id = required(picture_id, Field::PictureId)?;
        tracing::info!("[TweetService::add_picture] Adding picture {} to tweet {}", picture_id, tweet_id);

        if !self.store.tweet_exists_by_id(tweet_id).await? {
            tracing::warn!("[TweetService::add_picture] tweet {} does not exist", tweet_id);
            return Err(ServiceError::NotFound("This Tweet does not exist".to_string()));
        }

        self.store.add_picture_to_tweet(tweet_id, picture_id).await?;
        Ok(())
    }

    pub async fn add_like(&self, tweet_id: Option<i64>, user_id: Option<i64>) -> ServiceResult<()> {
        let tweet_id = required(tweet_id, Field::TweetId)?;
        let user_id = required(user_id, Field::UserId)?;
        tracing::info!("[TweetService::add_like] Adding like from user {} to tweet {}", user_id, tweet_id);

        if !self.store.tweet_exists_by_id(tweet_id).await? {
            tracing::warn!("[TweetService::add_like] tweet {} does not exist", tweet_id);
            return Err(ServiceError::NotFound("This Tweet does not exist".to_string()));
        }

        self.store.add_like_to_tweet(tweet_id, user_id).await?;
        tracing::debug!("[TweetService::add_like] like from user {} to tweet {} added", user_id, tweet_id);

        self.push_likes(tweet_id);
        Ok(())
    }

    pub async fn delete_like(&self, tweet_id: Option<i64>, user_id: Option<i64>) -> ServiceResult<()> {
        let tweet_id = required(tweet_id, Field::TweetId)?;
        let user_id = required(user_id, Field::UserId)?;
        tracing::info!("[TweetService::delete_like] User {} unlikes tweet {}", user_id, tweet_id);

        self.store.delete_like_by_tweet_id_and_user_id(tweet_id, user_id).await?;
        self.push_likes(tweet_id);
        Ok(())
    }

    /// Likes, comments, pictures, retweet references, then the row itself.
    /// Each step waits for the previous one; nothing is rolled back if a later step fails.
    pub async fn delete_tweet(&self, tweet_id: Option<i64>) -> ServiceResult<()> {
        let tweet_id = required(tweet_id, Field::TweetId)?;
        tracing::info!("[TweetService::delete_tweet] Deleting tweet {}", tweet_id);

        self.store.delete_all_likes_by_tweet_id(tweet_id).await?;
        self.comments.delete_all_comments_by_tweet_id(Some(tweet_id)).await?;
        self.store.delete_all_pictures_by_tweet_id(tweet_id).await?;
        self.store.set_retweet_ids_null_by_tweet_id(tweet_id).await?;
        self.store.delete_tweet_by_id(tweet_id).await?;
        tracing::debug!("[TweetService::delete_tweet] tweet {} deleted", tweet_id);

        self.send_text(tweet_id, String::new());
        Ok(())
    }

    pub async fn delete_user_tweets(&self, user_id: Option<i64>) -> ServiceResult<()> {
        let user_id = required(user_id, Field::UserId)?;
        tracing::info!("[TweetService::delete_user_tweets] Deleting all tweets of user {}", user_id);

        for tweet in self.get_user_tweets(Some(user_id)).await? {
            self.delete_tweet(Some(tweet.id)).await?;
        }
        Ok(())
    }

    async fn get_tweets_by_ids(&self, ids: &[i64]) -> ServiceResult<Vec<Tweet>> {
        let tweets = self.store.find_all_tweets_by_id_in(ids).await?;
        tracing::debug!("[TweetService::get_tweets_by_ids] {} tweets received", tweets.len());
        Ok(self.populator.all_many(tweets).await?)
    }

    fn send_text(&self, id: i64, text: String) {
        let enrichment = self.enrichment.clone();
        tokio::spawn(async move {
            if let Err(e) = enrichment.send_tweet_text(HashtagText { id, text }).await {
                tracing::warn!("[TweetService::send_text] tweet {} not indexed: {}", id, e);
            }
        });
    }

    fn push_likes(&self, id: i64) {
        let store = self.store.clone();
        let enrichment = self.enrichment.clone();
        tokio::spawn(async move {
            let likes = match store.count_likes_by_tweet_id(id).await {
                Ok(likes) => likes,
                Err(e) => {
                    tracing::warn!("[TweetService::push_likes] counting likes of tweet {} failed: {}", id, e);
                    return;
                }
            };
            if let Err(e) = enrichment.update_tweet_likes(HashtagLikes { id, likes }).await {
                tracing::warn!("[TweetService::push_likes] likes of tweet {} not sent: {}", id, e);
            }
        });
    }
}
