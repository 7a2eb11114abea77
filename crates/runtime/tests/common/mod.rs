#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Notify;
use tweetservice_clients::{ClientError, EnrichmentClient, HashtagLikes, HashtagText};
use tweetservice_database::{
    Comment, CommentDraft, CommentStore, MemoryStore, Tweet, TweetDraft, TweetStore,
};
use tweetservice_runtime::TweetService;

/// A [`MemoryStore`] that remembers every call made to it, in order.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    calls: Mutex<Vec<String>>,
}

impl RecordingStore {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn called(&self, name: &str) -> bool {
        self.calls().iter().any(|call| call.starts_with(&format!("{}(", name)))
    }

    pub fn count_calls(&self, name: &str) -> usize {
        self.calls().iter().filter(|call| call.starts_with(&format!("{}(", name))).count()
    }
}

#[async_trait]
impl TweetStore for RecordingStore {
    async fn find_tweet_by_id(&self, id: i64) -> Result<Option<Tweet>> {
        self.record(format!("find_tweet_by_id({})", id));
        self.inner.find_tweet_by_id(id).await
    }

    async fn tweet_exists_by_id(&self, id: i64) -> Result<bool> {
        self.record(format!("tweet_exists_by_id({})", id));
        self.inner.tweet_exists_by_id(id).await
    }

    async fn save_tweet(&self, draft: TweetDraft) -> Result<Tweet> {
        self.record("save_tweet()".to_string());
        self.inner.save_tweet(draft).await
    }

    async fn delete_tweet_by_id(&self, id: i64) -> Result<()> {
        self.record(format!("delete_tweet_by_id({})", id));
        self.inner.delete_tweet_by_id(id).await
    }

    async fn find_all_tweets_by_author_id(&self, author_id: i64) -> Result<Vec<Tweet>> {
        self.record(format!("find_all_tweets_by_author_id({})", author_id));
        self.inner.find_all_tweets_by_author_id(author_id).await
    }

    async fn find_all_tweets_by_author_id_in(&self, author_ids: &[i64]) -> Result<Vec<Tweet>> {
        self.record(format!("find_all_tweets_by_author_id_in({:?})", author_ids));
        self.inner.find_all_tweets_by_author_id_in(author_ids).await
    }

    async fn find_all_tweets_by_id_in(&self, ids: &[i64]) -> Result<Vec<Tweet>> {
        self.record(format!("find_all_tweets_by_id_in({:?})", ids));
        self.inner.find_all_tweets_by_id_in(ids).await
    }

    async fn find_all_tweets_by_text_containing(&self, word: &str) -> Result<Vec<Tweet>> {
        self.record(format!("find_all_tweets_by_text_containing({})", word));
        self.inner.find_all_tweets_by_text_containing(word).await
    }

    async fn set_retweet_ids_null_by_tweet_id(&self, id: i64) -> Result<()> {
        self.record(format!("set_retweet_ids_null_by_tweet_id({})", id));
        self.inner.set_retweet_ids_null_by_tweet_id(id).await
    }

    async fn get_all_likes_by_tweet_id(&self, id: i64) -> Result<Vec<i64>> {
        self.record(format!("get_all_likes_by_tweet_id({})", id));
        self.inner.get_all_likes_by_tweet_id(id).await
    }

    async fn add_like_to_tweet(&self, tweet_id: i64, user_id: i64) -> Result<()> {
        self.record(format!("add_like_to_tweet({}, {})", tweet_id, user_id));
        self.inner.add_like_to_tweet(tweet_id, user_id).await
    }

    async fn delete_like_by_tweet_id_and_user_id(&self, tweet_id: i64, user_id: i64) -> Result<()> {
        self.record(format!("delete_like_by_tweet_id_and_user_id({}, {})", tweet_id, user_id));
        self.inner.delete_like_by_tweet_id_and_user_id(tweet_id, user_id).await
    }

    async fn delete_all_likes_by_tweet_id(&self, id: i64) -> Result<()> {
        self.record(format!("delete_all_likes_by_tweet_id({})", id));
        self.inner.delete_all_likes_by_tweet_id(id).await
    }

    async fn count_likes_by_tweet_id(&self, id: i64) -> Result<i64> {
        self.record(format!("count_likes_by_tweet_id({})", id));
        self.inner.count_likes_by_tweet_id(id).await
    }

    async fn get_all_pictures_by_tweet_id(&self, id: i64) -> Result<Vec<i64>> {
        self.record(format!("get_all_pictures_by_tweet_id({})", id));
        self.inner.get_all_pictures_by_tweet_id(id).await
    }

    async fn add_picture_to_tweet(&self, tweet_id: i64, picture_id: i64) -> Result<()> {
        self.record(format!("add_picture_to_tweet({}, {})", tweet_id, picture_id));
        self.inner.add_picture_to_tweet(tweet_id, picture_id).await
    }

    async fn delete_all_pictures_by_tweet_id(&self, id: i64) -> Result<()> {
        self.record(format!("delete_all_pictures_by_tweet_id({})", id));
        self.inner.delete_all_pictures_by_tweet_id(id).await
    }
}

#[async_trait]
impl CommentStore for RecordingStore {
    async fn find_comment_by_id(&self, id: i64) -> Result<Option<Comment>> {
        self.record(format!("find_comment_by_id({})", id));
        self.inner.find_comment_by_id(id).await
    }

    async fn comment_exists_by_id(&self, id: i64) -> Result<bool> {
        self.record(format!("comment_exists_by_id({})", id));
        self.inner.comment_exists_by_id(id).await
    }

    async fn save_comment(&self, draft: CommentDraft) -> Result<Comment> {
        self.record("save_comment()".to_string());
        self.inner.save_comment(draft).await
    }

    async fn delete_comment_by_id(&self, id: i64) -> Result<()> {
        self.record(format!("delete_comment_by_id({})", id));
        self.inner.delete_comment_by_id(id).await
    }

    async fn find_comments_by_tweet_id(&self, tweet_id: i64) -> Result<Vec<Comment>> {
        self.record(format!("find_comments_by_tweet_id({})", tweet_id));
        self.inner.find_comments_by_tweet_id(tweet_id).await
    }

    async fn find_all_comments_by_text_containing(&self, word: &str) -> Result<Vec<Comment>> {
        self.record(format!("find_all_comments_by_text_containing({})", word));
        self.inner.find_all_comments_by_text_containing(word).await
    }

    async fn find_all_tweet_ids_by_comment_ids_in(&self, ids: &[i64]) -> Result<Vec<i64>> {
        self.record(format!("find_all_tweet_ids_by_comment_ids_in({:?})", ids));
        self.inner.find_all_tweet_ids_by_comment_ids_in(ids).await
    }

    async fn get_all_likes_by_comment_id(&self, id: i64) -> Result<Vec<i64>> {
        self.record(format!("get_all_likes_by_comment_id({})", id));
        self.inner.get_all_likes_by_comment_id(id).await
    }

    async fn add_like_to_comment(&self, comment_id: i64, user_id: i64) -> Result<()> {
        self.record(format!("add_like_to_comment({}, {})", comment_id, user_id));
        self.inner.add_like_to_comment(comment_id, user_id).await
    }

    async fn delete_like_by_comment_id_and_user_id(&self, comment_id: i64, user_id: i64) -> Result<()> {
        self.record(format!("delete_like_by_comment_id_and_user_id({}, {})", comment_id, user_id));
        self.inner.delete_like_by_comment_id_and_user_id(comment_id, user_id).await
    }

    async fn delete_all_likes_by_comment_id(&self, id: i64) -> Result<()> {
        self.record(format!("delete_all_likes_by_comment_id({})", id));
        self.inner.delete_all_likes_by_comment_id(id).await
    }

    async fn count_likes_by_comment_id(&self, id: i64) -> Result<i64> {
        self.record(format!("count_likes_by_comment_id({})", id));
        self.inner.count_likes_by_comment_id(id).await
    }
}

/// Records every outbound call and answers lookups from fixed tables.
#[derive(Default)]
pub struct FakeEnrichment {
    pub unavailable: bool,
    pub tweet_hashtags: HashMap<String, Vec<i64>>,
    pub comment_hashtags: HashMap<String, Vec<i64>>,
    pub follows: HashMap<i64, Vec<i64>>,

    pub tweet_texts: Mutex<Vec<HashtagText>>,
    pub comment_texts: Mutex<Vec<HashtagText>>,
    pub tweet_likes: Mutex<Vec<HashtagLikes>>,
    pub comment_likes: Mutex<Vec<HashtagLikes>>,

    notify: Notify,
}

impl FakeEnrichment {
    pub fn unavailable() -> Self {
        Self { unavailable: true, ..Default::default() }
    }

    fn check(&self, service: &str) -> Result<(), ClientError> {
        if self.unavailable {
            return Err(ClientError::Unavailable(service.to_string()));
        }
        Ok(())
    }

    fn push<T>(&self, log: &Mutex<Vec<T>>, value: T) {
        log.lock().unwrap().push(value);
        self.notify.notify_waiters();
    }

    /// Waits until `done` holds, woken by every recorded call.
    pub async fn settle<F: Fn(&Self) -> bool>(&self, done: F) {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let notified = self.notify.notified();
                if done(self) {
                    return;
                }
                notified.await;
            }
        })
        .await
        .expect("background notification did not arrive");
    }

    pub fn tweet_texts(&self) -> Vec<HashtagText> {
        self.tweet_texts.lock().unwrap().clone()
    }

    pub fn comment_texts(&self) -> Vec<HashtagText> {
        self.comment_texts.lock().unwrap().clone()
    }

    pub fn tweet_likes(&self) -> Vec<HashtagLikes> {
        self.tweet_likes.lock().unwrap().clone()
    }

    pub fn comment_likes(&self) -> Vec<HashtagLikes> {
        self.comment_likes.lock().unwrap().clone()
    }
}

#[async_trait]
impl EnrichmentClient for FakeEnrichment {
    async fn send_tweet_text(&self, payload: HashtagText) -> Result<(), ClientError> {
        self.check("hashtag-service")?;
        self.push(&self.tweet_texts, payload);
        Ok(())
    }

    async fn send_comment_text(&self, payload: HashtagText) -> Result<(), ClientError> {
        self.check("hashtag-service")?;
        self.push(&self.comment_texts, payload);
        Ok(())
    }

    async fn update_tweet_likes(&self, payload: HashtagLikes) -> Result<(), ClientError> {
        self.check("hashtag-service")?;
        self.push(&self.tweet_likes, payload);
        Ok(())
    }

    async fn update_comment_likes(&self, payload: HashtagLikes) -> Result<(), ClientError> {
        self.check("hashtag-service")?;
        self.push(&self.comment_likes, payload);
        Ok(())
    }

    async fn tweet_ids_by_hashtag(&self, hashtag: &str) -> Result<Vec<i64>, ClientError> {
        self.check("hashtag-service")?;
        Ok(self.tweet_hashtags.get(hashtag).cloned().unwrap_or_default())
    }

    async fn comment_ids_by_hashtag(&self, hashtag: &str) -> Result<Vec<i64>, ClientError> {
        self.check("hashtag-service")?;
        Ok(self.comment_hashtags.get(hashtag).cloned().unwrap_or_default())
    }

    async fn follows(&self, user_id: i64) -> Result<Vec<i64>, ClientError> {
        self.check("follow-service")?;
        Ok(self.follows.get(&user_id).cloned().unwrap_or_default())
    }
}

pub struct Harness {
    pub store: Arc<RecordingStore>,
    pub enrichment: Arc<FakeEnrichment>,
    pub service: TweetService<RecordingStore, FakeEnrichment>,
}

pub fn harness_with(enrichment: FakeEnrichment) -> Harness {
    let store = Arc::new(RecordingStore::default());
    let enrichment = Arc::new(enrichment);
    let service = TweetService::new(store.clone(), enrichment.clone());
    Harness { store, enrichment, service }
}

pub fn harness() -> Harness {
    harness_with(FakeEnrichment::default())
}
