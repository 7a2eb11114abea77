use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{Comment, CommentDraft, CommentStore, Tweet, TweetDraft, TweetStore};

#[derive(Default)]
struct State {
    next_tweet_id: i64,
    next_comment_id: i64,
    tweets: BTreeMap<i64, Tweet>,
    comments: BTreeMap<i64, Comment>,
    tweet_likes: BTreeSet<(i64, i64)>,
    comment_likes: BTreeSet<(i64, i64)>,
    // (tweet_id, picture_id) in insertion order
    tweet_pictures: Vec<(i64, i64)>,
}

/// In-process record store with the same observable behavior as the Postgres one.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ignore_case(text: &str, word: &str) -> bool {
    text.to_lowercase().contains(&word.to_lowercase())
}

fn likes_of(likes: &BTreeSet<(i64, i64)>, id: i64) -> Vec<i64> {
    likes.range((id, i64::MIN)..=(id, i64::MAX)).map(|(_, user)| *user).collect()
}

#[async_trait]
impl TweetStore for MemoryStore {
    async fn find_tweet_by_id(&self, id: i64) -> Result<Option<Tweet>> {
        Ok(self.state.lock().await.tweets.get(&id).cloned())
    }

    async fn tweet_exists_by_id(&self, id: i64) -> Result<bool> {
        Ok(self.state.lock().await.tweets.contains_key(&id))
    }

    async fn save_tweet(&self, draft: TweetDraft) -> Result<Tweet> {
        let mut state = self.state.lock().await;
        state.next_tweet_id += 1;
        let tweet = draft.into_tweet(state.next_tweet_id);
        state.tweets.insert(tweet.id, tweet.clone());
        Ok(tweet)
    }

    async fn delete_tweet_by_id(&self, id: i64) -> Result<()> {
        self.state.lock().await.tweets.remove(&id);
        Ok(())
    }

    async fn find_all_tweets_by_author_id(&self, author_id: i64) -> Result<Vec<Tweet>> {
        let state = self.state.lock().await;
        Ok(state.tweets.values().filter(|t| t.author_id == author_id).cloned().collect())
    }

    async fn find_all_tweets_by_author_id_in(&self, author_ids: &[i64]) -> Result<Vec<Tweet>> {
        let state = self.state.lock().await;
        Ok(state.tweets.values().filter(|t| author_ids.contains(&t.author_id)).cloned().collect())
    }

    async fn find_all_tweets_by_id_in(&self, ids: &[i64]) -> Result<Vec<Tweet>> {
        let state = self.state.lock().await;
        Ok(state.tweets.values().filter(|t| ids.contains(&t.id)).cloned().collect())
    }

    async fn find_all_tweets_by_text_containing(&self, word: &str) -> Result<Vec<Tweet>> {
        let state = self.state.lock().await;
        Ok(state.tweets.values().filter(|t| contains_ignore_case(&t.text, word)).cloned().collect())
    }

    async fn set_retweet_ids_null_by_tweet_id(&self, id: i64) -> Result<()> {
        let mut state = self.state.lock().await;
        for tweet in state.tweets.values_mut().filter(|t| t.retweet_id == Some(id)) {
            tweet.retweet_id = None;
        }
        Ok(())
    }

    async fn get_all_likes_by_tweet_id(&self, id: i64) -> Result<Vec<i64>> {
        Ok(likes_of(&self.state.lock().await.tweet_likes, id))
    }

    async fn add_like_to_tweet(&self, tweet_id: i64, user_id: i64) -> Result<()> {
        self.state.lock().await.tweet_likes.insert((tweet_id, user_id));
        Ok(())
    }

    async fn delete_like_by_tweet_id_and_user_id(&self, tweet_id: i64, user_id: i64) -> Result<()> {
        self.state.lock().await.tweet_likes.remove(&(tweet_id, user_id));
        Ok(())
    }

    async fn delete_all_likes_by_tweet_id(&self, id: i64) -> Result<()> {
        self.state.lock().await.tweet_likes.retain(|(tweet_id, _)| *tweet_id != id);
        Ok(())
    }

    async fn count_likes_by_tweet_id(&self, id: i64) -> Result<i64> {
        Ok(likes_of(&self.state.lock().await.tweet_likes, id).len() as i64)
    }

    async fn get_all_pictures_by_tweet_id(&self, id: i64) -> Result<Vec<i64>> {
        let state = self.state.lock().await;
        Ok(state.tweet_pictures.iter().filter(|(t, _)| *t == id).map(|(_, p)| *p).collect())
    }

    async fn add_picture_to_tweet(&self, tweet_id: i64, picture_id: i64) -> Result<()> {
        self.state.lock().await.tweet_pictures.push((tweet_id, picture_id));
        Ok(())
    }

    async fn delete_all_pictures_by_tweet_id(&self, id: i64) -> Result<()> {
        self.state.lock().await.tweet_pictures.retain(|(tweet_id, _)| *tweet_id != id);
        Ok(())
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn find_comment_by_id(&self, id: i64) -> Result<Option<Comment>> {
        Ok(self.state.lock().await.comments.get(&id).cloned())
    }

    async fn comment_exists_by_id(&self, id: i64) -> Result<bool> {
        Ok(self.state.lock().await.comments.contains_key(&id))
    }

    async fn save_comment(&self, draft: CommentDraft) -> Result<Comment> {
        let mut state = self.state.lock().await;
        state.next_comment_id += 1;
        let comment = draft.into_comment(state.next_comment_id);
        state.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete_comment_by_id(&self, id: i64) -> Result<()> {
        self.state.lock().await.comments.remove(&id);
        Ok(())
    }

    async fn find_comments_by_tweet_id(&self, tweet_id: i64) -> Result<Vec<Comment>> {
        let state = self.state.lock().await;
        Ok(state.comments.values().filter(|c| c.tweet_id == tweet_id).cloned().collect())
    }

    async fn find_all_comments_by_text_containing(&self, word: &str) -> Result<Vec<Comment>> {
        let state = self.state.lock().await;
        Ok(state.comments.values().filter(|c| contains_ignore_case(&c.text, word)).cloned().collect())
    }

    async fn find_all_tweet_ids_by_comment_ids_in(&self, ids: &[i64]) -> Result<Vec<i64>> {
        let state = self.state.lock().await;
        Ok(state.comments.values().filter(|c| ids.contains(&c.id)).map(|c| c.tweet_id).collect())
    }

    async fn get_all_likes_by_comment_id(&self, id: i64) -> Result<Vec<i64>> {
        Ok(likes_of(&self.state.lock().await.comment_likes, id))
    }

    async fn add_like_to_comment(&self, comment_id: i64, user_id: i64) -> Result<()> {
        self.state.lock().await.comment_likes.insert((comment_id, user_id));
        Ok(())
    }

    async fn delete_like_by_comment_id_and_user_id(&self, comment_id: i64, user_id: i64) -> Result<()> {
        self.state.lock().await.comment_likes.remove(&(comment_id, user_id));
        Ok(())
    }

    async fn delete_all_likes_by_comment_id(&self, id: i64) -> Result<()> {
        self.state.lock().await.comment_likes.retain(|(comment_id, _)| *comment_id != id);
        Ok(())
    }

    async fn count_likes_by_comment_id(&self, id: i64) -> Result<i64> {
        Ok(likes_of(&self.state.lock().await.comment_likes, id).len() as i64)
    }
}
