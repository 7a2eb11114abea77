use std::sync::Arc;

use tweetservice_clients::{EnrichmentClient, HashtagLikes, HashtagText};
use tweetservice_common::get_current_date;
use tweetservice_database::{Comment, CommentDraft, NewComment, RecordStore};

use crate::error::{required, Field, ServiceError, ServiceResult};
use crate::populator::Populator;

/// Comment side of the aggregation service.
pub struct CommentService<S, E> {
    store: Arc<S>,
    enrichment: Arc<E>,
    populator: Populator<S>,
}

impl<S, E> Clone for CommentService<S, E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            enrichment: self.enrichment.clone(),
            populator: self.populator.clone(),
        }
    }
}

impl<S: RecordStore, E: EnrichmentClient> CommentService<S, E> {
    pub fn new(store: Arc<S>, enrichment: Arc<E>) -> Self {
        let populator = Populator::new(store.clone());
        Self { store, enrichment, populator }
    }

    pub async fn get_comments(&self, tweet_id: Option<i64>) -> ServiceResult<Vec<Comment>> {
        let tweet_id = required(tweet_id, Field::TweetId)?;
        tracing::info!("[CommentService::get_comments] Getting all comments of tweet {}", tweet_id);

        let comments = self.store.find_comments_by_tweet_id(tweet_id).await?;
        let comments = self.populator.comments_likes(comments).await?;
        tracing::debug!("[CommentService::get_comments] {} comments of tweet {} received", comments.len(), tweet_id);
        Ok(comments)
    }

    /// Ids of the tweets owning a comment tagged with `hashtag`.
    pub async fn tweet_ids_by_hashtag(&self, hashtag: Option<&str>) -> ServiceResult<Vec<i64>> {
        let hashtag = required(hashtag, Field::Hashtag)?;
        tracing::info!("[CommentService::tweet_ids_by_hashtag] Getting tweets for comment hashtag {}", hashtag);

        let comment_ids = self.enrichment.comment_ids_by_hashtag(hashtag).await?;
        tracing::debug!("[CommentService::tweet_ids_by_hashtag] hashtag service returned {} comments", comment_ids.len());

        Ok(self.store.find_all_tweet_ids_by_comment_ids_in(&comment_ids).await?)
    }

    /// Ids of the tweets owning a comment whose text contains `word`, ignoring case.
    pub async fn tweet_ids_by_word(&self, word: Option<&str>) -> ServiceResult<Vec<i64>> {
        let word = required(word, Field::Word)?;
        tracing::info!("[CommentService::tweet_ids_by_word] Getting tweets with a comment containing {}", word);

        let comments = self.store.find_all_comments_by_text_containing(word).await?;
        Ok(comments.into_iter().map(|comment| comment.tweet_id).collect())
    }

    pub async fn create_comment(&self, new_comment: NewComment) -> ServiceResult<Comment> {
        let author_id = required(new_comment.author_id, Field::AuthorId)?;
        let tweet_id = required(new_comment.tweet_id, Field::TweetId)?;
        tracing::info!("[CommentService::create_comment] Creating a new comment on tweet {}", tweet_id);

        if !self.store.tweet_exists_by_id(tweet_id).await? {
            tracing::warn!("[CommentService::create_comment] tweet {} does not exist", tweet_id);
            return Err(ServiceError::NotFound("This Tweet does not exist".to_string()));
        }

        let comment = self.store.save_comment(CommentDraft {
            text: new_comment.text,
            author_id,
            tweet_id,
            created_on: get_current_date(),
        }).await?;
        tracing::debug!("[CommentService::create_comment] comment {} created", comment.id);

        self.send_text(comment.id, comment.text.clone());
        Ok(comment)
    }

    pub async fn delete_comment(&self, comment_id: Option<i64>) -> ServiceResult<()> {
        let comment_id = required(comment_id, Field::CommentId)?;
        tracing::info!("[CommentService::delete_comment] Deleting comment {}", comment_id);

        self.store.delete_all_likes_by_comment_id(comment_id).await?;
        self.store.delete_comment_by_id(comment_id).await?;
        tracing::debug!("[CommentService::delete_comment] comment {} deleted", comment_id);

        self.send_text(comment_id, String::new());
        Ok(())
    }

    /// Runs the single comment cascade for every comment of the tweet, one after another.
    pub async fn delete_all_comments_by_tweet_id(&self, tweet_id: Option<i64>) -> ServiceResult<()> {
        let tweet_id = required(tweet_id, Field::TweetId)?;
        tracing::info!("[CommentService::delete_all_comments_by_tweet_id] Deleting all comments of tweet {}", tweet_id);

        for comment in self.store.find_comments_by_tweet_id(tweet_id).await? {
            self.delete_comment(Some(comment.id)).await?;
        }
        Ok(())
    }

    pub async fn add_like(&self, comment_id: Option<i64>, user_id: Option<i64>) -> ServiceResult<()> {
        let comment_id = required(comment_id, Field::CommentId)?;
        let user_id = required(user_id, Field::UserId)?;
        tracing::info!("[CommentService::add_like] Adding like from user {} to comment {}", user_id, comment_id);

        if !self.store.comment_exists_by_id(comment_id).await? {
            tracing::warn!("[CommentService::add_like] comment {} does not exist", comment_id);
            return Err(ServiceError::NotFound("You can't like a comment that does not exists".to_string()));
        }

        self.store.add_like_to_comment(comment_id, user_id).await?;
        self.push_likes(comment_id);
        Ok(())
    }

    pub async fn delete_like(&self, comment_id: Option<i64>, user_id: Option<i64>) -> ServiceResult<()> {
        let comment_id = required(comment_id, Field::CommentId)?;
        let user_id = required(user_id, Field::UserId)?;
        tracing::info!("[CommentService::delete_like] User {} unlikes comment {}", user_id, comment_id);

        self.store.delete_like_by_comment_id_and_user_id(comment_id, user_id).await?;
        self.push_likes(comment_id);
        Ok(())
    }

    fn send_text(&self, id: i64, text: String) {
        let enrichment = self.enrichment.clone();
        tokio::spawn(async move {
            if let Err(e) = enrichment.send_comment_text(HashtagText { id, text }).await {
                tracing::warn!("[CommentService::send_text] comment {} not indexed: {}", id, e);
            }
        });
    }

    fn push_likes(&self, id: i64) {
        let store = self.store.clone();
        let enrichment = self.enrichment.clone();
        tokio::spawn(async move {
            let likes = match store.count_likes_by_comment_id(id).await {
                Ok(likes) => likes,
                Err(e) => {
                    tracing::warn!("[CommentService::push_likes] counting likes of comment {} failed: {}", id, e);
                    return;
                }
            };
            if let Err(e) = enrichment.update_comment_likes(HashtagLikes { id, likes }).await {
                tracing::warn!("[CommentService::push_likes] likes of comment {} not sent: {}", id, e);
            }
        });
    }
}
