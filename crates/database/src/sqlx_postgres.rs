use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::{Comment, CommentDraft, CommentStore, Tweet, TweetDraft, TweetStore};

const TWEET_COLUMNS: &str = "id, text, author_id, created_on, retweet_id";
const COMMENT_COLUMNS: &str = "id, text, author_id, tweet_id, created_on";

/// Escapes LIKE wildcards so a search word only ever matches literally.
fn like_pattern(word: &str) -> String {
    let escaped = word
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Record store backed by Postgres.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TweetStore for PgStore {
    async fn find_tweet_by_id(&self, id: i64) -> Result<Option<Tweet>> {
        let sql = format!("SELECT {} FROM tweet WHERE id = $1", TWEET_COLUMNS);
        let tweet = sqlx::query_as::<_, Tweet>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tweet)
    }

    async fn tweet_exists_by_id(&self, id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tweet WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn save_tweet(&self, draft: TweetDraft) -> Result<Tweet> {
        let sql = format!(
            "INSERT INTO tweet (text, author_id, created_on, retweet_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            TWEET_COLUMNS
        );
        let tweet = sqlx::query_as::<_, Tweet>(&sql)
            .bind(draft.text)
            .bind(draft.author_id)
            .bind(draft.created_on)
            .bind(draft.retweet_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(tweet)
    }

    async fn delete_tweet_by_id(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM tweet WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_all_tweets_by_author_id(&self, author_id: i64) -> Result<Vec<Tweet>> {
        let sql = format!("SELECT {} FROM tweet WHERE author_id = $1 ORDER BY id", TWEET_COLUMNS);
        let tweets = sqlx::query_as::<_, Tweet>(&sql)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(tweets)
    }

    async fn find_all_tweets_by_author_id_in(&self, author_ids: &[i64]) -> Result<Vec<Tweet>> {
        if author_ids.is_empty() {
            return Ok(vec![]);
        }
        let sql = format!("SELECT {} FROM tweet WHERE author_id = ANY($1) ORDER BY id", TWEET_COLUMNS);
        let tweets = sqlx::query_as::<_, Tweet>(&sql)
            .bind(author_ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(tweets)
    }

    async fn find_all_tweets_by_id_in(&self, ids: &[i64]) -> Result<Vec<Tweet>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let sql = format!("SELECT {} FROM tweet WHERE id = ANY($1) ORDER BY id", TWEET_COLUMNS);
        let tweets = sqlx::query_as::<_, Tweet>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(tweets)
    }

    async fn find_all_tweets_by_text_containing(&self, word: &str) -> Result<Vec<Tweet>> {
        let sql = format!("SELECT {} FROM tweet WHERE text ILIKE $1 ORDER BY id", TWEET_COLUMNS);
        let tweets = sqlx::query_as::<_, Tweet>(&sql)
            .bind(like_pattern(word))
            .fetch_all(&self.pool)
            .await?;
        Ok(tweets)
    }

    async fn set_retweet_ids_null_by_tweet_id(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE tweet SET retweet_id = NULL WHERE retweet_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_all_likes_by_tweet_id(&self, id: i64) -> Result<Vec<i64>> {
        let likes = sqlx::query_scalar::<_, i64>("SELECT user_id FROM tweet_like WHERE tweet_id = $1 ORDER BY user_id")
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(likes)
    }

    async fn add_like_to_tweet(&self, tweet_id: i64, user_id: i64) -> Result<()> {
        sqlx::query("INSERT INTO tweet_like (tweet_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(tweet_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_like_by_tweet_id_and_user_id(&self, tweet_id: i64, user_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM tweet_like WHERE tweet_id = $1 AND user_id = $2")
            .bind(tweet_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_all_likes_by_tweet_id(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM tweet_like WHERE tweet_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count_likes_by_tweet_id(&self, id: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(user_id) FROM tweet_like WHERE tweet_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn get_all_pictures_by_tweet_id(&self, id: i64) -> Result<Vec<i64>> {
        let pictures = sqlx::query_scalar::<_, i64>(
            "SELECT picture_id FROM tweet_picture WHERE tweet_id = $1 ORDER BY position",
        )
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(pictures)
    }

    async fn add_picture_to_tweet(&self, tweet_id: i64, picture_id: i64) -> Result<()> {
        sqlx::query("INSERT INTO tweet_picture (tweet_id, picture_id) VALUES ($1, $2)")
            .bind(tweet_id)
            .bind(picture_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_all_pictures_by_tweet_id(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM tweet_picture WHERE tweet_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CommentStore for PgStore {
    async fn find_comment_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let sql = format!("SELECT {} FROM comment WHERE id = $1", COMMENT_COLUMNS);
        let comment = sqlx::query_as::<_, Comment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(comment)
    }

    async fn comment_exists_by_id(&self, id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM comment WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn save_comment(&self, draft: CommentDraft) -> Result<Comment> {
        let sql = format!(
            "INSERT INTO comment (text, author_id, tweet_id, created_on) VALUES ($1, $2, $3, $4) RETURNING {}",
            COMMENT_COLUMNS
        );
        let comment = sqlx::query_as::<_, Comment>(&sql)
            .bind(draft.text)
            .bind(draft.author_id)
            .bind(draft.tweet_id)
            .bind(draft.created_on)
            .fetch_one(&self.pool)
            .await?;
        Ok(comment)
    }

    async fn delete_comment_by_id(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM comment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_comments_by_tweet_id(&self, tweet_id: i64) -> Result<Vec<Comment>> {
        let sql = format!("SELECT {} FROM comment WHERE tweet_id = $1 ORDER BY id", COMMENT_COLUMNS);
        let comments = sqlx::query_as::<_, Comment>(&sql)
            .bind(tweet_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(comments)
    }

    async fn find_all_comments_by_text_containing(&self, word: &str) -> Result<Vec<Comment>> {
        let sql = format!("SELECT {} FROM comment WHERE text ILIKE $1 ORDER BY id", COMMENT_COLUMNS);
        let comments = sqlx::query_as::<_, Comment>(&sql)
            .bind(like_pattern(word))
            .fetch_all(&self.pool)
            .await?;
        Ok(comments)
    }

    async fn find_all_tweet_ids_by_comment_ids_in(&self, ids: &[i64]) -> Result<Vec<i64>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let tweet_ids = sqlx::query_scalar::<_, i64>("SELECT tweet_id FROM comment WHERE id = ANY($1) ORDER BY id")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(tweet_ids)
    }

    async fn get_all_likes_by_comment_id(&self, id: i64) -> Result<Vec<i64>> {
        let likes = sqlx::query_scalar::<_, i64>("SELECT user_id FROM comment_like WHERE comment_id = $1 ORDER BY user_id")
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(likes)
    }

    async fn add_like_to_comment(&self, comment_id: i64, user_id: i64) -> Result<()> {
        sqlx::query("INSERT INTO comment_like (comment_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(comment_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_like_by_comment_id_and_user_id(&self, comment_id: i64, user_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM comment_like WHERE comment_id = $1 AND user_id = $2")
            .bind(comment_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_all_likes_by_comment_id(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM comment_like WHERE comment_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count_likes_by_comment_id(&self, id: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(user_id) FROM comment_like WHERE comment_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }
}
