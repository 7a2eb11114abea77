use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::{ServiceResolver, ServicesEnv};

/// Text of a tweet or comment to (re)index. An empty text removes the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagText {
    pub id: i64,
    pub text: String,
}

/// Current like count of a tweet or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagLikes {
    pub id: i64,
    pub likes: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0} is not accessible")]
    Unavailable(String),

    #[error("request to {service} failed: {source}")]
    Request {
        service: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} answered with status {status}")]
    Status { service: String, status: StatusCode },
}

/// Outbound calls to the hashtag and follow services.
#[async_trait]
pub trait EnrichmentClient: Send + Sync + 'static {
    async fn send_tweet_text(&self, payload: HashtagText) -> Result<(), ClientError>;
    async fn send_comment_text(&self, payload: HashtagText) -> Result<(), ClientError>;

    async fn update_tweet_likes(&self, payload: HashtagLikes) -> Result<(), ClientError>;
    async fn update_comment_likes(&self, payload: HashtagLikes) -> Result<(), ClientError>;

    async fn tweet_ids_by_hashtag(&self, hashtag: &str) -> Result<Vec<i64>, ClientError>;
    async fn comment_ids_by_hashtag(&self, hashtag: &str) -> Result<Vec<i64>, ClientError>;

    /// Ids of the users `user_id` follows.
    async fn follows(&self, user_id: i64) -> Result<Vec<i64>, ClientError>;
}

/// [`EnrichmentClient`] over HTTP, resolving every call through discovery.
#[derive(Clone)]
pub struct HttpEnrichmentClient {
    http: Client,
    resolver: Arc<dyn ServiceResolver>,
    env: ServicesEnv,
}

impl HttpEnrichmentClient {
    pub fn new(http: Client, resolver: Arc<dyn ServiceResolver>, env: ServicesEnv) -> Self {
        Self { http, resolver, env }
    }

    async fn endpoint(&self, service: &str, path: &str) -> Result<Url, ClientError> {
        let mut url = self
            .resolver
            .resolve(service)
            .await
            .ok_or_else(|| ClientError::Unavailable(service.to_string()))?;
        url.set_path(path);
        Ok(url)
    }

    async fn post_json<T: Serialize + Sync>(&self, service: &str, path: &str, body: &T) -> Result<(), ClientError> {
        let url = self.endpoint(service, path).await?;
        tracing::debug!("[enrichment] POST {}", url);

        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::Request { service: service.to_string(), source })?;

        if !response.status().is_success() {
            return Err(ClientError::Status { service: service.to_string(), status: response.status() });
        }
        Ok(())
    }

    async fn get_ids(&self, service: &str, path: &str, variable: &str, value: &str) -> Result<Vec<i64>, ClientError> {
        let mut url = self.endpoint(service, path).await?;
        url.query_pairs_mut().append_pair(variable, value);
        tracing::debug!("[enrichment] GET {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ClientError::Request { service: service.to_string(), source })?;

        if !response.status().is_success() {
            return Err(ClientError::Status { service: service.to_string(), status: response.status() });
        }

        response
            .json::<Vec<i64>>()
            .await
            .map_err(|source| ClientError::Request { service: service.to_string(), source })
    }
}

#[async_trait]
impl EnrichmentClient for HttpEnrichmentClient {
    async fn send_tweet_text(&self, payload: HashtagText) -> Result<(), ClientError> {
        self.post_json(&self.env.hashtag_service_name, &self.env.hashtag_send_tweet_path, &payload).await
    }

    async fn send_comment_text(&self, payload: HashtagText) -> Result<(), ClientError> {
        self.post_json(&self.env.hashtag_service_name, &self.env.hashtag_send_comment_path, &payload).await
    }

    async fn update_tweet_likes(&self, payload: HashtagLikes) -> Result<(), ClientError> {
        self.post_json(&self.env.hashtag_service_name, &self.env.hashtag_update_tweet_likes_path, &payload).await
    }

    async fn update_comment_likes(&self, payload: HashtagLikes) -> Result<(), ClientError> {
        self.post_json(&self.env.hashtag_service_name, &self.env.hashtag_update_comment_likes_path, &payload).await
    }

    async fn tweet_ids_by_hashtag(&self, hashtag: &str) -> Result<Vec<i64>, ClientError> {
        self.get_ids(
            &self.env.hashtag_service_name,
            &self.env.hashtag_tweets_by_hashtag_path,
            &self.env.hashtag_query_variable,
            hashtag,
        ).await
    }

    async fn comment_ids_by_hashtag(&self, hashtag: &str) -> Result<Vec<i64>, ClientError> {
        self.get_ids(
            &self.env.hashtag_service_name,
            &self.env.hashtag_comments_by_hashtag_path,
            &self.env.hashtag_query_variable,
            hashtag,
        ).await
    }

    async fn follows(&self, user_id: i64) -> Result<Vec<i64>, ClientError> {
        self.get_ids(
            &self.env.follow_service_name,
            &self.env.follow_get_follows_path,
            &self.env.follow_query_variable,
            &user_id.to_string(),
        ).await
    }
}
