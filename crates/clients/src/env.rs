use tweetservice_common::{env_or, EnvVars};

use crate::consts::*;

/// Where the sibling services live and how their endpoints are shaped.
#[derive(Debug, Clone)]
pub struct ServicesEnv {
    pub service_scheme: String,
    pub service_registry_url: Option<String>,
    pub service_instances: String,

    pub hashtag_service_name: String,
    pub hashtag_send_tweet_path: String,
    pub hashtag_send_comment_path: String,
    pub hashtag_tweets_by_hashtag_path: String,
    pub hashtag_comments_by_hashtag_path: String,
    pub hashtag_update_tweet_likes_path: String,
    pub hashtag_update_comment_likes_path: String,
    pub hashtag_query_variable: String,

    pub follow_service_name: String,
    pub follow_get_follows_path: String,
    pub follow_query_variable: String,
}

impl Default for ServicesEnv {
    fn default() -> Self {
        Self {
            service_scheme: DEFAULT_SERVICE_SCHEME.to_string(),
            service_registry_url: None,
            service_instances: String::new(),
            hashtag_service_name: DEFAULT_HASHTAG_SERVICE_NAME.to_string(),
            hashtag_send_tweet_path: DEFAULT_HASHTAG_SEND_TWEET_PATH.to_string(),
            hashtag_send_comment_path: DEFAULT_HASHTAG_SEND_COMMENT_PATH.to_string(),
            hashtag_tweets_by_hashtag_path: DEFAULT_HASHTAG_TWEETS_BY_HASHTAG_PATH.to_string(),
            hashtag_comments_by_hashtag_path: DEFAULT_HASHTAG_COMMENTS_BY_HASHTAG_PATH.to_string(),
            hashtag_update_tweet_likes_path: DEFAULT_HASHTAG_UPDATE_TWEET_LIKES_PATH.to_string(),
            hashtag_update_comment_likes_path: DEFAULT_HASHTAG_UPDATE_COMMENT_LIKES_PATH.to_string(),
            hashtag_query_variable: DEFAULT_HASHTAG_QUERY_VARIABLE.to_string(),
            follow_service_name: DEFAULT_FOLLOW_SERVICE_NAME.to_string(),
            follow_get_follows_path: DEFAULT_FOLLOW_GET_FOLLOWS_PATH.to_string(),
            follow_query_variable: DEFAULT_FOLLOW_QUERY_VARIABLE.to_string(),
        }
    }
}

impl EnvVars for ServicesEnv {
    fn load() -> Self {
        Self {
            service_scheme: env_or("SERVICE_SCHEME", DEFAULT_SERVICE_SCHEME),
            service_registry_url: std::env::var("SERVICE_REGISTRY_URL").ok().filter(|url| !url.is_empty()),
            service_instances: env_or("SERVICE_INSTANCES", ""),
            hashtag_service_name: env_or("HASHTAG_SERVICE_NAME", DEFAULT_HASHTAG_SERVICE_NAME),
            hashtag_send_tweet_path: env_or("HASHTAG_SEND_TWEET_PATH", DEFAULT_HASHTAG_SEND_TWEET_PATH),
            hashtag_send_comment_path: env_or("HASHTAG_SEND_COMMENT_PATH", DEFAULT_HASHTAG_SEND_COMMENT_PATH),
            hashtag_tweets_by_hashtag_path: env_or("HASHTAG_TWEETS_BY_HASHTAG_PATH", DEFAULT_HASHTAG_TWEETS_BY_HASHTAG_PATH),
            hashtag_comments_by_hashtag_path: env_or("HASHTAG_COMMENTS_BY_HASHTAG_PATH", DEFAULT_HASHTAG_COMMENTS_BY_HASHTAG_PATH),
            hashtag_update_tweet_likes_path: env_or("HASHTAG_UPDATE_TWEET_LIKES_PATH", DEFAULT_HASHTAG_UPDATE_TWEET_LIKES_PATH),
            hashtag_update_comment_likes_path: env_or("HASHTAG_UPDATE_COMMENT_LIKES_PATH", DEFAULT_HASHTAG_UPDATE_COMMENT_LIKES_PATH),
            hashtag_query_variable: env_or("HASHTAG_QUERY_VARIABLE", DEFAULT_HASHTAG_QUERY_VARIABLE),
            follow_service_name: env_or("FOLLOW_SERVICE_NAME", DEFAULT_FOLLOW_SERVICE_NAME),
            follow_get_follows_path: env_or("FOLLOW_GET_FOLLOWS_PATH", DEFAULT_FOLLOW_GET_FOLLOWS_PATH),
            follow_query_variable: env_or("FOLLOW_QUERY_VARIABLE", DEFAULT_FOLLOW_QUERY_VARIABLE),
        }
    }

    fn get_env_var(&self, key: &str) -> String {
        match key {
            "SERVICE_SCHEME" => self.service_scheme.clone(),
            "SERVICE_REGISTRY_URL" => self.service_registry_url.clone().unwrap_or_default(),
            "SERVICE_INSTANCES" => self.service_instances.clone(),
            "HASHTAG_SERVICE_NAME" => self.hashtag_service_name.clone(),
            "HASHTAG_SEND_TWEET_PATH" => self.hashtag_send_tweet_path.clone(),
            "HASHTAG_SEND_COMMENT_PATH" => self.hashtag_send_comment_path.clone(),
            "HASHTAG_TWEETS_BY_HASHTAG_PATH" => self.hashtag_tweets_by_hashtag_path.clone(),
            "HASHTAG_COMMENTS_BY_HASHTAG_PATH" => self.hashtag_comments_by_hashtag_path.clone(),
            "HASHTAG_UPDATE_TWEET_LIKES_PATH" => self.hashtag_update_tweet_likes_path.clone(),
            "HASHTAG_UPDATE_COMMENT_LIKES_PATH" => self.hashtag_update_comment_likes_path.clone(),
            "HASHTAG_QUERY_VARIABLE" => self.hashtag_query_variable.clone(),
            "FOLLOW_SERVICE_NAME" => self.follow_service_name.clone(),
            "FOLLOW_GET_FOLLOWS_PATH" => self.follow_get_follows_path.clone(),
            "FOLLOW_QUERY_VARIABLE" => self.follow_query_variable.clone(),
            _ => panic!("{} is not set", key),
        }
    }
}
