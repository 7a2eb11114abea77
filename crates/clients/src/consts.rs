pub const DEFAULT_SERVICE_SCHEME: &str = "https";

pub const DEFAULT_HASHTAG_SERVICE_NAME: &str = "hashtag-service";
pub const DEFAULT_FOLLOW_SERVICE_NAME: &str = "follow-service";

pub const DEFAULT_HASHTAG_SEND_TWEET_PATH: &str = "/api/hashtags/tweet";
pub const DEFAULT_HASHTAG_SEND_COMMENT_PATH: &str = "/api/hashtags/comment";
pub const DEFAULT_HASHTAG_TWEETS_BY_HASHTAG_PATH: &str = "/api/hashtags/tweets";
pub const DEFAULT_HASHTAG_COMMENTS_BY_HASHTAG_PATH: &str = "/api/hashtags/comments";
pub const DEFAULT_HASHTAG_UPDATE_TWEET_LIKES_PATH: &str = "/api/hashtags/tweet/likes";
pub const DEFAULT_HASHTAG_UPDATE_COMMENT_LIKES_PATH: &str = "/api/hashtags/comment/likes";
pub const DEFAULT_HASHTAG_QUERY_VARIABLE: &str = "hashtag";

pub const DEFAULT_FOLLOW_GET_FOLLOWS_PATH: &str = "/api/follows";
pub const DEFAULT_FOLLOW_QUERY_VARIABLE: &str = "user";
