mod comment_service;
mod error;
mod populator;
mod tweet_service;

pub use comment_service::CommentService;
pub use error::{required, Field, ServiceError, ServiceResult};
pub use populator::Populator;
pub use tweet_service::TweetService;
