mod comments;
mod misc;
mod tweets;

pub use comments::comment_routes;
pub use misc::misc_routes;
pub use tweets::tweet_routes;
