mod env;
mod models;
mod store;

#[cfg(feature = "postgres")]
mod postgres_connect;
#[cfg(feature = "postgres")]
mod sqlx_postgres;

#[cfg(feature = "memory")]
mod memory;

pub use env::DatabaseEnv;
pub use models::{Comment, CommentDraft, NewComment, NewTweet, Tweet, TweetDraft};
pub use store::{CommentStore, RecordStore, TweetStore};

#[cfg(feature = "postgres")]
pub use postgres_connect::{connect, create_tables};
#[cfg(feature = "postgres")]
pub use sqlx_postgres::PgStore;

#[cfg(feature = "memory")]
pub use memory::MemoryStore;
