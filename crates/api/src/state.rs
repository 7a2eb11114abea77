use std::sync::Arc;

use tweetservice_clients::EnrichmentClient;
use tweetservice_database::RecordStore;
use tweetservice_runtime::{CommentService, TweetService};

/// Shared router state: the aggregation service over one store and one enrichment client.
pub struct AppState<S, E> {
    pub tweets: TweetService<S, E>,
}

impl<S, E> Clone for AppState<S, E> {
    fn clone(&self) -> Self {
        Self { tweets: self.tweets.clone() }
    }
}

impl<S: RecordStore, E: EnrichmentClient> AppState<S, E> {
    pub fn new(store: Arc<S>, enrichment: Arc<E>) -> Self {
        Self { tweets: TweetService::new(store, enrichment) }
    }

    pub fn comments(&self) -> &CommentService<S, E> {
        self.tweets.comments()
    }
}
