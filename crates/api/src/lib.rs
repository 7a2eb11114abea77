mod env;
mod response;
mod routes;
mod state;
mod utils;

use axum::Router;
use tweetservice_clients::EnrichmentClient;
use tweetservice_database::RecordStore;

pub use routes::{comment_routes, misc_routes, tweet_routes};

pub use env::ApiServerEnv;
pub use response::{AppError, AppJson, GenericResponse};
pub use state::AppState;
pub use utils::setup_tracing;

/// Every route of the service, without layers.
pub fn app<S: RecordStore, E: EnrichmentClient>(state: AppState<S, E>) -> Router {
    Router::new()
        .merge(tweet_routes::<S, E>())
        .merge(comment_routes::<S, E>())
        .merge(misc_routes::<AppState<S, E>>())
        .with_state(state)
}
