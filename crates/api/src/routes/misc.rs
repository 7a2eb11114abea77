use axum::{routing::get, Router};

pub fn misc_routes<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new()
        .route("/health",
            get(|| async { "OK" })
        )
}
