use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use tweetservice_clients::EnrichmentClient;
use tweetservice_database::{Comment, NewComment, RecordStore};

use crate::response::{AppError, AppJson};
use crate::AppState;

pub fn comment_routes<S: RecordStore, E: EnrichmentClient>() -> Router<AppState<S, E>> {
    Router::new()
        .route("/api/comments",
            get(get_comments::<S, E>)
            .post(create_comment::<S, E>)
        )
        .route("/api/comments/", post(create_comment::<S, E>))
        .route("/api/comments/{id}", delete(delete_comment::<S, E>))
        .route("/api/comments/{id}/like",
            post(add_like::<S, E>)
            .delete(delete_like::<S, E>)
        )
}

#[derive(Debug, Deserialize)]
pub struct TweetQuery {
    tweet: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    user: Option<i64>,
}

async fn get_comments<S: RecordStore, E: EnrichmentClient>(
    State(state): State<AppState<S, E>>,
    Query(query): Query<TweetQuery>,
) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(state.comments().get_comments(query.tweet).await?))
}

async fn create_comment<S: RecordStore, E: EnrichmentClient>(
    State(state): State<AppState<S, E>>,
    AppJson(payload): AppJson<NewComment>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let comment = state.comments().create_comment(payload).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

async fn delete_comment<S: RecordStore, E: EnrichmentClient>(
    State(state): State<AppState<S, E>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.comments().delete_comment(Some(id)).await?;
    Ok(StatusCode::OK)
}

async fn add_like<S: RecordStore, E: EnrichmentClient>(
    State(state): State<AppState<S, E>>,
    Path(id): Path<i64>,
    Query(query): Query<UserQuery>,
) -> Result<StatusCode, AppError> {
    state.comments().add_like(Some(id), query.user).await?;
    Ok(StatusCode::OK)
}

async fn delete_like<S: RecordStore, E: EnrichmentClient>(
    State(state): State<AppState<S, E>>,
    Path(id): Path<i64>,
    Query(query): Query<UserQuery>,
) -> Result<StatusCode, AppError> {
    state.comments().delete_like(Some(id), query.user).await?;
    Ok(StatusCode::OK)
}
