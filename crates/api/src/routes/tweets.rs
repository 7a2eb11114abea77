use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use tweetservice_clients::EnrichmentClient;
use tweetservice_database::{NewTweet, RecordStore, Tweet};

use crate::response::{AppError, AppJson};
use crate::AppState;

pub fn tweet_routes<S: RecordStore, E: EnrichmentClient>() -> Router<AppState<S, E>> {
    Router::new()
        .route("/api/tweets",
            get(get_user_tweets::<S, E>)
            .post(create_tweet::<S, E>)
        )
        .route("/api/tweets/follows", get(get_followings_tweets::<S, E>))
        .route("/api/tweets/tweetHashtags", get(get_tweets_by_hashtag::<S, E>))
        .route("/api/tweets/commentHashtags", get(get_tweets_by_comments_hashtag::<S, E>))
        .route("/api/tweets/search/tweet", get(search_tweets::<S, E>))
        .route("/api/tweets/search/comment", get(search_comments::<S, E>))
        .route("/api/tweets/all", delete(delete_user_tweets::<S, E>))

        .route("/api/tweets/{id}",
            get(get_tweet::<S, E>)
            .delete(delete_tweet::<S, E>)
        )
        .route("/api/tweets/{id}/like",
            post(add_like::<S, E>)
            .delete(delete_like::<S, E>)
        )
        .route("/api/tweets/{id}/pictures", post(add_picture::<S, E>))
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    user: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct HashtagQuery {
    hashtag: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WordQuery {
    word: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PictureQuery {
    picture: Option<i64>,
}

async fn get_user_tweets<S: RecordStore, E: EnrichmentClient>(
    State(state): State<AppState<S, E>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<Tweet>>, AppError> {
    Ok(Json(state.tweets.get_user_tweets(query.user).await?))
}

async fn get_followings_tweets<S: RecordStore, E: EnrichmentClient>(
    State(state): State<AppState<S, E>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<Tweet>>, AppError> {
    Ok(Json(state.tweets.get_followings_tweets(query.user).await?))
}

async fn get_tweets_by_hashtag<S: RecordStore, E: EnrichmentClient>(
    State(state): State<AppState<S, E>>,
    Query(query): Query<HashtagQuery>,
) -> Result<Json<Vec<Tweet>>, AppError> {
    Ok(Json(state.tweets.get_tweets_by_hashtag(query.hashtag.as_deref()).await?))
}

async fn get_tweets_by_comments_hashtag<S: RecordStore, E: EnrichmentClient>(
    State(state): State<AppState<S, E>>,
    Query(query): Query<HashtagQuery>,
) -> Result<Json<Vec<Tweet>>, AppError> {
    Ok(Json(state.tweets.get_tweets_by_comments_hashtag(query.hashtag.as_deref()).await?))
}

async fn search_tweets<S: RecordStore, E: EnrichmentClient>(
    State(state): State<AppState<S, E>>,
    Query(query): Query<WordQuery>,
) -> Result<Json<Vec<Tweet>>, AppError> {
    Ok(Json(state.tweets.get_tweets_containing(query.word.as_deref()).await?))
}

async fn search_comments<S: RecordStore, E: EnrichmentClient>(
    State(state): State<AppState<S, E>>,
    Query(query): Query<WordQuery>,
) -> Result<Json<Vec<Tweet>>, AppError> {
    Ok(Json(state.tweets.get_tweets_by_comments_containing(query.word.as_deref()).await?))
}

async fn get_tweet<S: RecordStore, E: EnrichmentClient>(
    State(state): State<AppState<S, E>>,
    Path(id): Path<i64>,
) -> Result<Json<Tweet>, AppError> {
    Ok(Json(state.tweets.get_tweet(Some(id)).await?))
}

async fn create_tweet<S: RecordStore, E: EnrichmentClient>(
    State(state): State<AppState<S, E>>,
    AppJson(payload): AppJson<NewTweet>,
) -> Result<(StatusCode, Json<Tweet>), AppError> {
    let tweet = state.tweets.create_tweet(payload).await?;
    Ok((StatusCode::CREATED, Json(tweet)))
}

async fn add_like<S: RecordStore, E: EnrichmentClient>(
    State(state): State<AppState<S, E>>,
    Path(id): Path<i64>,
    Query(query): Query<UserQuery>,
) -> Result<StatusCode, AppError> {
    state.tweets.add_like(Some(id), query.user).await?;
    Ok(StatusCode::OK)
}

async fn delete_like<S: RecordStore, E: EnrichmentClient>(
    State(state): State<AppState<S, E>>,
    Path(id): Path<i64>,
    Query(query): Query<UserQuery>,
) -> Result<StatusCode, AppError> {
    state.tweets.delete_like(Some(id), query.user).await?;
    Ok(StatusCode::OK)
}

async fn add_picture<S: RecordStore, E: EnrichmentClient>(
    State(state): State<AppState<S, E>>,
    Path(id): Path<i64>,
    Query(query): Query<PictureQuery>,
) -> Result<StatusCode, AppError> {
    state.tweets.add_picture(Some(id), query.picture).await?;
    Ok(StatusCode::OK)
}

async fn delete_tweet<S: RecordStore, E: EnrichmentClient>(
    State(state): State<AppState<S, E>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.tweets.delete_tweet(Some(id)).await?;
    Ok(StatusCode::OK)
}

async fn delete_user_tweets<S: RecordStore, E: EnrichmentClient>(
    State(state): State<AppState<S, E>>,
    Query(query): Query<UserQuery>,
) -> Result<StatusCode, AppError> {
    state.tweets.delete_user_tweets(query.user).await?;
    Ok(StatusCode::OK)
}
