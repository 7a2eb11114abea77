use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use tweetservice_api::{app, AppState};
use tweetservice_clients::{ClientError, EnrichmentClient, HashtagLikes, HashtagText};
use tweetservice_database::MemoryStore;

struct StubEnrichment;

#[async_trait]
impl EnrichmentClient for StubEnrichment {
    async fn send_tweet_text(&self, _payload: HashtagText) -> Result<(), ClientError> {
        Ok(())
    }

    async fn send_comment_text(&self, _payload: HashtagText) -> Result<(), ClientError> {
        Ok(())
    }

    async fn update_tweet_likes(&self, _payload: HashtagLikes) -> Result<(), ClientError> {
        Ok(())
    }

    async fn update_comment_likes(&self, _payload: HashtagLikes) -> Result<(), ClientError> {
        Ok(())
    }

    async fn tweet_ids_by_hashtag(&self, _hashtag: &str) -> Result<Vec<i64>, ClientError> {
        Ok(vec![1])
    }

    async fn comment_ids_by_hashtag(&self, _hashtag: &str) -> Result<Vec<i64>, ClientError> {
        Ok(vec![])
    }

    async fn follows(&self, _user_id: i64) -> Result<Vec<i64>, ClientError> {
        Err(ClientError::Unavailable("follow-service".to_string()))
    }
}

fn router() -> Router {
    app(AppState::new(Arc::new(MemoryStore::new()), Arc::new(StubEnrichment)))
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let router = router();
    let response = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_and_fetch_tweet() {
    let router = router();

    let (status, tweet) = send(
        &router,
        Method::POST,
        "/api/tweets",
        Some(json!({ "text": "hello #a", "authorId": 1, "pictures": [4, 2] })),
    ).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tweet["text"], json!("hello #a"));
    assert_eq!(tweet["pictures"], json!([4, 2]));
    assert_eq!(tweet["createdOn"], json!(chrono::Local::now().date_naive().to_string()));
    let id = tweet["id"].as_i64().unwrap();

    let (status, _) = send(&router, Method::POST, &format!("/api/tweets/{}/like?user=9", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, fetched) = send(&router, Method::GET, &format!("/api/tweets/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["likedBy"], json!([9]));
    assert_eq!(fetched["comments"], json!([]));
    assert_eq!(fetched["retweet"], json!(null));

    let (status, listed) = send(&router, Method::GET, "/api/tweets?user=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, tagged) = send(&router, Method::GET, "/api/tweets/tweetHashtags?hashtag=a", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tagged[0]["id"], json!(id));
}

#[tokio::test]
async fn test_error_statuses() {
    let router = router();

    let (status, body) = send(&router, Method::POST, "/api/tweets", Some(json!({ "text": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], json!(400));
    assert_eq!(body["message"], json!("Author id should not be null"));

    let (status, _) = send(&router, Method::GET, "/api/tweets", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&router, Method::GET, "/api/tweets/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("This Tweet does not exist"));

    let (status, _) = send(&router, Method::POST, "/api/tweets/77/like?user=1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, Method::GET, "/api/tweets/follows?user=1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(&router, Method::GET, "/api/tweets/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_bodies_are_bad_requests() {
    let router = router();

    let (status, body) = send(&router, Method::POST, "/api/tweets", Some(json!({ "text": "x", "authorId": "abc" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], json!(400));

    let (status, body) = send(&router, Method::POST, "/api/comments", Some(json!({ "text": "x", "tweetId": [1] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], json!(400));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/tweets")
        .body(Body::from(json!({ "text": "x", "authorId": 1 }).to_string()))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], json!(400));
}

#[tokio::test]
async fn test_comment_routes() {
    let router = router();
    let (_, tweet) = send(&router, Method::POST, "/api/tweets", Some(json!({ "text": "t", "authorId": 1 }))).await;
    let tweet_id = tweet["id"].as_i64().unwrap();

    let (status, comment) = send(
        &router,
        Method::POST,
        "/api/comments/",
        Some(json!({ "text": "first", "authorId": 2, "tweetId": tweet_id })),
    ).await;
    assert_eq!(status, StatusCode::CREATED);
    let comment_id = comment["id"].as_i64().unwrap();

    let (status, _) = send(
        &router,
        Method::POST,
        "/api/comments",
        Some(json!({ "text": "second", "authorId": 3, "tweetId": tweet_id })),
    ).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&router, Method::POST, &format!("/api/comments/{}/like?user=5", comment_id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, comments) = send(&router, Method::GET, &format!("/api/comments?tweet={}", tweet_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comments.as_array().unwrap().len(), 2);
    assert_eq!(comments[0]["likedBy"], json!([5]));

    let (status, found) = send(&router, Method::GET, "/api/tweets/search/comment?word=FIRST", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found[0]["id"], json!(tweet_id));

    let (status, _) = send(&router, Method::DELETE, &format!("/api/comments/{}/like?user=5", comment_id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&router, Method::DELETE, &format!("/api/comments/{}", comment_id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&router, Method::POST, "/api/comments/999/like?user=5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_routes() {
    let router = router();
    for text in ["a", "b"] {
        send(&router, Method::POST, "/api/tweets", Some(json!({ "text": text, "authorId": 4 }))).await;
    }

    let (status, _) = send(&router, Method::POST, "/api/tweets/1/pictures?picture=12", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&router, Method::DELETE, "/api/tweets/1", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&router, Method::GET, "/api/tweets/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, Method::DELETE, "/api/tweets/all?user=4", None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, listed) = send(&router, Method::GET, "/api/tweets?user=4", None).await;
    assert_eq!(listed, json!([]));
}
