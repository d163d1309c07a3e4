//! Common test utilities
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tower::util::ServiceExt;

use restaurant_reviews::aggregate::Restaurant;
use restaurant_reviews::api::{self, AppState};
use restaurant_reviews::store::{InMemoryRestaurantStore, RestaurantStore};

/// Router over a fresh in-memory store, plus the store for seeding
pub fn setup_app() -> (Router, Arc<InMemoryRestaurantStore>) {
    let store = Arc::new(InMemoryRestaurantStore::new());
    let state = AppState::new(store.clone());
    (api::build_router(state), store)
}

/// Build a request, optionally as `user_id` and with a JSON body
pub fn request(method: &str, uri: &str, user_id: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(user_id) = user_id {
        builder = builder
            .header("X-User-Id", user_id)
            .header("X-Username", format!("{}-name", user_id))
            .header("X-Given-Name", "Test")
            .header("X-Family-Name", "User");
    }

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send a request and decode the body; `Value::Null` when empty
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, body)
}

/// Create a restaurant through the API and return its id
pub async fn create_restaurant(app: &Router, name: &str) -> String {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/api/restaurants",
            Some("owner"),
            Some(json!({"name": name, "cuisineType": "Italian"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Restaurant creation failed: {}", body);

    body["id"].as_str().unwrap().to_string()
}

/// Post a review through the API and return its id
pub async fn create_review(app: &Router, restaurant_id: &str, user_id: &str, rating: i64) -> String {
    let (status, body) = send(
        app,
        request(
            "POST",
            &format!("/api/restaurants/{}/reviews", restaurant_id),
            Some(user_id),
            Some(json!({"content": format!("Review by {}", user_id), "rating": rating})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Review creation failed: {}", body);

    body["id"].as_str().unwrap().to_string()
}

/// Store a restaurant document holding one review posted at `posted_at`
pub async fn seed_review_posted_at(
    store: &InMemoryRestaurantStore,
    restaurant_id: &str,
    review_id: &str,
    author_id: &str,
    posted_at: DateTime<Utc>,
) {
    let restaurant: Restaurant = serde_json::from_value(json!({
        "id": restaurant_id,
        "name": "Seeded",
        "reviews": [{
            "id": review_id,
            "content": "Seeded review",
            "rating": 2,
            "photos": [],
            "datePosted": posted_at,
            "lastEdited": posted_at,
            "writtenBy": {"id": author_id, "username": "seed"}
        }],
        "averageRating": 2.0
    }))
    .unwrap();

    store.save(restaurant).await.unwrap();
}
