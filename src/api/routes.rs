//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::Restaurant;
use crate::domain::{Author, OperationContext, Page, PageRequest, Review, ReviewDraft, Sort};
use crate::error::AppError;
use crate::handlers::{
    CreateRestaurantCommand, CreateRestaurantHandler, CreateReviewCommand, CreateReviewHandler,
    DeleteReviewCommand, DeleteReviewHandler, ReviewQueries, UpdateReviewCommand,
    UpdateReviewHandler,
};

use super::extract::{ApiJson, ApiQuery};
use super::middleware::USER_ID_HEADER;
use super::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cuisine_type: Option<String>,
    #[serde(default)]
    pub contact_information: Option<String>,
    #[serde(default)]
    pub address: Option<Value>,
    #[serde(default)]
    pub operating_hours: Option<Value>,
    #[serde(default)]
    pub photo_ids: Vec<String>,
}

impl From<CreateRestaurantRequest> for CreateRestaurantCommand {
    fn from(request: CreateRestaurantRequest) -> Self {
        Self {
            name: request.name,
            cuisine_type: request.cuisine_type,
            contact_information: request.contact_information,
            address: request.address,
            operating_hours: request.operating_hours,
            photo_ids: request.photo_ids,
        }
    }
}

/// `?page=0&size=20&sort=rating,asc`
#[derive(Debug, Default, Deserialize)]
pub struct ListReviewsQuery {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub size: Option<usize>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl ListReviewsQuery {
    /// Resolve defaults and clamp `size` into `1..=max_size`
    pub fn into_page_request(self, default_size: usize, max_size: usize) -> PageRequest {
        let max_size = max_size.max(1);
        let size = self.size.unwrap_or(default_size).clamp(1, max_size);
        let sort = self.sort.as_deref().map(Sort::parse).unwrap_or_default();

        PageRequest::new(self.page.unwrap_or(0), size).with_sort(sort)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        let total_pages = page.total_pages();
        Self {
            content: page.content,
            page: page.page,
            size: page.size,
            total_elements: page.total,
            total_pages,
        }
    }
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", post(create_restaurant))
        .route("/restaurants/:restaurant_id", get(get_restaurant))
        .route(
            "/restaurants/:restaurant_id/reviews",
            post(create_review).get(list_reviews),
        )
        .route(
            "/restaurants/:restaurant_id/reviews/:review_id",
            get(get_review).put(update_review).delete(delete_review),
        )
}

/// The caller's identity, or `401 missing_identity`
fn require_identity(identity: Option<Extension<Author>>) -> Result<Author, AppError> {
    identity
        .map(|Extension(author)| author)
        .ok_or(AppError::MissingIdentity(USER_ID_HEADER))
}

// =========================================================================
// POST /restaurants
// =========================================================================

/// Register a restaurant
async fn create_restaurant(
    State(state): State<AppState>,
    identity: Option<Extension<Author>>,
    Extension(context): Extension<OperationContext>,
    ApiJson(request): ApiJson<CreateRestaurantRequest>,
) -> Result<(StatusCode, Json<Restaurant>), AppError> {
    require_identity(identity)?;

    let handler = CreateRestaurantHandler::new(state.store);
    let restaurant = handler.execute(request.into(), &context).await?;

    Ok((StatusCode::CREATED, Json(restaurant)))
}

// =========================================================================
// GET /restaurants/:restaurant_id
// =========================================================================

/// Get a restaurant with its reviews and rating
async fn get_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
) -> Result<Json<Restaurant>, AppError> {
    let restaurant = ReviewQueries::new(state.store)
        .get_restaurant(&restaurant_id)
        .await?;

    Ok(Json(restaurant))
}

// =========================================================================
// POST /restaurants/:restaurant_id/reviews
// =========================================================================

/// Post a review as the calling user
async fn create_review(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
    identity: Option<Extension<Author>>,
    Extension(context): Extension<OperationContext>,
    ApiJson(draft): ApiJson<ReviewDraft>,
) -> Result<Json<Review>, AppError> {
    let author = require_identity(identity)?;
    let request = draft.validate()?;

    let handler = CreateReviewHandler::new(state.store);
    let review = handler
        .execute(CreateReviewCommand::new(restaurant_id, author, request), &context)
        .await?;

    Ok(Json(review))
}

// =========================================================================
// GET /restaurants/:restaurant_id/reviews
// =========================================================================

/// One page of a restaurant's reviews
async fn list_reviews(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
    ApiQuery(query): ApiQuery<ListReviewsQuery>,
) -> Result<Json<PageResponse<Review>>, AppError> {
    let page_request = query.into_page_request(state.default_page_size, state.max_page_size);

    let page = ReviewQueries::new(state.store)
        .list_reviews(&restaurant_id, &page_request)
        .await?;

    Ok(Json(page.into()))
}

// =========================================================================
// GET /restaurants/:restaurant_id/reviews/:review_id
// =========================================================================

/// A single review; 204 when the restaurant has no such review
async fn get_review(
    State(state): State<AppState>,
    Path((restaurant_id, review_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let review = ReviewQueries::new(state.store)
        .get_restaurant_review(&restaurant_id, &review_id)
        .await?;

    Ok(match review {
        Some(review) => Json(review).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

// =========================================================================
// PUT /restaurants/:restaurant_id/reviews/:review_id
// =========================================================================

/// Edit the caller's own review
async fn update_review(
    State(state): State<AppState>,
    Path((restaurant_id, review_id)): Path<(String, String)>,
    identity: Option<Extension<Author>>,
    Extension(context): Extension<OperationContext>,
    ApiJson(draft): ApiJson<ReviewDraft>,
) -> Result<Json<Review>, AppError> {
    let user = require_identity(identity)?;
    let request = draft.validate()?;

    let handler = UpdateReviewHandler::new(state.store);
    let review = handler
        .execute(
            UpdateReviewCommand::new(restaurant_id, review_id, user, request),
            &context,
        )
        .await?;

    Ok(Json(review))
}

// =========================================================================
// DELETE /restaurants/:restaurant_id/reviews/:review_id
// =========================================================================

/// Remove a review
async fn delete_review(
    State(state): State<AppState>,
    Path((restaurant_id, review_id)): Path<(String, String)>,
    identity: Option<Extension<Author>>,
    Extension(context): Extension<OperationContext>,
) -> Result<StatusCode, AppError> {
    require_identity(identity)?;

    let handler = DeleteReviewHandler::new(state.store);
    handler
        .execute(DeleteReviewCommand::new(restaurant_id, review_id), &context)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
