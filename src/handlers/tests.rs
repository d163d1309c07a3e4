//! Handler tests
//!
//! Run against the in-memory store; no database required.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use serde_json::json;

    use crate::aggregate::Restaurant;
    use crate::domain::{
        Author, DomainError, OperationContext, PageRequest, ReviewDraft, ReviewNotAllowedReason,
        Sort,
    };
    use crate::error::AppError;
    use crate::handlers::{
        CreateRestaurantCommand, CreateRestaurantHandler, CreateReviewCommand,
        CreateReviewHandler, DeleteReviewCommand, DeleteReviewHandler, ReviewQueries,
        UpdateReviewCommand, UpdateReviewHandler,
    };
    use crate::store::{InMemoryRestaurantStore, RestaurantStore, StoreError};

    // =========================================================================
    // Fixtures
    // =========================================================================

    fn memory_store() -> Arc<dyn RestaurantStore> {
        Arc::new(InMemoryRestaurantStore::new())
    }

    fn context() -> OperationContext {
        OperationContext::new().with_correlation_id(uuid::Uuid::new_v4())
    }

    fn author(id: &str) -> Author {
        Author::new(id)
            .with_username(format!("{}-name", id))
            .with_name("Given", "Family")
    }

    fn draft(content: &str, rating: i64) -> crate::domain::ReviewRequest {
        ReviewDraft::new(content, rating).validate().unwrap()
    }

    /// Store a restaurant whose only review was posted at `posted_at`
    async fn seed_with_review(
        store: &Arc<dyn RestaurantStore>,
        author_id: &str,
        rating: u8,
        posted_at: DateTime<Utc>,
    ) -> (String, String) {
        let restaurant: Restaurant = serde_json::from_value(json!({
            "id": "rest-seeded",
            "name": "Seeded Diner",
            "cuisineType": "Diner",
            "reviews": [{
                "id": "review-seeded",
                "content": "Seeded review",
                "rating": rating,
                "photos": [{"url": "old.jpg", "uploadDate": posted_at}],
                "datePosted": posted_at,
                "lastEdited": posted_at,
                "writtenBy": {"id": author_id, "username": "seed"}
            }],
            "averageRating": rating as f64
        }))
        .unwrap();

        store.save(restaurant).await.unwrap();
        ("rest-seeded".to_string(), "review-seeded".to_string())
    }

    async fn create_restaurant(store: &Arc<dyn RestaurantStore>) -> String {
        let handler = CreateRestaurantHandler::new(store.clone());
        let restaurant = handler
            .execute(
                CreateRestaurantCommand::new("Trattoria").with_cuisine_type("Italian"),
                &context(),
            )
            .await
            .unwrap();
        restaurant.id().to_string()
    }

    async fn create_review(
        store: &Arc<dyn RestaurantStore>,
        restaurant_id: &str,
        author_id: &str,
        rating: i64,
    ) -> Result<crate::domain::Review, AppError> {
        CreateReviewHandler::new(store.clone())
            .execute(
                CreateReviewCommand::new(restaurant_id, author(author_id), draft("text", rating)),
                &context(),
            )
            .await
    }

    async fn average_rating(store: &Arc<dyn RestaurantStore>, restaurant_id: &str) -> f64 {
        ReviewQueries::new(store.clone())
            .get_restaurant(restaurant_id)
            .await
            .unwrap()
            .average_rating()
    }

    // =========================================================================
    // Store doubles
    // =========================================================================

    /// Store whose every call fails at the I/O layer
    struct BrokenStore;

    #[async_trait]
    impl RestaurantStore for BrokenStore {
        async fn find_by_id(&self, _: &str) -> Result<Option<Restaurant>, StoreError> {
            Err(serde_json::from_str::<serde_json::Value>("not json")
                .unwrap_err()
                .into())
        }

        async fn save(&self, _: Restaurant) -> Result<Restaurant, StoreError> {
            unreachable!("load always fails first")
        }
    }

    /// Store where another writer commits right after every load
    struct RacingStore {
        inner: InMemoryRestaurantStore,
    }

    #[async_trait]
    impl RestaurantStore for RacingStore {
        async fn find_by_id(&self, restaurant_id: &str) -> Result<Option<Restaurant>, StoreError> {
            let loaded = self.inner.find_by_id(restaurant_id).await?;
            if let Some(restaurant) = &loaded {
                self.inner.save(restaurant.clone()).await?;
            }
            Ok(loaded)
        }

        async fn save(&self, restaurant: Restaurant) -> Result<Restaurant, StoreError> {
            self.inner.save(restaurant).await
        }
    }

    // =========================================================================
    // Create
    // =========================================================================

    #[tokio::test]
    async fn test_create_review_persists_and_returns_review() {
        let store = memory_store();
        let restaurant_id = create_restaurant(&store).await;

        let review = create_review(&store, &restaurant_id, "user-1", 4).await.unwrap();

        assert_eq!(review.rating, 4);
        assert_eq!(review.written_by, author("user-1"));
        assert_eq!(review.date_posted, review.last_edited);

        let stored = ReviewQueries::new(store.clone())
            .get_restaurant_review(&restaurant_id, &review.id)
            .await
            .unwrap();
        assert_eq!(stored, Some(review));
        assert_eq!(average_rating(&store, &restaurant_id).await, 4.0);
    }

    #[tokio::test]
    async fn test_create_review_unknown_restaurant() {
        let store = memory_store();
        let result = create_review(&store, "missing", "user-1", 4).await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::RestaurantNotFound(id))) if id == "missing"
        ));
    }

    #[tokio::test]
    async fn test_second_review_scenario() {
        let store = memory_store();
        let (restaurant_id, _) = seed_with_review(&store, "user-1", 5, Utc::now()).await;

        create_review(&store, &restaurant_id, "user-2", 3).await.unwrap();
        assert_eq!(average_rating(&store, &restaurant_id).await, 4.0);

        let again = create_review(&store, &restaurant_id, "user-2", 1).await;
        assert!(matches!(
            again,
            Err(AppError::Domain(DomainError::ReviewNotAllowed(
                ReviewNotAllowedReason::AlreadyReviewed
            )))
        ));
        assert_eq!(average_rating(&store, &restaurant_id).await, 4.0);
    }

    #[tokio::test]
    async fn test_concurrent_modification_is_reported() {
        let store: Arc<dyn RestaurantStore> = Arc::new(RacingStore {
            inner: InMemoryRestaurantStore::new(),
        });
        let (restaurant_id, _) = seed_with_review(&store, "user-1", 5, Utc::now()).await;

        let result = create_review(&store, &restaurant_id, "user-2", 3).await;

        match result {
            Err(AppError::Store(err)) => assert!(err.is_version_conflict()),
            other => panic!("Expected version conflict, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let store: Arc<dyn RestaurantStore> = Arc::new(BrokenStore);
        let result = create_review(&store, "rest-1", "user-1", 3).await;

        assert!(matches!(result, Err(AppError::Store(StoreError::Serialization(_)))));
    }

    // =========================================================================
    // Update
    // =========================================================================

    #[tokio::test]
    async fn test_update_inside_edit_window() {
        let store = memory_store();
        let posted = Utc::now() - Duration::hours(47) - Duration::minutes(59);
        let (restaurant_id, review_id) = seed_with_review(&store, "user-1", 2, posted).await;

        let request = ReviewDraft::new("Changed my mind", 5)
            .with_photo_ids(vec!["new.jpg".to_string()])
            .validate()
            .unwrap();
        let review = UpdateReviewHandler::new(store.clone())
            .execute(
                UpdateReviewCommand::new(&restaurant_id, &review_id, author("user-1"), request),
                &context(),
            )
            .await
            .unwrap();

        assert_eq!(review.content, "Changed my mind");
        assert_eq!(review.rating, 5);
        assert_eq!(review.date_posted, posted);
        assert!(review.last_edited > posted);
        assert_eq!(review.photos.len(), 1);
        assert_eq!(review.photos[0].url, "new.jpg");
        assert_eq!(review.photos[0].upload_date, review.last_edited);
        assert_eq!(average_rating(&store, &restaurant_id).await, 5.0);
    }

    #[tokio::test]
    async fn test_update_after_edit_window() {
        let store = memory_store();
        let posted = Utc::now() - Duration::hours(48) - Duration::minutes(1);
        let (restaurant_id, review_id) = seed_with_review(&store, "user-1", 2, posted).await;

        let result = UpdateReviewHandler::new(store.clone())
            .execute(
                UpdateReviewCommand::new(&restaurant_id, &review_id, author("user-1"), draft("x", 5)),
                &context(),
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::ReviewNotAllowed(
                ReviewNotAllowedReason::EditWindowExpired
            )))
        ));
        assert_eq!(average_rating(&store, &restaurant_id).await, 2.0);
    }

    #[tokio::test]
    async fn test_update_by_non_author_is_review_not_found() {
        let store = memory_store();
        let (restaurant_id, review_id) = seed_with_review(&store, "user-1", 2, Utc::now()).await;

        let result = UpdateReviewHandler::new(store.clone())
            .execute(
                UpdateReviewCommand::new(&restaurant_id, &review_id, author("user-2"), draft("x", 5)),
                &context(),
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::ReviewNotFound(_)))
        ));
    }

    // =========================================================================
    // Delete
    // =========================================================================

    #[tokio::test]
    async fn test_delete_review_recomputes_rating() {
        let store = memory_store();
        let (restaurant_id, seeded_id) = seed_with_review(&store, "user-1", 5, Utc::now()).await;
        create_review(&store, &restaurant_id, "user-2", 2).await.unwrap();

        DeleteReviewHandler::new(store.clone())
            .execute(DeleteReviewCommand::new(&restaurant_id, &seeded_id), &context())
            .await
            .unwrap();

        assert_eq!(average_rating(&store, &restaurant_id).await, 2.0);
        let gone = ReviewQueries::new(store.clone())
            .get_restaurant_review(&restaurant_id, &seeded_id)
            .await
            .unwrap();
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_review_is_noop() {
        let store = memory_store();
        let (restaurant_id, _) = seed_with_review(&store, "user-1", 3, Utc::now()).await;
        let queries = ReviewQueries::new(store.clone());
        let before = queries.get_restaurant(&restaurant_id).await.unwrap();

        DeleteReviewHandler::new(store.clone())
            .execute(DeleteReviewCommand::new(&restaurant_id, "missing"), &context())
            .await
            .unwrap();

        let after = queries.get_restaurant(&restaurant_id).await.unwrap();
        assert_eq!(after.reviews(), before.reviews());
        assert_eq!(after.average_rating(), before.average_rating());
    }

    #[tokio::test]
    async fn test_delete_on_unknown_restaurant() {
        let store = memory_store();
        let result = DeleteReviewHandler::new(store.clone())
            .execute(DeleteReviewCommand::new("missing", "review"), &context())
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::RestaurantNotFound(_)))
        ));
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[tokio::test]
    async fn test_get_unknown_review_is_absent() {
        let store = memory_store();
        let restaurant_id = create_restaurant(&store).await;

        let review = ReviewQueries::new(store.clone())
            .get_restaurant_review(&restaurant_id, "nope")
            .await
            .unwrap();

        assert!(review.is_none());
    }

    #[tokio::test]
    async fn test_list_reviews_pages_and_sorts() {
        let store = memory_store();
        let restaurant_id = create_restaurant(&store).await;
        for (idx, rating) in [3, 1, 5, 2, 4].into_iter().enumerate() {
            create_review(&store, &restaurant_id, &format!("user-{}", idx), rating)
                .await
                .unwrap();
        }
        let queries = ReviewQueries::new(store.clone());

        let by_rating = queries
            .list_reviews(
                &restaurant_id,
                &PageRequest::new(0, 2).with_sort(Sort::parse("rating,asc")),
            )
            .await
            .unwrap();
        let ratings: Vec<u8> = by_rating.content.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![1, 2]);
        assert_eq!(by_rating.total, 5);

        let past_end = queries
            .list_reviews(&restaurant_id, &PageRequest::new(3, 2))
            .await
            .unwrap();
        assert!(past_end.content.is_empty());
        assert_eq!(past_end.total, 5);
    }

    #[tokio::test]
    async fn test_list_reviews_unknown_restaurant() {
        let store = memory_store();
        let result = ReviewQueries::new(store)
            .list_reviews("missing", &PageRequest::default())
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::RestaurantNotFound(_)))
        ));
    }

    // =========================================================================
    // Restaurants
    // =========================================================================

    #[tokio::test]
    async fn test_create_restaurant_requires_name() {
        let store = memory_store();
        let result = CreateRestaurantHandler::new(store)
            .execute(CreateRestaurantCommand::new("  "), &context())
            .await;

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn test_create_restaurant_starts_empty() {
        let store = memory_store();
        let restaurant_id = create_restaurant(&store).await;
        let restaurant = ReviewQueries::new(store)
            .get_restaurant(&restaurant_id)
            .await
            .unwrap();

        assert_eq!(restaurant.name(), "Trattoria");
        assert_eq!(restaurant.details()["cuisineType"], "Italian");
        assert!(restaurant.reviews().is_empty());
        assert_eq!(restaurant.average_rating(), 0.0);
        assert_eq!(restaurant.version(), 1);
    }
}
