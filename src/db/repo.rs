use async_trait::async_trait;

use crate::models::Recommendation;

pub type DbResult<T> = Result<T, sqlx::Error>;

/// Read access to ratings and precomputed recommendations
///
/// Implementations report storage failures as-is. Deciding what a failed
/// lookup means for the caller is left to the service layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationRepo: Send + Sync {
    /// Whether the user has at least one rating
    async fn user_exists(&self, user_id: i64) -> DbResult<bool>;

    /// Up to `limit` recommendations for the user, highest predicted rating first
    async fn top_recommendations(&self, user_id: i64, limit: i64)
        -> DbResult<Vec<Recommendation>>;

    /// Round-trip to the store, used by the health check
    async fn ping(&self) -> DbResult<()>;
}
