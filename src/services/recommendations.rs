use std::sync::Arc;

use crate::{
    config::Config,
    db::RecommendationRepo,
    error::{AppError, AppResult},
    models::Recommendation,
};

pub const USER_NOT_FOUND: &str = "User not found";

/// How lookups behave at the edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupPolicy {
    /// Clamp requested counts to this value, if set
    pub max_recommendations: Option<i64>,
    /// Surface storage errors from the user lookup instead of treating the user as missing
    pub strict_user_lookup: bool,
}

impl From<&Config> for LookupPolicy {
    fn from(config: &Config) -> Self {
        Self {
            max_recommendations: config.max_recommendations,
            strict_user_lookup: config.strict_user_lookup,
        }
    }
}

impl LookupPolicy {
    fn effective_limit(&self, requested: i64) -> i64 {
        match self.max_recommendations {
            // A negative LIMIT means "no limit" to SQLite
            Some(max) => requested.min(max.max(0)),
            None => requested,
        }
    }
}

/// Serves top-N precomputed recommendations for users who have rated something
pub struct RecommendationService {
    repo: Arc<dyn RecommendationRepo>,
    policy: LookupPolicy,
}

impl RecommendationService {
    pub fn new(repo: Arc<dyn RecommendationRepo>, policy: LookupPolicy) -> Self {
        Self { repo, policy }
    }

    /// Returns up to `n` recommendations for `user_id`, best first
    ///
    /// Fails with `NotFound` when the user has no ratings. The list may be
    /// empty for a known user.
    pub async fn recommend(&self, user_id: i64, n: i64) -> AppResult<Vec<Recommendation>> {
        if !self.user_exists(user_id).await? {
            return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
        }

        let limit = self.policy.effective_limit(n);
        if limit < n {
            tracing::debug!(user_id, requested = n, limit, "Clamped recommendation count");
        }

        let recommendations = self
            .repo
            .top_recommendations(user_id, limit)
            .await
            .map_err(|e| {
                tracing::error!(user_id, error = %e, "Recommendation query failed");
                AppError::Database(e)
            })?;

        Ok(recommendations)
    }

    async fn user_exists(&self, user_id: i64) -> AppResult<bool> {
        match self.repo.user_exists(user_id).await {
            Ok(exists) => Ok(exists),
            Err(e) if self.policy.strict_user_lookup => {
                tracing::error!(user_id, error = %e, "User lookup failed");
                Err(AppError::Database(e))
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "User lookup failed, treating user as missing");
                Ok(false)
            }
        }
    }
}
