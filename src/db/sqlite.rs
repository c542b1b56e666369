use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::repo::{DbResult, RecommendationRepo};
use crate::config::Config;
use crate::models::Recommendation;

/// Creates a SQLite connection pool
///
/// File databases are created if they do not exist yet, so a fresh deployment
/// can start before the offline job has written any recommendations.
pub async fn create_pool(config: &Config) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(options)
        .await?;

    tracing::info!(database_url = %config.database_url, "Database pool ready");

    Ok(pool)
}

/// Applies the bundled schema migrations
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// `RecommendationRepo` backed by the `ratings` and `recommendations` tables
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecommendationRepo for SqliteRepository {
    async fn user_exists(&self, user_id: i64) -> DbResult<bool> {
        let exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM ratings WHERE userId = ? LIMIT 1)")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists != 0)
    }

    async fn top_recommendations(
        &self,
        user_id: i64,
        limit: i64,
    ) -> DbResult<Vec<Recommendation>> {
        sqlx::query_as::<_, Recommendation>(
            "SELECT movieId AS movie_id, predicted_rating
             FROM recommendations
             WHERE userId = ?
             ORDER BY predicted_rating DESC
             LIMIT ?",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
