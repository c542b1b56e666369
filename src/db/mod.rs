pub mod repo;
pub mod sqlite;

pub use repo::{DbResult, RecommendationRepo};
pub use sqlite::{create_pool, run_migrations, SqliteRepository};
