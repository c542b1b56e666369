use std::net::SocketAddr;

use anyhow::Context;
use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// SQLite database URL (`sqlite://path/to/file.db` or `sqlite::memory:`)
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Maximum number of pooled database connections
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    /// Create the ratings and recommendations tables on startup if they are missing
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on the number of recommendations a single request may return.
    /// Requests asking for more are clamped. Unset means unbounded.
    #[serde(default)]
    pub max_recommendations: Option<i64>,

    /// Report storage failures during the user lookup as 500 instead of 404
    #[serde(default)]
    pub strict_user_lookup: bool,
}

fn default_database_url() -> String {
    "sqlite://data/recommendations.db".to_string()
}

fn default_db_max_connections() -> u32 {
    5
}

fn default_run_migrations() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().context("Failed to load config")
    }

    /// Socket address the HTTP server binds to
    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        envy::from_iter(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]);

        assert_eq!(config.database_url, "sqlite://data/recommendations.db");
        assert_eq!(config.db_max_connections, 5);
        assert!(config.run_migrations);
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_recommendations, None);
        assert!(!config.strict_user_lookup);
        assert_eq!(config.listen_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("PORT", "9000"),
            ("HOST", "127.0.0.1"),
            ("MAX_RECOMMENDATIONS", "25"),
            ("STRICT_USER_LOOKUP", "true"),
            ("RUN_MIGRATIONS", "false"),
        ]);

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_recommendations, Some(25));
        assert!(config.strict_user_lookup);
        assert!(!config.run_migrations);
        assert_eq!(config.listen_addr().unwrap().to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let config = from_pairs(&[("HOST", "not a host")]);
        assert!(config.listen_addr().is_err());
    }
}
