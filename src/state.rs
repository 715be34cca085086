//! Application state for staff-hub

use std::path::PathBuf;

use sqlx::PgPool;

use crate::config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Secret for signing session cookies
    pub jwt_secret: String,
    /// Root directory for uploaded files
    pub media_dir: PathBuf,
}

impl AppState {
    /// Create a new AppState
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let media_dir = PathBuf::from(&config.media_dir);
        tokio::fs::create_dir_all(media_dir.join("profile_photos")).await?;

        Ok(Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            media_dir,
        })
    }
}
