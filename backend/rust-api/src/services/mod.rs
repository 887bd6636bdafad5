use crate::config::Config;
use crate::db;
use sqlx::SqlitePool;

pub struct AppState {
    pub config: Config,
    pub db: SqlitePool,
}

impl AppState {
    /// Opens the database, ensures the schema and seeds the question catalog.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let db = db::connect(&config).await?;
        db::create_schema(&db).await?;

        // Seeding problems must not keep the server from starting
        match question_seed::seed_questions(&db).await {
            Ok(0) => tracing::info!("Question catalog already seeded"),
            Ok(inserted) => tracing::info!("Seeded {} questions", inserted),
            Err(e) => tracing::warn!("Failed to seed questions: {}", e),
        }

        Ok(Self { config, db })
    }
}

pub mod error;
pub mod interaction_service;
pub mod player_service;
pub mod question_seed;
pub mod question_service;

pub use error::{ServiceError, ServiceResult};
