//! Application state - shared across all handlers.

use blogicum_core::BlogService;
use blogicum_core::service::Repositories;
use blogicum_infra::InMemoryStore;
use blogicum_infra::database::DatabaseConfig;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: BlogService,
    /// Storage backend name reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let state = match connect(config.database.as_ref()).await {
            Some(repos) => Self {
                blog: BlogService::new(repos, config.posts_per_page),
                storage: "postgres",
            },
            None => Self::in_memory(config.posts_per_page),
        };

        tracing::info!(storage = state.storage, "Application state initialized");
        state
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(posts_per_page: u64) -> Self {
        Self {
            blog: BlogService::new(InMemoryStore::new().repositories(), posts_per_page),
            storage: "in-memory",
        }
    }
}

#[cfg(feature = "postgres")]
async fn connect(config: Option<&DatabaseConfig>) -> Option<Repositories> {
    use std::sync::Arc;

    use blogicum_infra::database::{
        DatabaseConnections, PostgresCategoryRepository, PostgresCommentRepository,
        PostgresLocationRepository, PostgresPostRepository, PostgresUserRepository,
    };

    let Some(config) = config else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return None;
    };

    match DatabaseConnections::init(config).await {
        Ok(connections) => {
            let db = connections.main;
            Some(Repositories {
                users: Arc::new(PostgresUserRepository::new(db.clone())),
                categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
                locations: Arc::new(PostgresLocationRepository::new(db.clone())),
                posts: Arc::new(PostgresPostRepository::new(db.clone())),
                comments: Arc::new(PostgresCommentRepository::new(db)),
            })
        }
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            None
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn connect(_config: Option<&DatabaseConfig>) -> Option<Repositories> {
    tracing::info!("Running without postgres feature - using in-memory repositories");
    None
}
