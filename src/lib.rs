pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use sqlx::PgPool;

use services::snapshot_cache::SnapshotCache;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: config::AppConfig,
    pub dashboard_cache: Arc<SnapshotCache>,
}

impl AppState {
    pub fn new(db: PgPool, config: config::AppConfig) -> Self {
        Self {
            db,
            config,
            dashboard_cache: Arc::new(SnapshotCache::new()),
        }
    }
}
