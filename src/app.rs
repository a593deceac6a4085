//! Router assembly and store construction.

use crate::config::{Config, StoreBackend};
use crate::error::{ConfigError, StartupError, StoreError};
use crate::migration::apply_migrations;
use crate::routes::{api_routes, common_routes};
use crate::state::AppState;
use crate::store::{ensure_database_exists, MemoryStore, PgStore};
use axum::{extract::DefaultBodyLimit, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Full application: operational routes, `/api` resources, CORS from any origin, request tracing, body limit.
pub fn build_router(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes())
        .merge(api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .with_state(state)
}

/// Open a pool on an existing database, creating the database first if needed, and bring the schema up to date.
pub async fn connect_postgres(database_url: &str, max_connections: u32) -> Result<PgStore, StoreError> {
    ensure_database_exists(database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    apply_migrations(&pool).await?;
    Ok(PgStore::new(pool))
}

/// Application state over the configured backend.
pub async fn build_state(config: &Config) -> Result<AppState, StartupError> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Ok(AppState::new(Arc::new(MemoryStore::new())))
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;
            let store = connect_postgres(url, config.db_max_connections).await?;
            Ok(AppState::new(Arc::new(store)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(store_backend: StoreBackend, database_url: Option<&str>) -> Config {
        Config {
            database_url: database_url.map(String::from),
            store_backend,
            bind_address: "127.0.0.1:0".into(),
            db_max_connections: 1,
            body_limit_bytes: 1024,
            log_filter: "off".into(),
        }
    }

    #[tokio::test]
    async fn memory_backend_builds_without_database() {
        assert!(build_state(&config(StoreBackend::Memory, None)).await.is_ok());
    }

    #[tokio::test]
    async fn postgres_backend_without_url_is_a_config_error() {
        let result = build_state(&config(StoreBackend::Postgres, None)).await;
        assert!(matches!(
            result,
            Err(StartupError::Config(ConfigError::Missing("DATABASE_URL")))
        ));
    }
}
