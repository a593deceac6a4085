//! Access control API: CRUD over users, buildings, access points and access logs.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use app::{build_router, build_state, connect_postgres};
pub use config::{Config, StoreBackend};
pub use error::{AppError, ConfigError, StartupError, StoreError};
pub use migration::apply_migrations;
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Repository, Store};
