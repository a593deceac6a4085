//! Persistence gateway: one repository contract per entity, with PostgreSQL and in-memory back-ends.

mod bootstrap;
mod memory;
mod postgres;

pub use bootstrap::ensure_database_exists;
pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::StoreError;
use crate::model::{AccessLog, AccessPoint, Building, Entity, User, UserWithAccessLogs, UserWithBuildings};
use async_trait::async_trait;

/// CRUD over one entity type.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Insert a record. The id is generated when the payload carries none.
    async fn create(&self, data: E::Create) -> Result<E, StoreError>;

    /// All records in insertion order. Empty when there are none.
    async fn get_all(&self) -> Result<Vec<E>, StoreError>;

    /// The record with this id, or `None`. Never fails for a missing id.
    async fn get_by_id(&self, id: &str) -> Result<Option<E>, StoreError>;

    /// Merge the supplied fields into the record. Fails with `NotFound` when the id is absent.
    async fn update(&self, id: &str, data: E::Patch) -> Result<E, StoreError>;

    /// Remove the record and return it. Fails with `NotFound` when the id is absent.
    async fn delete(&self, id: &str) -> Result<E, StoreError>;
}

/// Reads of a user together with related records.
#[async_trait]
pub trait UserRelations: Send + Sync {
    async fn get_buildings(&self, user_id: &str) -> Result<Option<UserWithBuildings>, StoreError>;

    async fn get_access_logs(&self, user_id: &str) -> Result<Option<UserWithAccessLogs>, StoreError>;
}

/// Store reachability check used by readiness.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}

/// A complete back-end: every repository plus relations and probe.
pub trait Store:
    Repository<User>
    + Repository<Building>
    + Repository<AccessPoint>
    + Repository<AccessLog>
    + UserRelations
    + Probe
    + 'static
{
}

impl<T> Store for T where
    T: Repository<User>
        + Repository<Building>
        + Repository<AccessPoint>
        + Repository<AccessLog>
        + UserRelations
        + Probe
        + 'static
{
}

/// Serialize a create/patch payload into a field map; absent fields are skipped by the payload types.
pub(crate) fn payload_fields<T: serde::Serialize>(payload: &T) -> Result<serde_json::Map<String, serde_json::Value>, StoreError> {
    match serde_json::to_value(payload) {
        Ok(serde_json::Value::Object(m)) => Ok(m),
        Ok(_) => Err(StoreError::ValidationFailed("payload must be an object".into())),
        Err(e) => Err(StoreError::ValidationFailed(e.to_string())),
    }
}

/// Id from the payload, or a fresh UUID v4.
pub(crate) fn id_or_generate(fields: &serde_json::Map<String, serde_json::Value>) -> Result<String, StoreError> {
    match fields.get("id") {
        None | Some(serde_json::Value::Null) => Ok(uuid::Uuid::new_v4().to_string()),
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(StoreError::ValidationFailed(format!("id must be a string, got {}", other))),
    }
}

/// Decode a JSON row into a typed record.
pub(crate) fn from_row<E: Entity>(row: serde_json::Value) -> Result<E, StoreError> {
    serde_json::from_value(row)
        .map_err(|e| StoreError::ValidationFailed(format!("{} row: {}", E::DEF.table, e)))
}
