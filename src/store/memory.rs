//! In-memory gateway. Keeps rows as JSON objects per table and enforces the same
//! required-column, allowed-value, unique-id and foreign-key rules the PostgreSQL schema does.

use super::{from_row, id_or_generate, payload_fields, Probe, Repository, UserRelations};
use crate::error::StoreError;
use crate::model::{
    AccessLog, AccessPoint, Building, ColumnKind, Entity, EntityDef, User, UserWithAccessLogs, UserWithBuildings,
    ALL_ENTITIES,
};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

type Tables = HashMap<&'static str, Vec<Map<String, Value>>>;

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::StoreUnavailable("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::StoreUnavailable("memory store lock poisoned".into()))
    }
}

fn rows<'a>(tables: &'a Tables, table: &str) -> &'a [Map<String, Value>] {
    tables.get(table).map(|v| v.as_slice()).unwrap_or(&[])
}

fn row_id(row: &Map<String, Value>) -> Option<&str> {
    row.get("id").and_then(Value::as_str)
}

fn contains_id(tables: &Tables, table: &str, id: &str) -> bool {
    rows(tables, table).iter().any(|r| row_id(r) == Some(id))
}

/// Column rules for a full row about to be written.
fn check_row(tables: &Tables, def: &EntityDef, row: &Map<String, Value>) -> Result<(), StoreError> {
    for c in def.columns.iter().filter(|c| c.kind == ColumnKind::Text) {
        let value = match row.get(c.field) {
            None | Some(Value::Null) if c.required => {
                return Err(StoreError::ValidationFailed(format!(
                    "null value in column \"{}\" of relation \"{}\"",
                    c.column, def.table
                )))
            }
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) => s.as_str(),
            Some(other) => {
                return Err(StoreError::ValidationFailed(format!("{} must be a string, got {}", c.field, other)))
            }
        };
        if let Some(allowed) = c.allowed {
            if !allowed.contains(&value) {
                return Err(StoreError::ValidationFailed(format!(
                    "{} must be one of {:?}, got '{}'",
                    c.field, allowed, value
                )));
            }
        }
        if let Some(target) = c.references {
            if !contains_id(tables, target, value) {
                return Err(StoreError::ConstraintViolation(format!(
                    "{}.{} references missing {} '{}'",
                    def.table, c.column, target, value
                )));
            }
        }
    }
    Ok(())
}

/// First row in any table that still references `table`/`id`, as `(table, column)`.
fn referenced_by(tables: &Tables, table: &str, id: &str) -> Option<(&'static str, &'static str)> {
    for def in ALL_ENTITIES {
        for fk in def.foreign_keys().filter(|c| c.references == Some(table)) {
            if rows(tables, def.table)
                .iter()
                .any(|r| r.get(fk.field).and_then(Value::as_str) == Some(id))
            {
                return Some((def.table, fk.column));
            }
        }
    }
    None
}

fn now() -> Value {
    Value::String(chrono::Utc::now().to_rfc3339())
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryStore {
    async fn create(&self, data: E::Create) -> Result<E, StoreError> {
        let def = E::DEF;
        let fields = payload_fields(&data)?;
        let id = id_or_generate(&fields)?;
        let created = now();
        let mut row = Map::new();
        for c in def.columns {
            let value = match c.kind {
                ColumnKind::Id => Value::String(id.clone()),
                ColumnKind::Timestamp => created.clone(),
                ColumnKind::Text => fields.get(c.field).cloned().unwrap_or(Value::Null),
            };
            row.insert(c.field.to_string(), value);
        }

        let mut tables = self.write()?;
        check_row(&tables, def, &row)?;
        if contains_id(&tables, def.table, &id) {
            return Err(StoreError::ConstraintViolation(format!(
                "duplicate key value violates unique constraint on {}.id: '{}'",
                def.table, id
            )));
        }
        tables.entry(def.table).or_default().push(row.clone());
        drop(tables);
        from_row(Value::Object(row))
    }

    async fn get_all(&self) -> Result<Vec<E>, StoreError> {
        let tables = self.read()?;
        rows(&tables, E::DEF.table)
            .iter()
            .map(|r| from_row(Value::Object(r.clone())))
            .collect()
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<E>, StoreError> {
        let tables = self.read()?;
        rows(&tables, E::DEF.table)
            .iter()
            .find(|r| row_id(r) == Some(id))
            .map(|r| from_row(Value::Object(r.clone())))
            .transpose()
    }

    async fn update(&self, id: &str, data: E::Patch) -> Result<E, StoreError> {
        let def = E::DEF;
        let fields = payload_fields(&data)?;
        let mut tables = self.write()?;
        let idx = rows(&tables, def.table)
            .iter()
            .position(|r| row_id(r) == Some(id))
            .ok_or_else(|| StoreError::not_found(def.label, id))?;

        let mut row = rows(&tables, def.table)[idx].clone();
        for c in def.columns.iter().filter(|c| c.kind == ColumnKind::Text) {
            if let Some(v) = fields.get(c.field) {
                row.insert(c.field.to_string(), v.clone());
            }
        }
        row.insert("updatedAt".to_string(), now());
        check_row(&tables, def, &row)?;

        if let Some(table) = tables.get_mut(def.table) {
            table[idx] = row.clone();
        }
        drop(tables);
        from_row(Value::Object(row))
    }

    async fn delete(&self, id: &str) -> Result<E, StoreError> {
        let def = E::DEF;
        let mut tables = self.write()?;
        let idx = rows(&tables, def.table)
            .iter()
            .position(|r| row_id(r) == Some(id))
            .ok_or_else(|| StoreError::not_found(def.label, id))?;
        if let Some((table, column)) = referenced_by(&tables, def.table, id) {
            return Err(StoreError::ConstraintViolation(format!(
                "{} '{}' is still referenced from {}.{}",
                def.table, id, table, column
            )));
        }
        let removed = match tables.get_mut(def.table) {
            Some(table) => table.remove(idx),
            None => return Err(StoreError::not_found(def.label, id)),
        };
        drop(tables);
        from_row(Value::Object(removed))
    }
}

#[async_trait]
impl UserRelations for MemoryStore {
    async fn get_buildings(&self, user_id: &str) -> Result<Option<UserWithBuildings>, StoreError> {
        let Some(user) = Repository::<User>::get_by_id(self, user_id).await? else {
            return Ok(None);
        };
        let tables = self.read()?;
        let point_ids: HashSet<&str> = rows(&tables, AccessLog::DEF.table)
            .iter()
            .filter(|r| r.get("userId").and_then(Value::as_str) == Some(user_id))
            .filter_map(|r| r.get("accessPointId").and_then(Value::as_str))
            .collect();
        let building_ids: HashSet<&str> = rows(&tables, AccessPoint::DEF.table)
            .iter()
            .filter(|r| row_id(r).map(|id| point_ids.contains(id)).unwrap_or(false))
            .filter_map(|r| r.get("buildingId").and_then(Value::as_str))
            .collect();
        let buildings = rows(&tables, Building::DEF.table)
            .iter()
            .filter(|r| row_id(r).map(|id| building_ids.contains(id)).unwrap_or(false))
            .map(|r| from_row(Value::Object(r.clone())))
            .collect::<Result<Vec<Building>, _>>()?;
        Ok(Some(UserWithBuildings { user, buildings }))
    }

    async fn get_access_logs(&self, user_id: &str) -> Result<Option<UserWithAccessLogs>, StoreError> {
        let Some(user) = Repository::<User>::get_by_id(self, user_id).await? else {
            return Ok(None);
        };
        let tables = self.read()?;
        let access_logs = rows(&tables, AccessLog::DEF.table)
            .iter()
            .filter(|r| r.get("userId").and_then(Value::as_str) == Some(user_id))
            .map(|r| from_row(Value::Object(r.clone())))
            .collect::<Result<Vec<AccessLog>, _>>()?;
        Ok(Some(UserWithAccessLogs { user, access_logs }))
    }
}

#[async_trait]
impl Probe for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }
}
