//! Entity records, their create/patch payloads, and the static table descriptors both store back-ends work from.

mod access_log;
mod access_point;
mod building;
mod user;

pub use access_log::{AccessLog, AccessLogPatch, NewAccessLog, ACCESS_STATUSES};
pub use access_point::{AccessPoint, AccessPointPatch, NewAccessPoint};
pub use building::{Building, BuildingPatch, NewBuilding};
pub use user::{NewUser, User, UserPatch, UserWithAccessLogs, UserWithBuildings};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Storage class of a column. Drives DDL, SELECT casts and which columns a payload may write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// Text primary key, caller-supplied or generated on insert.
    Id,
    Text,
    /// Set by the store on insert (and on update for `updated_at`).
    Timestamp,
}

#[derive(Clone, Copy, Debug)]
pub struct Column {
    /// Name in JSON payloads and records (camelCase).
    pub field: &'static str,
    /// Name in the database table (snake_case).
    pub column: &'static str,
    pub kind: ColumnKind,
    pub required: bool,
    /// Table this column references, if it is a foreign key.
    pub references: Option<&'static str>,
    /// Closed set of accepted values, enforced by the store.
    pub allowed: Option<&'static [&'static str]>,
}

impl Column {
    pub const fn id() -> Self {
        Column {
            field: "id",
            column: "id",
            kind: ColumnKind::Id,
            required: true,
            references: None,
            allowed: None,
        }
    }

    pub const fn text(field: &'static str, column: &'static str) -> Self {
        Column {
            field,
            column,
            kind: ColumnKind::Text,
            required: true,
            references: None,
            allowed: None,
        }
    }

    pub const fn foreign_key(field: &'static str, column: &'static str, table: &'static str) -> Self {
        Column {
            field,
            column,
            kind: ColumnKind::Text,
            required: true,
            references: Some(table),
            allowed: None,
        }
    }

    pub const fn one_of(field: &'static str, column: &'static str, allowed: &'static [&'static str]) -> Self {
        Column {
            field,
            column,
            kind: ColumnKind::Text,
            required: true,
            references: None,
            allowed: Some(allowed),
        }
    }

    pub const fn created_at() -> Self {
        Column {
            field: "createdAt",
            column: "created_at",
            kind: ColumnKind::Timestamp,
            required: true,
            references: None,
            allowed: None,
        }
    }

    pub const fn updated_at() -> Self {
        Column {
            field: "updatedAt",
            column: "updated_at",
            kind: ColumnKind::Timestamp,
            required: true,
            references: None,
            allowed: None,
        }
    }

    /// Columns a create or patch payload may set.
    pub fn is_writable(&self) -> bool {
        self.kind != ColumnKind::Timestamp
    }
}

/// Static description of one entity's table.
#[derive(Debug)]
pub struct EntityDef {
    pub table: &'static str,
    /// URL segment under `/api`.
    pub path_segment: &'static str,
    /// Human label used in response messages ("User not found").
    pub label: &'static str,
    pub columns: &'static [Column],
}

impl EntityDef {
    pub fn foreign_keys(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.references.is_some())
    }
}

/// A persisted record type. Payload types serialize with absent fields skipped so that
/// only supplied fields reach the store.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type Create: Serialize + DeserializeOwned + Send + Sync + 'static;
    type Patch: Serialize + DeserializeOwned + Send + Sync + 'static;

    const DEF: &'static EntityDef;

    fn id(&self) -> &str;
}

/// All tables in dependency order (referenced tables first).
pub const ALL_ENTITIES: &[&EntityDef] = &[
    User::DEF,
    Building::DEF,
    AccessPoint::DEF,
    AccessLog::DEF,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn referenced_tables_precede_their_dependents() {
        for (i, def) in ALL_ENTITIES.iter().enumerate() {
            for fk in def.foreign_keys() {
                let target = fk.references.unwrap();
                let pos = ALL_ENTITIES.iter().position(|d| d.table == target).unwrap();
                assert!(pos < i, "{} must come before {}", target, def.table);
            }
        }
    }

    #[test]
    fn every_table_has_id_and_timestamps() {
        for def in ALL_ENTITIES {
            for field in ["id", "createdAt", "updatedAt"] {
                assert!(def.columns.iter().any(|c| c.field == field), "{} lacks {}", def.table, field);
            }
        }
    }
}
