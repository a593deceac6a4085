use super::{AccessLog, Building, Column, Entity, EntityDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A user with the buildings it has accessed through any access point.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithBuildings {
    #[serde(flatten)]
    pub user: User,
    pub buildings: Vec<Building>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithAccessLogs {
    #[serde(flatten)]
    pub user: User,
    pub access_logs: Vec<AccessLog>,
}

impl Entity for User {
    type Create = NewUser;
    type Patch = UserPatch;

    const DEF: &'static EntityDef = &EntityDef {
        table: "users",
        path_segment: "users",
        label: "User",
        columns: &[
            Column::id(),
            Column::text("name", "name"),
            Column::created_at(),
            Column::updated_at(),
        ],
    };

    fn id(&self) -> &str {
        &self.id
    }
}
