use super::{Column, Entity, EntityDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewBuilding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildingPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Entity for Building {
    type Create = NewBuilding;
    type Patch = BuildingPatch;

    const DEF: &'static EntityDef = &EntityDef {
        table: "buildings",
        path_segment: "buildings",
        label: "Building",
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
