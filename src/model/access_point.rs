use super::{Column, Entity, EntityDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A door, gate or reader inside a building.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPoint {
    pub id: String,
    pub name: String,
    pub building_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewAccessPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_id: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AccessPointPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_id: Option<String>,
}

impl Entity for AccessPoint {
    type Create = NewAccessPoint;
    type Patch = AccessPointPatch;

    const DEF: &'static EntityDef = &EntityDef {
        table: "access_points",
        path_segment: "access-points",
        label: "Access point",
        columns: &[
            Column::id(),
            Column::text("name", "name"),
            Column::foreign_key("buildingId", "building_id", "buildings"),
            Column::created_at(),
            Column::updated_at(),
        ],
    };

    fn id(&self) -> &str {
        &self.id
    }
}
