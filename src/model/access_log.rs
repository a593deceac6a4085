use super::{Column, Entity, EntityDef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Values the store accepts for `accessStatus`.
pub const ACCESS_STATUSES: &[&str] = &["Granted", "Denied"];

/// One access attempt by a user at an access point, and its outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessLog {
    pub id: String,
    pub access_status: String,
    pub access_type: String,
    pub user_id: String,
    pub access_point_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewAccessLog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_point_id: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AccessLogPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_point_id: Option<String>,
}

impl Entity for AccessLog {
    type Create = NewAccessLog;
    type Patch = AccessLogPatch;

    const DEF: &'static EntityDef = &EntityDef {
        table: "access_logs",
        path_segment: "access-logs",
        label: "Access log",
        columns: &[
            Column::id(),
            Column::one_of("accessStatus", "access_status", ACCESS_STATUSES),
            Column::text("accessType", "access_type"),
            Column::foreign_key("userId", "user_id", "users"),
            Column::foreign_key("accessPointId", "access_point_id", "access_points"),
            Column::created_at(),
            Column::updated_at(),
        ],
    };

    fn id(&self) -> &str {
        &self.id
    }
}
