//! User reads that embed related records.

use crate::error::AppError;
use crate::model::{Entity, User, UserWithAccessLogs, UserWithBuildings};
use crate::service::RelationService;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn buildings(
    State(relations): State<RelationService>,
    Path(id): Path<String>,
) -> Result<Json<UserWithBuildings>, AppError> {
    let user = relations
        .get_buildings(&id)
        .await?
        .ok_or(AppError::NotFound(User::DEF.label))?;
    Ok(Json(user))
}

pub async fn access_logs(
    State(relations): State<RelationService>,
    Path(id): Path<String>,
) -> Result<Json<UserWithAccessLogs>, AppError> {
    let user = relations
        .get_access_logs(&id)
        .await?
        .ok_or(AppError::NotFound(User::DEF.label))?;
    Ok(Json(user))
}
