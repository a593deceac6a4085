//! Entity CRUD handlers, generic over the entity type: list, create, read, update, delete.

use crate::error::AppError;
use crate::extractors::Payload;
use crate::model::Entity;
use crate::response::{deleted_body, MessageBody};
use crate::service::Service;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

pub async fn list<E: Entity>(State(service): State<Service<E>>) -> Result<Json<Vec<E>>, AppError> {
    let rows = service.get_all().await?;
    Ok(Json(rows))
}

pub async fn create<E: Entity>(
    State(service): State<Service<E>>,
    Payload(body): Payload<E::Create>,
) -> Result<(StatusCode, Json<E>), AppError> {
    let row = service.create(body).await?;
    tracing::info!(entity = E::DEF.table, id = row.id(), "created");
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn read<E: Entity>(
    State(service): State<Service<E>>,
    Path(id): Path<String>,
) -> Result<Json<E>, AppError> {
    let row = service
        .get_by_id(&id)
        .await?
        .ok_or(AppError::NotFound(E::DEF.label))?;
    Ok(Json(row))
}

pub async fn update<E: Entity>(
    State(service): State<Service<E>>,
    Path(id): Path<String>,
    Payload(body): Payload<E::Patch>,
) -> Result<Json<E>, AppError> {
    let row = service.update(&id, body).await?;
    Ok(Json(row))
}

pub async fn delete<E: Entity>(
    State(service): State<Service<E>>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, AppError> {
    service.delete(&id).await?;
    tracing::info!(entity = E::DEF.table, id = %id, "deleted");
    Ok(Json(deleted_body(E::DEF.label)))
}
