//! Shared helpers for router tests: in-memory and failing stores, request helpers.

#![allow(dead_code)]

use access_control_api::error::StoreError;
use access_control_api::model::{Entity, UserWithAccessLogs, UserWithBuildings};
use access_control_api::store::{Probe, Repository, UserRelations};
use access_control_api::{build_router, AppState, MemoryStore};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const BODY_LIMIT: usize = 1024 * 1024;

/// Router over a fresh in-memory store.
pub fn memory_app() -> Router {
    build_router(AppState::new(Arc::new(MemoryStore::new())), BODY_LIMIT)
}

/// Router whose store fails every call, as when the database is down.
pub fn failing_app() -> Router {
    build_router(AppState::new(Arc::new(FailingStore)), BODY_LIMIT)
}

pub struct FailingStore;

fn down() -> StoreError {
    StoreError::StoreUnavailable("connection refused".into())
}

#[async_trait]
impl<E: Entity> Repository<E> for FailingStore {
    async fn create(&self, _data: E::Create) -> Result<E, StoreError> {
        Err(down())
    }

    async fn get_all(&self) -> Result<Vec<E>, StoreError> {
        Err(down())
    }

    async fn get_by_id(&self, _id: &str) -> Result<Option<E>, StoreError> {
        Err(down())
    }

    async fn update(&self, _id: &str, _data: E::Patch) -> Result<E, StoreError> {
        Err(down())
    }

    async fn delete(&self, _id: &str) -> Result<E, StoreError> {
        Err(down())
    }
}

#[async_trait]
impl UserRelations for FailingStore {
    async fn get_buildings(&self, _user_id: &str) -> Result<Option<UserWithBuildings>, StoreError> {
        Err(down())
    }

    async fn get_access_logs(&self, _user_id: &str) -> Result<Option<UserWithAccessLogs>, StoreError> {
        Err(down())
    }
}

#[async_trait]
impl Probe for FailingStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Err(down())
    }
}

async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Send a request with an optional JSON body and return status and parsed JSON body (`Null` when empty).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    call(app, req).await
}

/// Send a raw body with the given content type.
pub async fn send_raw(app: &Router, method: &str, uri: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    call(app, req).await
}

/// POST a JSON body and return the created record, asserting 201.
pub async fn create(app: &Router, uri: &str, body: Value) -> Value {
    let (status, created) = send(app, "POST", uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "POST {} -> {}", uri, created);
    created
}

pub fn internal_error() -> Value {
    serde_json::json!({ "error": "Internal Server Error" })
}
