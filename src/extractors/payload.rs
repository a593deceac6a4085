//! Request body as JSON or form-urlencoded, with rejections reported through `AppError`.

use crate::error::{AppError, StoreError};
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Body extractor. Form-urlencoded bodies are parsed as forms; anything else as a JSON object, with an
/// empty body read as `{}`. A body that does not parse, or is not an object, is a validation failure.
#[derive(Clone, Debug)]
pub struct Payload<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim_start().starts_with(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| StoreError::ValidationFailed(e.body_text()))?;
            return Ok(Payload(value));
        }
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| StoreError::ValidationFailed(e.body_text()))?;
        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };
        let object: Map<String, Value> =
            serde_json::from_slice(body).map_err(|e| StoreError::ValidationFailed(e.to_string()))?;
        let value = serde_json::from_value(Value::Object(object))
            .map_err(|e| StoreError::ValidationFailed(e.to_string()))?;
        Ok(Payload(value))
    }
}
