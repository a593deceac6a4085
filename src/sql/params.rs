//! Convert payload JSON values to types that sqlx can bind.

use crate::error::StoreError;
use serde_json::Value;
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::Database;

/// A value bound to a text column. Every writable column is TEXT.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Null,
    Text(String),
}

impl BindValue {
    pub fn from_json(field: &str, v: &Value) -> Result<Self, StoreError> {
        match v {
            Value::Null => Ok(BindValue::Null),
            Value::String(s) => Ok(BindValue::Text(s.clone())),
            other => Err(StoreError::ValidationFailed(format!(
                "{} must be a string, got {}",
                field, other
            ))),
        }
    }
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        BindValue::Text(s.to_string())
    }
}

impl<'q> Encode<'q, Postgres> for BindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            BindValue::Null => <Option<&str> as Encode<Postgres>>::encode_by_ref(&None, buf)?,
            BindValue::Text(s) => {
                let s_ref: &str = s.as_str();
                <&str as Encode<Postgres>>::encode_by_ref(&s_ref, buf)?
            }
        })
    }
}

impl sqlx::Type<Postgres> for BindValue {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("TEXT")
    }
}
