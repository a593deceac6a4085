//! PostgreSQL gateway: parameterized SQL generated from entity descriptors.

use super::{from_row, id_or_generate, payload_fields, Probe, Repository, UserRelations};
use crate::error::StoreError;
use crate::model::{AccessLog, AccessPoint, Building, Entity, User, UserWithAccessLogs, UserWithBuildings};
use crate::sql::{self, Hop, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

/// Gateway over an injected connection pool. Cloning shares the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Value>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let row = query.fetch_optional(&self.pool).await?;
        Ok(row.map(|r| row_to_json(&r)))
    }

    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Value>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn fetch_typed<E: Entity>(&self, q: &QueryBuf) -> Result<Vec<E>, StoreError> {
        self.fetch_all(q).await?.into_iter().map(from_row).collect()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for PgStore {
    async fn create(&self, data: E::Create) -> Result<E, StoreError> {
        let fields = payload_fields(&data)?;
        let id = id_or_generate(&fields)?;
        let q = sql::insert(E::DEF, &id, &fields)?;
        let row = self
            .fetch_optional(&q)
            .await?
            .ok_or_else(|| StoreError::StoreUnavailable(format!("insert into {} returned no row", E::DEF.table)))?;
        from_row(row)
    }

    async fn get_all(&self) -> Result<Vec<E>, StoreError> {
        self.fetch_typed(&sql::select_list(E::DEF)).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<E>, StoreError> {
        self.fetch_optional(&sql::select_by_id(E::DEF, id))
            .await?
            .map(from_row)
            .transpose()
    }

    async fn update(&self, id: &str, data: E::Patch) -> Result<E, StoreError> {
        let fields = payload_fields(&data)?;
        let q = sql::update(E::DEF, id, &fields)?;
        let row = self
            .fetch_optional(&q)
            .await?
            .ok_or_else(|| StoreError::not_found(E::DEF.label, id))?;
        from_row(row)
    }

    async fn delete(&self, id: &str) -> Result<E, StoreError> {
        let row = self
            .fetch_optional(&sql::delete(E::DEF, id))
            .await?
            .ok_or_else(|| StoreError::not_found(E::DEF.label, id))?;
        from_row(row)
    }
}

#[async_trait]
impl UserRelations for PgStore {
    async fn get_buildings(&self, user_id: &str) -> Result<Option<UserWithBuildings>, StoreError> {
        let Some(user) = Repository::<User>::get_by_id(self, user_id).await? else {
            return Ok(None);
        };
        let hops = [
            Hop {
                from: AccessLog::DEF,
                fk_column: "access_point_id",
            },
            Hop {
                from: AccessPoint::DEF,
                fk_column: "building_id",
            },
        ];
        let q = sql::select_reached(Building::DEF, &hops, "user_id", user_id);
        let buildings = self.fetch_typed::<Building>(&q).await?;
        Ok(Some(UserWithBuildings { user, buildings }))
    }

    async fn get_access_logs(&self, user_id: &str) -> Result<Option<UserWithAccessLogs>, StoreError> {
        let Some(user) = Repository::<User>::get_by_id(self, user_id).await? else {
            return Ok(None);
        };
        let q = sql::select_where(AccessLog::DEF, "user_id", user_id);
        let access_logs = self.fetch_typed::<AccessLog>(&q).await?;
        Ok(Some(UserWithAccessLogs { user, access_logs }))
    }
}

#[async_trait]
impl Probe for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

fn row_to_json(row: &sqlx::postgres::PgRow) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        let v = cell_to_value(row, name);
        map.insert(name.to_string(), v);
    }
    Value::Object(map)
}

fn cell_to_value(row: &sqlx::postgres::PgRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(d)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    Value::Null
}
