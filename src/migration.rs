//! Schema DDL derived from the entity descriptors: tables, foreign keys and FK indexes.
//! Tables are created in dependency order and every statement is idempotent.

use crate::error::StoreError;
use crate::model::{ColumnKind, EntityDef, ALL_ENTITIES};
use crate::sql::{quoted, SEQ_COLUMN};
use sqlx::PgPool;

/// CREATE TABLE IF NOT EXISTS for one entity. Foreign keys restrict deletes of referenced rows.
pub fn table_ddl(def: &EntityDef) -> String {
    let mut col_defs = vec![format!("{} BIGINT GENERATED ALWAYS AS IDENTITY", quoted(SEQ_COLUMN))];
    for c in def.columns {
        let mut col = match c.kind {
            ColumnKind::Id => format!("{} TEXT PRIMARY KEY", quoted(c.column)),
            ColumnKind::Text => format!("{} TEXT", quoted(c.column)),
            ColumnKind::Timestamp => format!("{} TIMESTAMPTZ NOT NULL DEFAULT NOW()", quoted(c.column)),
        };
        if c.kind == ColumnKind::Text && c.required {
            col.push_str(" NOT NULL");
        }
        if let Some(target) = c.references {
            col.push_str(&format!(" REFERENCES {} (\"id\") ON DELETE RESTRICT", quoted(target)));
        }
        if let Some(allowed) = c.allowed {
            let values: Vec<String> = allowed.iter().map(|v| format!("'{}'", v.replace('\'', "''"))).collect();
            col.push_str(&format!(" CHECK ({} IN ({}))", quoted(c.column), values.join(", ")));
        }
        col_defs.push(col);
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quoted(def.table),
        col_defs.join(",\n  ")
    )
}

/// One index per foreign key column, for the restrict checks and relation reads.
pub fn index_ddl(def: &EntityDef) -> Vec<String> {
    def.foreign_keys()
        .map(|c| {
            format!(
                "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                quoted(&format!("{}_{}_idx", def.table, c.column)),
                quoted(def.table),
                quoted(c.column)
            )
        })
        .collect()
}

/// Create every table and index that does not exist yet.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), StoreError> {
    for def in ALL_ENTITIES {
        let sql = table_ddl(def);
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(&sql).execute(pool).await?;
        for sql in index_ddl(def) {
            sqlx::query(&sql).execute(pool).await?;
        }
    }
    tracing::info!(tables = ALL_ENTITIES.len(), "schema up to date");
    Ok(())
}
