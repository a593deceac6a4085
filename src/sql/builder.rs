//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from an entity descriptor.

use super::BindValue;
use crate::error::StoreError;
use crate::model::{ColumnKind, EntityDef};
use serde_json::{Map, Value};

/// Hidden identity column every table carries; lists are ordered by it so reads follow insertion order.
pub const SEQ_COLUMN: &str = "seq";

/// Quote identifier for PostgreSQL (safe: only from entity descriptors).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: BindValue) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// SELECT list: each column aliased to its JSON field name, optionally prefixed by a table alias.
pub fn select_column_list(def: &EntityDef, alias: Option<&str>) -> String {
    def.columns
        .iter()
        .map(|c| {
            let col = match alias {
                Some(a) => format!("{}.{}", a, quoted(c.column)),
                None => quoted(c.column),
            };
            format!("{} AS {}", col, quoted(c.field))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn returning(def: &EntityDef) -> String {
    format!("RETURNING {}", select_column_list(def, None))
}

/// Writable columns present in `fields`, in descriptor order, with their bind values. The id column is skipped.
fn writable_values(def: &EntityDef, fields: &Map<String, Value>) -> Result<Vec<(&'static str, BindValue)>, StoreError> {
    let mut out = Vec::new();
    for c in def.columns.iter().filter(|c| c.is_writable() && c.kind != ColumnKind::Id) {
        if let Some(v) = fields.get(c.field) {
            out.push((c.column, BindValue::from_json(c.field, v)?));
        }
    }
    Ok(out)
}

/// SELECT all rows in insertion order.
pub fn select_list(def: &EntityDef) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(def, None),
        quoted(def.table),
        quoted(SEQ_COLUMN)
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(def: &EntityDef, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id.into());
    q.sql = format!(
        "SELECT {} FROM {} WHERE \"id\" = ${}",
        select_column_list(def, None),
        quoted(def.table),
        n
    );
    q
}

/// SELECT rows whose `column` equals `value`, in insertion order.
pub fn select_where(def: &EntityDef, column: &str, value: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(value.into());
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${} ORDER BY {}",
        select_column_list(def, None),
        quoted(def.table),
        quoted(column),
        n,
        quoted(SEQ_COLUMN)
    );
    q
}

/// One join step from a row set to the table it references: `(table, fk column on the current side)`.
pub struct Hop<'a> {
    pub from: &'a EntityDef,
    pub fk_column: &'a str,
}

/// SELECT rows of `target` reached from rows of `hops[0].from` where `start_column = value`,
/// following each hop's foreign key in turn. Distinct target rows, ordered by target insertion.
pub fn select_reached(target: &EntityDef, hops: &[Hop<'_>], start_column: &str, value: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(value.into());
    // Innermost: ids referenced by the starting table.
    let mut inner = String::new();
    for (i, hop) in hops.iter().enumerate() {
        inner = if i == 0 {
            format!(
                "SELECT {} FROM {} WHERE {} = ${}",
                quoted(hop.fk_column),
                quoted(hop.from.table),
                quoted(start_column),
                n
            )
        } else {
            format!(
                "SELECT {} FROM {} WHERE \"id\" IN ({})",
                quoted(hop.fk_column),
                quoted(hop.from.table),
                inner
            )
        };
    }
    q.sql = format!(
        "SELECT {} FROM {} WHERE \"id\" IN ({}) ORDER BY {}",
        select_column_list(target, None),
        quoted(target.table),
        inner,
        quoted(SEQ_COLUMN)
    );
    q
}

/// INSERT one row with the given id; columns not supplied are left to the store (NOT NULL rejects them).
pub fn insert(def: &EntityDef, id: &str, fields: &Map<String, Value>) -> Result<QueryBuf, StoreError> {
    let mut q = QueryBuf::new();
    let mut cols = vec![quoted("id")];
    let mut placeholders = vec![format!("${}", q.push_param(id.into()))];
    for (column, value) in writable_values(def, fields)? {
        cols.push(quoted(column));
        placeholders.push(format!("${}", q.push_param(value)));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) {}",
        quoted(def.table),
        cols.join(", "),
        placeholders.join(", "),
        returning(def)
    );
    Ok(q)
}

/// UPDATE the supplied columns by id and touch `updated_at`. Returns no row when the id is absent.
pub fn update(def: &EntityDef, id: &str, fields: &Map<String, Value>) -> Result<QueryBuf, StoreError> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (column, value) in writable_values(def, fields)? {
        sets.push(format!("{} = ${}", quoted(column), q.push_param(value)));
    }
    sets.push("\"updated_at\" = NOW()".to_string());
    let n = q.push_param(id.into());
    q.sql = format!(
        "UPDATE {} SET {} WHERE \"id\" = ${} {}",
        quoted(def.table),
        sets.join(", "),
        n,
        returning(def)
    );
    Ok(q)
}

/// DELETE by id, returning the removed row.
pub fn delete(def: &EntityDef, id: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id.into());
    q.sql = format!(
        "DELETE FROM {} WHERE \"id\" = ${} {}",
        quoted(def.table),
        n,
        returning(def)
    );
    q
}
