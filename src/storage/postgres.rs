//! PostgreSQL entity store.
//!
//! Rows travel as JSON: writes bind each column with an explicit cast taken from the model's
//! column types, and reads return `row_to_json(table.*)`. Every mutating call runs in its own
//! SQL transaction.

use crate::domain::error::AccessError;
use crate::domain::model::{Model, ModelRegistry, OnDelete, ParentLink};
use crate::storage::{into_row, parent_id_of, EntityStore, Row, RowUpdate};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row as _, Transaction};

const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Entity store backed by a Postgres connection pool.
pub struct PgEntityStore {
    pool: PgPool,
    registry: ModelRegistry,
}

impl PgEntityStore {
    /// Connects to the database and creates any missing tables.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::with_pool(pool, ModelRegistry::standard()).await?)
    }

    pub async fn with_pool(pool: PgPool, registry: ModelRegistry) -> Result<Self, AccessError> {
        let store = Self { pool, registry };
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs every CREATE TABLE IF NOT EXISTS statement, parents first.
    async fn ensure_schema(&self) -> Result<(), AccessError> {
        for sql in self.registry.get_all_create_table_sql() {
            sqlx::query(sql).execute(&self.pool).await?;
        }
        tracing::info!(tables = ?self.registry.list_models(), "schema ready");
        Ok(())
    }

    fn parent_key(&self, link: &ParentLink) -> String {
        let pk = self
            .registry
            .get(link.table)
            .map(|m| m.primary_key_field().to_string())
            .unwrap_or_else(|| "id".to_string());
        quote_ident(&pk)
    }

    /// Confirms the parent row exists and holds a key-share lock on it until the transaction
    /// ends, so a concurrent delete of the parent cannot orphan the row being written.
    async fn lock_parent(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        link: &ParentLink,
        parent_id: i32,
    ) -> Result<(), AccessError> {
        let sql = format!(
            "SELECT 1 FROM {} WHERE {} = $1 FOR KEY SHARE",
            quote_ident(link.table),
            self.parent_key(link)
        );
        let found = sqlx::query(&sql)
            .bind(parent_id)
            .fetch_optional(&mut **tx)
            .await?;
        if found.is_none() {
            return Err(AccessError::reference(link.table, parent_id));
        }
        Ok(())
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn placeholder(model: &dyn Model, column: &str, index: usize) -> String {
    match model.column_type(column) {
        Some(sql_type) => format!("${}::{}", index, sql_type),
        None => format!("${}", index),
    }
}

fn bind_json<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &JsonValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        JsonValue::Null => query.bind(None::<String>),
        JsonValue::Bool(b) => query.bind(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => query.bind(i),
            None => query.bind(n.as_f64()),
        },
        JsonValue::String(s) => query.bind(s.clone()),
        other => query.bind(other.to_string()),
    }
}

fn record_of(row: &sqlx::postgres::PgRow) -> Result<Row, AccessError> {
    let record: JsonValue = row.try_get("record")?;
    into_row(record)
}

#[async_trait]
impl EntityStore for PgEntityStore {
    async fn insert(&self, model: &'static dyn Model, mut row: Row) -> Result<Row, AccessError> {
        row.remove(model.primary_key_field());
        let table = quote_ident(model.table_name());

        let mut tx = self.pool.begin().await?;

        if let Some(link) = model.parent() {
            let parent_id = parent_id_of(&row, &link)?;
            self.lock_parent(&mut tx, &link, parent_id).await?;
        }

        let sql = if row.is_empty() {
            format!(
                "INSERT INTO {t} DEFAULT VALUES RETURNING row_to_json({t}.*) AS record",
                t = table
            )
        } else {
            let columns: Vec<String> = row.keys().map(|c| quote_ident(c)).collect();
            let placeholders: Vec<String> = row
                .keys()
                .enumerate()
                .map(|(idx, c)| placeholder(model, c, idx + 1))
                .collect();
            format!(
                "INSERT INTO {t} ({}) VALUES ({}) RETURNING row_to_json({t}.*) AS record",
                columns.join(", "),
                placeholders.join(", "),
                t = table
            )
        };

        let mut query = sqlx::query(&sql);
        for value in row.values() {
            query = bind_json(query, value);
        }
        let inserted = query.fetch_one(&mut *tx).await?;
        let record = record_of(&inserted)?;

        tx.commit().await?;
        Ok(record)
    }

    async fn fetch(&self, model: &'static dyn Model, id: i32) -> Result<Option<Row>, AccessError> {
        let sql = format!(
            "SELECT row_to_json({t}.*) AS record FROM {t} WHERE {} = $1",
            quote_ident(model.primary_key_field()),
            t = quote_ident(model.table_name())
        );
        let found = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        found.as_ref().map(record_of).transpose()
    }

    async fn fetch_all(&self, model: &'static dyn Model) -> Result<Vec<Row>, AccessError> {
        let sql = format!(
            "SELECT row_to_json({t}.*) AS record FROM {t} ORDER BY {}",
            quote_ident(model.primary_key_field()),
            t = quote_ident(model.table_name())
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(record_of).collect()
    }

    async fn fetch_by_parent(
        &self,
        model: &'static dyn Model,
        parent_id: i32,
    ) -> Result<Vec<Row>, AccessError> {
        let Some(link) = model.parent() else {
            return Ok(Vec::new());
        };
        let sql = format!(
            "SELECT row_to_json({t}.*) AS record FROM {t} WHERE {} = $1 ORDER BY {}",
            quote_ident(link.column),
            quote_ident(model.primary_key_field()),
            t = quote_ident(model.table_name())
        );
        let rows = sqlx::query(&sql)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(record_of).collect()
    }

    async fn update(
        &self,
        model: &'static dyn Model,
        id: i32,
        apply: RowUpdate,
    ) -> Result<Option<Row>, AccessError> {
        let table = quote_ident(model.table_name());
        let pk_field = model.primary_key_field();
        let pk = quote_ident(pk_field);

        let mut tx = self.pool.begin().await?;

        let select_sql = format!(
            "SELECT row_to_json({t}.*) AS record FROM {t} WHERE {pk} = $1 FOR UPDATE",
            t = table,
            pk = pk
        );
        let current = match sqlx::query(&select_sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        {
            Some(row) => record_of(&row)?,
            None => {
                tx.rollback().await?;
                return Ok(None);
            }
        };

        let mut updated = apply(current.clone())?;
        updated.remove(pk_field);
        if updated.is_empty() {
            tx.commit().await?;
            return Ok(Some(current));
        }

        if let Some(link) = model.parent() {
            let parent_id = parent_id_of(&updated, &link)?;
            self.lock_parent(&mut tx, &link, parent_id).await?;
        }

        let assignments: Vec<String> = updated
            .keys()
            .enumerate()
            .map(|(idx, c)| format!("{} = {}", quote_ident(c), placeholder(model, c, idx + 1)))
            .collect();
        let update_sql = format!(
            "UPDATE {t} SET {} WHERE {pk} = ${} RETURNING row_to_json({t}.*) AS record",
            assignments.join(", "),
            updated.len() + 1,
            t = table,
            pk = pk
        );

        let mut query = sqlx::query(&update_sql);
        for value in updated.values() {
            query = bind_json(query, value);
        }
        let row = query.bind(id).fetch_one(&mut *tx).await?;
        let record = record_of(&row)?;

        tx.commit().await?;
        Ok(Some(record))
    }

    async fn delete(&self, model: &'static dyn Model, id: i32) -> Result<bool, AccessError> {
        let table_name = model.table_name();
        let table = quote_ident(table_name);
        let pk = quote_ident(model.primary_key_field());

        let mut tx = self.pool.begin().await?;

        let lock_sql = format!("SELECT 1 FROM {} WHERE {} = $1 FOR UPDATE", table, pk);
        let found = sqlx::query(&lock_sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            tx.rollback().await?;
            return Ok(false);
        }

        for child in self.registry.children_of(table_name, OnDelete::Cascade) {
            let Some(link) = child.parent() else { continue };
            let sql = format!(
                "DELETE FROM {} WHERE {} = $1",
                quote_ident(child.table_name()),
                quote_ident(link.column)
            );
            let result = sqlx::query(&sql).bind(id).execute(&mut *tx).await?;
            tracing::debug!(
                table = child.table_name(),
                parent = table_name,
                parent_id = id,
                removed = result.rows_affected(),
                "cascade delete"
            );
        }

        let delete_sql = format!("DELETE FROM {} WHERE {} = $1", table, pk);
        sqlx::query(&delete_sql)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| referenced_row_error(e, table_name, id))?;

        tx.commit().await?;
        Ok(true)
    }

    async fn ping(&self) -> Result<(), AccessError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Restrict children make Postgres refuse the delete; report that as a constraint violation.
fn referenced_row_error(err: sqlx::Error, table: &str, id: i32) -> AccessError {
    let is_fk_violation = err
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == FOREIGN_KEY_VIOLATION)
        .unwrap_or(false);
    if is_fk_violation {
        AccessError::Storage(format!(
            "constraint violation: {} {} is still referenced",
            table, id
        ))
    } else {
        err.into()
    }
}
