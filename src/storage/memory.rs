//! In-process entity store.
//!
//! All tables sit behind one `RwLock`; a write unit (insert, update, cascade delete) holds the
//! write guard from its first check to its last change, which makes each unit atomic.

use crate::domain::error::AccessError;
use crate::domain::model::{Model, ModelRegistry, OnDelete};
use crate::storage::{parent_id_of, EntityStore, Row, RowUpdate};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[derive(Default)]
struct MemoryTable {
    /// Highest id ever assigned; ids are never reused after a delete.
    last_id: i32,
    rows: BTreeMap<i32, Row>,
}

impl MemoryTable {
    fn rows_referencing(&self, column: &str, parent_id: i32) -> Vec<i32> {
        self.rows
            .iter()
            .filter(|(_, row)| row.get(column).and_then(JsonValue::as_i64) == Some(parent_id as i64))
            .map(|(id, _)| *id)
            .collect()
    }
}

pub struct MemoryEntityStore {
    registry: ModelRegistry,
    tables: RwLock<HashMap<String, MemoryTable>>,
}

impl MemoryEntityStore {
    pub fn new() -> Self {
        Self::with_registry(ModelRegistry::standard())
    }

    pub fn with_registry(registry: ModelRegistry) -> Self {
        let tables = registry
            .list_models()
            .into_iter()
            .map(|name| (name, MemoryTable::default()))
            .collect();
        Self {
            registry,
            tables: RwLock::new(tables),
        }
    }
}

impl Default for MemoryEntityStore {
    fn default() -> Self {
        Self::new()
    }
}

fn check_parent(
    tables: &HashMap<String, MemoryTable>,
    model: &dyn Model,
    row: &Row,
) -> Result<(), AccessError> {
    if let Some(link) = model.parent() {
        let parent_id = parent_id_of(row, &link)?;
        let exists = tables
            .get(link.table)
            .map(|t| t.rows.contains_key(&parent_id))
            .unwrap_or(false);
        if !exists {
            return Err(AccessError::reference(link.table, parent_id));
        }
    }
    Ok(())
}

#[async_trait]
impl EntityStore for MemoryEntityStore {
    async fn insert(&self, model: &'static dyn Model, mut row: Row) -> Result<Row, AccessError> {
        let pk_field = model.primary_key_field();
        row.remove(pk_field);

        let mut tables = self.tables.write().await;
        check_parent(&tables, model, &row)?;

        let table = tables.entry(model.table_name().to_string()).or_default();
        table.last_id += 1;
        let id = table.last_id;
        row.insert(pk_field.to_string(), JsonValue::from(id));
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn fetch(&self, model: &'static dyn Model, id: i32) -> Result<Option<Row>, AccessError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(model.table_name())
            .and_then(|t| t.rows.get(&id))
            .cloned())
    }

    async fn fetch_all(&self, model: &'static dyn Model) -> Result<Vec<Row>, AccessError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(model.table_name())
            .map(|t| t.rows.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn fetch_by_parent(
        &self,
        model: &'static dyn Model,
        parent_id: i32,
    ) -> Result<Vec<Row>, AccessError> {
        let Some(link) = model.parent() else {
            return Ok(Vec::new());
        };
        let tables = self.tables.read().await;
        let Some(table) = tables.get(model.table_name()) else {
            return Ok(Vec::new());
        };
        Ok(table
            .rows_referencing(link.column, parent_id)
            .into_iter()
            .filter_map(|id| table.rows.get(&id).cloned())
            .collect())
    }

    async fn update(
        &self,
        model: &'static dyn Model,
        id: i32,
        apply: RowUpdate,
    ) -> Result<Option<Row>, AccessError> {
        let pk_field = model.primary_key_field();
        let mut tables = self.tables.write().await;

        let current = match tables.get(model.table_name()).and_then(|t| t.rows.get(&id)) {
            Some(row) => row.clone(),
            None => return Ok(None),
        };

        let mut updated = apply(current)?;
        updated.insert(pk_field.to_string(), JsonValue::from(id));
        check_parent(&tables, model, &updated)?;

        if let Some(table) = tables.get_mut(model.table_name()) {
            table.rows.insert(id, updated.clone());
        }
        Ok(Some(updated))
    }

    async fn delete(&self, model: &'static dyn Model, id: i32) -> Result<bool, AccessError> {
        let table_name = model.table_name();
        let mut tables = self.tables.write().await;

        let exists = tables
            .get(table_name)
            .map(|t| t.rows.contains_key(&id))
            .unwrap_or(false);
        if !exists {
            return Ok(false);
        }

        // Reject before touching anything so a refused delete leaves every table unchanged.
        for child in self.registry.children_of(table_name, OnDelete::Restrict) {
            let Some(link) = child.parent() else { continue };
            let referencing = tables
                .get(child.table_name())
                .map(|t| t.rows_referencing(link.column, id).len())
                .unwrap_or(0);
            if referencing > 0 {
                return Err(AccessError::Storage(format!(
                    "constraint violation: {} {} is still referenced by {} {} row(s)",
                    table_name,
                    id,
                    referencing,
                    child.table_name()
                )));
            }
        }

        for child in self.registry.children_of(table_name, OnDelete::Cascade) {
            let Some(link) = child.parent() else { continue };
            if let Some(child_table) = tables.get_mut(child.table_name()) {
                let doomed = child_table.rows_referencing(link.column, id);
                for child_id in &doomed {
                    child_table.rows.remove(child_id);
                }
                tracing::debug!(
                    table = child.table_name(),
                    parent = table_name,
                    parent_id = id,
                    removed = doomed.len(),
                    "cascade delete"
                );
            }
        }

        if let Some(table) = tables.get_mut(table_name) {
            table.rows.remove(&id);
        }
        Ok(true)
    }

    async fn ping(&self) -> Result<(), AccessError> {
        Ok(())
    }
}
