//! Uniform create/read/update/delete access for one entity type.

use crate::domain::error::AccessError;
use crate::domain::model::{Entity, Model};
use crate::storage::{into_row, EntityStore, Row};
use std::marker::PhantomData;
use std::sync::Arc;

pub struct Repository<E: Entity> {
    store: Arc<dyn EntityStore>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

fn to_row<E: Entity>(record: &E) -> Result<Row, AccessError> {
    let mut row = into_row(serde_json::to_value(record)?)?;
    row.remove(E::model().primary_key_field());
    Ok(row)
}

fn from_row<E: Entity>(row: Row) -> Result<E, AccessError> {
    Ok(serde_json::from_value(serde_json::Value::Object(row))?)
}

impl<E: Entity> Repository<E> {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    fn table(&self) -> &'static str {
        let model: &'static dyn Model = E::model();
        model.table_name()
    }

    /// Validates and stores a new record. Any id in `input` is discarded; the store assigns one.
    pub async fn create(&self, input: E::Input) -> Result<E, AccessError> {
        let record = E::build(input)?;
        let stored = self.store.insert(E::model(), to_row(&record)?).await?;
        let created: E = from_row(stored)?;
        tracing::info!(table = self.table(), id = created.id(), "created record");
        Ok(created)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<E>, AccessError> {
        self.store
            .fetch(E::model(), id)
            .await?
            .map(from_row)
            .transpose()
    }

    pub async fn find_all(&self) -> Result<Vec<E>, AccessError> {
        self.store
            .fetch_all(E::model())
            .await?
            .into_iter()
            .map(from_row)
            .collect()
    }

    /// Records that reference `parent_id`. Empty when the parent is unknown or the entity
    /// type has no parent.
    pub async fn find_by_parent_id(&self, parent_id: i32) -> Result<Vec<E>, AccessError> {
        self.store
            .fetch_by_parent(E::model(), parent_id)
            .await?
            .into_iter()
            .map(from_row)
            .collect()
    }

    /// Merges the fields present in `partial` onto the stored record and persists the result.
    pub async fn update(&self, id: i32, partial: E::Input) -> Result<E, AccessError> {
        let apply = Box::new(move |row: Row| {
            let mut current: E = from_row(row)?;
            current.merge(partial)?;
            to_row(&current)
        });
        let stored = self
            .store
            .update(E::model(), id, apply)
            .await?
            .ok_or_else(|| AccessError::not_found(self.table(), id))?;
        let updated: E = from_row(stored)?;
        tracing::info!(table = self.table(), id, "updated record");
        Ok(updated)
    }

    /// Returns whether a record existed and was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, AccessError> {
        let removed = self.store.delete(E::model(), id).await?;
        if removed {
            tracing::info!(table = self.table(), id, "deleted record");
        } else {
            tracing::debug!(table = self.table(), id, "delete of missing record");
        }
        Ok(removed)
    }
}
