//! Entity Store: persistence of rows, identity assignment and cascade delete.

use crate::domain::error::AccessError;
use crate::domain::model::{Model, ParentLink};
use async_trait::async_trait;
use serde_json::Value as JsonValue;

pub mod memory;
pub mod postgres;

pub use memory::MemoryEntityStore;
pub use postgres::PgEntityStore;

/// One stored row as a JSON object keyed by column name.
pub type Row = serde_json::Map<String, JsonValue>;

/// Transformation applied to a row inside the store's update unit.
pub type RowUpdate = Box<dyn FnOnce(Row) -> Result<Row, AccessError> + Send>;

/// Storage boundary used by the access layer.
///
/// Every mutating call is one atomic unit: either all of its changes commit or none do.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Inserts `row` (without its primary key) and returns the stored row with the assigned id.
    /// Fails with `AccessError::Reference` if the row's parent does not exist.
    async fn insert(&self, model: &'static dyn Model, row: Row) -> Result<Row, AccessError>;

    async fn fetch(&self, model: &'static dyn Model, id: i32) -> Result<Option<Row>, AccessError>;

    /// All rows in id order.
    async fn fetch_all(&self, model: &'static dyn Model) -> Result<Vec<Row>, AccessError>;

    /// Rows whose parent column equals `parent_id`. Empty for models without a parent.
    async fn fetch_by_parent(
        &self,
        model: &'static dyn Model,
        parent_id: i32,
    ) -> Result<Vec<Row>, AccessError>;

    /// Reads the row, applies `apply` and writes the result back, holding the row for the
    /// whole unit. Returns `Ok(None)` if no row has this id.
    async fn update(
        &self,
        model: &'static dyn Model,
        id: i32,
        apply: RowUpdate,
    ) -> Result<Option<Row>, AccessError>;

    /// Deletes the row and every cascading child. Returns whether the row existed.
    async fn delete(&self, model: &'static dyn Model, id: i32) -> Result<bool, AccessError>;

    /// Cheap connectivity check used by the health endpoint.
    async fn ping(&self) -> Result<(), AccessError>;
}

/// Reads the parent id a row points at.
pub fn parent_id_of(row: &Row, link: &ParentLink) -> Result<i32, AccessError> {
    row.get(link.column)
        .and_then(JsonValue::as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| AccessError::validation(format!("{} is required", link.column)))
}

pub fn into_row(value: JsonValue) -> Result<Row, AccessError> {
    match value {
        JsonValue::Object(map) => Ok(map),
        other => Err(AccessError::Storage(format!(
            "expected a JSON object row, got {}",
            other
        ))),
    }
}
