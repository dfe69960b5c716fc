//! Domain model definitions: table descriptions and the typed records stored in them.

pub mod entities;
pub mod registry;
pub mod tables;

pub use entities::{
    Dish, DishInput, Entity, Experience, ExperienceInput, HaveTried, HaveTriedInput, Location,
    LocationInput, Rating, RatingInput, Restaurant, RestaurantInput, WantToTry, WantToTryInput,
};
pub use registry::ModelRegistry;
pub use tables::TableModel;

/// What happens to child rows when the parent they reference is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    /// The parent delete is rejected while children exist.
    Restrict,
    /// Children are removed in the same atomic unit as the parent.
    Cascade,
}

/// Foreign key from a child table to its parent.
#[derive(Debug, Clone, Copy)]
pub struct ParentLink {
    pub table: &'static str,
    pub column: &'static str,
    pub on_delete: OnDelete,
}

/// Trait that defines the contract for any stored model.
///
/// Stores work against this description only; they never know the concrete record type.
/// Each implementation provides:
/// - Table name and primary key information
/// - SQL schema definition
/// - Column typing metadata for casting bound parameters
/// - The parent link used for reference checks and cascade delete
pub trait Model: Send + Sync {
    /// Returns the name of the database table for this model.
    fn table_name(&self) -> &str;

    /// Returns the name of the primary key field for this model.
    fn primary_key_field(&self) -> &str {
        "id"
    }

    /// Returns the SQL CREATE TABLE statement for this model.
    fn get_create_table_sql(&self) -> &str;

    /// SQL type of a column, used to cast bound parameters.
    fn column_type(&self, _column: &str) -> Option<&str> {
        None
    }

    /// The table this model references, if any.
    fn parent(&self) -> Option<ParentLink> {
        None
    }
}
