//! ModelRegistry listing every table the service owns, in parent-first order.

use crate::domain::model::tables::{
    DISH, EXPERIENCE, HAVE_TRIED, LOCATION, RATING, RESTAURANT, WANT_TO_TRY,
};
use crate::domain::model::{Model, OnDelete};

/// Ordered set of models. Parents always precede the tables that reference them.
#[derive(Clone)]
pub struct ModelRegistry {
    models: Vec<&'static dyn Model>,
}

impl ModelRegistry {
    /// Creates a new empty ModelRegistry.
    pub fn new() -> Self {
        Self { models: Vec::new() }
    }

    /// The seven restaurant tables.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(&LOCATION);
        registry.register(&RESTAURANT);
        registry.register(&WANT_TO_TRY);
        registry.register(&HAVE_TRIED);
        registry.register(&RATING);
        registry.register(&EXPERIENCE);
        registry.register(&DISH);
        registry
    }

    /// Registers a model. Replaces an existing model with the same table name.
    pub fn register(&mut self, model: &'static dyn Model) {
        if let Some(slot) = self
            .models
            .iter_mut()
            .find(|m| m.table_name() == model.table_name())
        {
            *slot = model;
        } else {
            self.models.push(model);
        }
    }

    /// Retrieves a model by table name.
    pub fn get(&self, table_name: &str) -> Option<&'static dyn Model> {
        self.models
            .iter()
            .copied()
            .find(|m| m.table_name() == table_name)
    }

    /// Returns all registered table names in registration order.
    pub fn list_models(&self) -> Vec<String> {
        self.models
            .iter()
            .map(|m| m.table_name().to_string())
            .collect()
    }

    /// Returns all CREATE TABLE SQL statements in parent-first order.
    pub fn get_all_create_table_sql(&self) -> Vec<&str> {
        self.models
            .iter()
            .map(|model| model.get_create_table_sql())
            .collect()
    }

    /// Models whose parent link points at `table_name` with the given policy.
    pub fn children_of(&self, table_name: &str, on_delete: OnDelete) -> Vec<&'static dyn Model> {
        self.models
            .iter()
            .copied()
            .filter(|m| {
                m.parent()
                    .map(|link| link.table == table_name && link.on_delete == on_delete)
                    .unwrap_or(false)
            })
            .collect()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parents_are_registered_before_children() {
        let registry = ModelRegistry::standard();
        let names = registry.list_models();
        for model in registry.models.iter() {
            if let Some(link) = model.parent() {
                let parent_pos = names.iter().position(|n| n == link.table).unwrap();
                let child_pos = names.iter().position(|n| n == model.table_name()).unwrap();
                assert!(parent_pos < child_pos, "{} listed before its parent", model.table_name());
            }
        }
    }

    #[test]
    fn have_tried_cascades_to_its_three_children() {
        let registry = ModelRegistry::standard();
        let mut cascades: Vec<String> = registry
            .children_of("have_tried", OnDelete::Cascade)
            .iter()
            .map(|m| m.table_name().to_string())
            .collect();
        cascades.sort();
        assert_eq!(cascades, vec!["dish", "experience", "rating"]);
        assert!(registry.children_of("have_tried", OnDelete::Restrict).is_empty());
        assert_eq!(registry.children_of("restaurant", OnDelete::Restrict).len(), 2);
    }
}
