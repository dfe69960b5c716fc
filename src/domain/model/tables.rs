use crate::domain::model::{Model, OnDelete, ParentLink};

/// Static description of one table.
pub struct TableModel {
    table_name: &'static str,
    create_table_sql: &'static str,
    /// `(column, sql type)` pairs for every non-key column.
    column_types: &'static [(&'static str, &'static str)],
    parent: Option<ParentLink>,
}

impl TableModel {
    pub const fn new(
        table_name: &'static str,
        create_table_sql: &'static str,
        column_types: &'static [(&'static str, &'static str)],
        parent: Option<ParentLink>,
    ) -> Self {
        Self {
            table_name,
            create_table_sql,
            column_types,
            parent,
        }
    }
}

impl Model for TableModel {
    fn table_name(&self) -> &str {
        self.table_name
    }

    fn get_create_table_sql(&self) -> &str {
        self.create_table_sql
    }

    fn column_type(&self, column: &str) -> Option<&str> {
        if column == self.primary_key_field() {
            return Some("int4");
        }
        self.column_types
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, sql_type)| *sql_type)
    }

    fn parent(&self) -> Option<ParentLink> {
        self.parent
    }
}

pub static LOCATION: TableModel = TableModel::new(
    "location",
    "CREATE TABLE IF NOT EXISTS location (
        id SERIAL PRIMARY KEY,
        city TEXT NOT NULL,
        state TEXT NOT NULL
    )",
    &[("city", "text"), ("state", "text")],
    None,
);

pub static RESTAURANT: TableModel = TableModel::new(
    "restaurant",
    "CREATE TABLE IF NOT EXISTS restaurant (
        id SERIAL PRIMARY KEY,
        location_id INTEGER NOT NULL REFERENCES location(id),
        restaurant_name TEXT,
        type TEXT,
        cuisine TEXT
    )",
    &[
        ("location_id", "int4"),
        ("restaurant_name", "text"),
        ("type", "text"),
        ("cuisine", "text"),
    ],
    Some(ParentLink {
        table: "location",
        column: "location_id",
        on_delete: OnDelete::Restrict,
    }),
);

pub static WANT_TO_TRY: TableModel = TableModel::new(
    "want_to_try",
    "CREATE TABLE IF NOT EXISTS want_to_try (
        id SERIAL PRIMARY KEY,
        restaurant_id INTEGER NOT NULL REFERENCES restaurant(id)
    )",
    &[("restaurant_id", "int4")],
    Some(ParentLink {
        table: "restaurant",
        column: "restaurant_id",
        on_delete: OnDelete::Restrict,
    }),
);

pub static HAVE_TRIED: TableModel = TableModel::new(
    "have_tried",
    "CREATE TABLE IF NOT EXISTS have_tried (
        id SERIAL PRIMARY KEY,
        restaurant_id INTEGER NOT NULL REFERENCES restaurant(id)
    )",
    &[("restaurant_id", "int4")],
    Some(ParentLink {
        table: "restaurant",
        column: "restaurant_id",
        on_delete: OnDelete::Restrict,
    }),
);

// Children of have_tried use a plain foreign key; the store removes them explicitly
// inside the parent's delete transaction.
pub static RATING: TableModel = TableModel::new(
    "rating",
    "CREATE TABLE IF NOT EXISTS rating (
        id SERIAL PRIMARY KEY,
        have_tried_id INTEGER NOT NULL REFERENCES have_tried(id),
        food_rating INTEGER CHECK (food_rating BETWEEN 1 AND 5),
        vibe_rating INTEGER CHECK (vibe_rating BETWEEN 1 AND 5),
        rating_description TEXT
    )",
    &[
        ("have_tried_id", "int4"),
        ("food_rating", "int4"),
        ("vibe_rating", "int4"),
        ("rating_description", "text"),
    ],
    Some(ParentLink {
        table: "have_tried",
        column: "have_tried_id",
        on_delete: OnDelete::Cascade,
    }),
);

pub static EXPERIENCE: TableModel = TableModel::new(
    "experience",
    "CREATE TABLE IF NOT EXISTS experience (
        id SERIAL PRIMARY KEY,
        have_tried_id INTEGER NOT NULL REFERENCES have_tried(id),
        experience_date DATE,
        description TEXT
    )",
    &[
        ("have_tried_id", "int4"),
        ("experience_date", "date"),
        ("description", "text"),
    ],
    Some(ParentLink {
        table: "have_tried",
        column: "have_tried_id",
        on_delete: OnDelete::Cascade,
    }),
);

pub static DISH: TableModel = TableModel::new(
    "dish",
    "CREATE TABLE IF NOT EXISTS dish (
        id SERIAL PRIMARY KEY,
        have_tried_id INTEGER NOT NULL REFERENCES have_tried(id),
        dish_name TEXT,
        food_description TEXT
    )",
    &[
        ("have_tried_id", "int4"),
        ("dish_name", "text"),
        ("food_description", "text"),
    ],
    Some(ParentLink {
        table: "have_tried",
        column: "have_tried_id",
        on_delete: OnDelete::Cascade,
    }),
);
