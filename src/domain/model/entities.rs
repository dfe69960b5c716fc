//! Typed records for the seven restaurant tables.
//!
//! Records serialize to their row shape (column names), which is what the stores persist.
//! Each record has a matching `*Input` carrying optional fields: on create the required ones
//! must be present, on update only the present ones are merged.

use crate::domain::error::AccessError;
use crate::domain::model::tables::{
    DISH, EXPERIENCE, HAVE_TRIED, LOCATION, RATING, RESTAURANT, WANT_TO_TRY,
};
use crate::domain::model::Model;
use crate::domain::validate::{require, validate_location, validate_rating_score};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Id carried by a record that has not been stored yet. The store never assigns it.
pub const UNASSIGNED_ID: i32 = 0;

/// A record type managed by the access layer.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Partial record used for both create and update requests.
    type Input: Default + Send + 'static;

    /// The table this record lives in.
    fn model() -> &'static dyn Model;

    fn id(&self) -> i32;

    /// Builds a new, unstored record. Any id in `input` is ignored.
    fn build(input: Self::Input) -> Result<Self, AccessError>;

    /// Overwrites the fields present in `input` and re-validates the result.
    fn merge(&mut self, input: Self::Input) -> Result<(), AccessError>;
}

// ---------------- Location ----------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: i32,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, Default)]
pub struct LocationInput {
    pub id: Option<i32>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl Entity for Location {
    type Input = LocationInput;

    fn model() -> &'static dyn Model {
        &LOCATION
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn build(input: LocationInput) -> Result<Self, AccessError> {
        let city = require("city", input.city)?;
        let state = require("state", input.state)?;
        let state = validate_location(&city, &state)?;
        Ok(Location {
            id: UNASSIGNED_ID,
            city,
            state,
        })
    }

    fn merge(&mut self, input: LocationInput) -> Result<(), AccessError> {
        if let Some(city) = input.city {
            self.city = city;
        }
        if let Some(state) = input.state {
            self.state = state;
        }
        self.state = validate_location(&self.city, &self.state)?;
        Ok(())
    }
}

// ---------------- Restaurant ----------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i32,
    pub location_id: i32,
    #[serde(rename = "restaurant_name")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub cuisine: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RestaurantInput {
    pub id: Option<i32>,
    pub location_id: Option<i32>,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub cuisine: Option<String>,
}

impl Entity for Restaurant {
    type Input = RestaurantInput;

    fn model() -> &'static dyn Model {
        &RESTAURANT
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn build(input: RestaurantInput) -> Result<Self, AccessError> {
        Ok(Restaurant {
            id: UNASSIGNED_ID,
            location_id: require("location", input.location_id)?,
            name: input.name,
            kind: input.kind,
            cuisine: input.cuisine,
        })
    }

    fn merge(&mut self, input: RestaurantInput) -> Result<(), AccessError> {
        if let Some(location_id) = input.location_id {
            self.location_id = location_id;
        }
        if input.name.is_some() {
            self.name = input.name;
        }
        if input.kind.is_some() {
            self.kind = input.kind;
        }
        if input.cuisine.is_some() {
            self.cuisine = input.cuisine;
        }
        Ok(())
    }
}

// ---------------- WantToTry ----------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WantToTry {
    pub id: i32,
    pub restaurant_id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct WantToTryInput {
    pub id: Option<i32>,
    pub restaurant_id: Option<i32>,
}

impl Entity for WantToTry {
    type Input = WantToTryInput;

    fn model() -> &'static dyn Model {
        &WANT_TO_TRY
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn build(input: WantToTryInput) -> Result<Self, AccessError> {
        Ok(WantToTry {
            id: UNASSIGNED_ID,
            restaurant_id: require("restaurant", input.restaurant_id)?,
        })
    }

    fn merge(&mut self, input: WantToTryInput) -> Result<(), AccessError> {
        if let Some(restaurant_id) = input.restaurant_id {
            self.restaurant_id = restaurant_id;
        }
        Ok(())
    }
}

// ---------------- HaveTried ----------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HaveTried {
    pub id: i32,
    pub restaurant_id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct HaveTriedInput {
    pub id: Option<i32>,
    pub restaurant_id: Option<i32>,
}

impl Entity for HaveTried {
    type Input = HaveTriedInput;

    fn model() -> &'static dyn Model {
        &HAVE_TRIED
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn build(input: HaveTriedInput) -> Result<Self, AccessError> {
        Ok(HaveTried {
            id: UNASSIGNED_ID,
            restaurant_id: require("restaurant", input.restaurant_id)?,
        })
    }

    fn merge(&mut self, input: HaveTriedInput) -> Result<(), AccessError> {
        if let Some(restaurant_id) = input.restaurant_id {
            self.restaurant_id = restaurant_id;
        }
        Ok(())
    }
}

// ---------------- Rating ----------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub id: i32,
    pub have_tried_id: i32,
    pub food_rating: Option<i32>,
    pub vibe_rating: Option<i32>,
    #[serde(rename = "rating_description")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RatingInput {
    pub id: Option<i32>,
    pub have_tried_id: Option<i32>,
    pub food_rating: Option<i32>,
    pub vibe_rating: Option<i32>,
    pub description: Option<String>,
}

impl Rating {
    fn validate_scores(&self) -> Result<(), AccessError> {
        validate_rating_score("foodRating", self.food_rating)?;
        validate_rating_score("vibeRating", self.vibe_rating)
    }
}

impl Entity for Rating {
    type Input = RatingInput;

    fn model() -> &'static dyn Model {
        &RATING
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn build(input: RatingInput) -> Result<Self, AccessError> {
        let rating = Rating {
            id: UNASSIGNED_ID,
            have_tried_id: require("haveTried", input.have_tried_id)?,
            food_rating: input.food_rating,
            vibe_rating: input.vibe_rating,
            description: input.description,
        };
        rating.validate_scores()?;
        Ok(rating)
    }

    fn merge(&mut self, input: RatingInput) -> Result<(), AccessError> {
        if let Some(have_tried_id) = input.have_tried_id {
            self.have_tried_id = have_tried_id;
        }
        if input.food_rating.is_some() {
            self.food_rating = input.food_rating;
        }
        if input.vibe_rating.is_some() {
            self.vibe_rating = input.vibe_rating;
        }
        if input.description.is_some() {
            self.description = input.description;
        }
        self.validate_scores()
    }
}

// ---------------- Experience ----------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: i32,
    pub have_tried_id: i32,
    #[serde(rename = "experience_date")]
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ExperienceInput {
    pub id: Option<i32>,
    pub have_tried_id: Option<i32>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl Entity for Experience {
    type Input = ExperienceInput;

    fn model() -> &'static dyn Model {
        &EXPERIENCE
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn build(input: ExperienceInput) -> Result<Self, AccessError> {
        Ok(Experience {
            id: UNASSIGNED_ID,
            have_tried_id: require("haveTried", input.have_tried_id)?,
            date: input.date,
            description: input.description,
        })
    }

    fn merge(&mut self, input: ExperienceInput) -> Result<(), AccessError> {
        if let Some(have_tried_id) = input.have_tried_id {
            self.have_tried_id = have_tried_id;
        }
        if input.date.is_some() {
            self.date = input.date;
        }
        if input.description.is_some() {
            self.description = input.description;
        }
        Ok(())
    }
}

// ---------------- Dish ----------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: i32,
    pub have_tried_id: i32,
    #[serde(rename = "dish_name")]
    pub name: Option<String>,
    #[serde(rename = "food_description")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DishInput {
    pub id: Option<i32>,
    pub have_tried_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Entity for Dish {
    type Input = DishInput;

    fn model() -> &'static dyn Model {
        &DISH
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn build(input: DishInput) -> Result<Self, AccessError> {
        Ok(Dish {
            id: UNASSIGNED_ID,
            have_tried_id: require("haveTried", input.have_tried_id)?,
            name: input.name,
            description: input.description,
        })
    }

    fn merge(&mut self, input: DishInput) -> Result<(), AccessError> {
        if let Some(have_tried_id) = input.have_tried_id {
            self.have_tried_id = have_tried_id;
        }
        if input.name.is_some() {
            self.name = input.name;
        }
        if input.description.is_some() {
            self.description = input.description;
        }
        Ok(())
    }
}
