use crate::app::RestaurantService;
use crate::domain::model::{
    Dish, DishInput, Entity, Experience, ExperienceInput, HaveTried, HaveTriedInput, Location,
    LocationInput, Rating, RatingInput, Restaurant, RestaurantInput, WantToTry, WantToTryInput,
};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RestaurantService>,
}

/// Envelope for errors and for the health check.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reference to a parent record. Only the id travels over the wire.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub struct IdRef {
    pub id: i32,
}

impl From<i32> for IdRef {
    fn from(id: i32) -> Self {
        IdRef { id }
    }
}

fn ref_id(reference: Option<IdRef>) -> Option<i32> {
    reference.map(|r| r.id)
}

/// An entity exposed over HTTP: the request body it accepts and the shape it is returned in.
pub trait Resource: Entity {
    type Body: DeserializeOwned + Send + Into<<Self as Entity>::Input>;
    type View: Serialize + Send + From<Self>;
}

// ---------------- Location ----------------

/// Create or update request. On create `id` is ignored; on update absent fields are kept.
#[derive(Deserialize, Serialize, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationBody {
    pub id: Option<i32>,
    pub city: Option<String>,
    /// Two-letter US state or DC abbreviation, any case.
    pub state: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationView {
    pub id: i32,
    pub city: String,
    pub state: String,
}

impl From<LocationBody> for LocationInput {
    fn from(body: LocationBody) -> Self {
        LocationInput {
            id: body.id,
            city: body.city,
            state: body.state,
        }
    }
}

impl From<Location> for LocationView {
    fn from(l: Location) -> Self {
        LocationView {
            id: l.id,
            city: l.city,
            state: l.state,
        }
    }
}

impl Resource for Location {
    type Body = LocationBody;
    type View = LocationView;
}

// ---------------- Restaurant ----------------

#[derive(Deserialize, Serialize, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantBody {
    pub id: Option<i32>,
    #[serde(alias = "name")]
    pub restaurant_name: Option<String>,
    pub location: Option<IdRef>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub cuisine: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantView {
    pub id: i32,
    pub restaurant_name: Option<String>,
    pub location: IdRef,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub cuisine: Option<String>,
}

impl From<RestaurantBody> for RestaurantInput {
    fn from(body: RestaurantBody) -> Self {
        RestaurantInput {
            id: body.id,
            location_id: ref_id(body.location),
            name: body.restaurant_name,
            kind: body.kind,
            cuisine: body.cuisine,
        }
    }
}

impl From<Restaurant> for RestaurantView {
    fn from(r: Restaurant) -> Self {
        RestaurantView {
            id: r.id,
            restaurant_name: r.name,
            location: r.location_id.into(),
            kind: r.kind,
            cuisine: r.cuisine,
        }
    }
}

impl Resource for Restaurant {
    type Body = RestaurantBody;
    type View = RestaurantView;
}

// ---------------- WantToTry / HaveTried ----------------

/// Body shared by the two restaurant join records.
#[derive(Deserialize, Serialize, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitBody {
    pub id: Option<i32>,
    pub restaurant: Option<IdRef>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitView {
    pub id: i32,
    pub restaurant: IdRef,
}

impl From<VisitBody> for WantToTryInput {
    fn from(body: VisitBody) -> Self {
        WantToTryInput {
            id: body.id,
            restaurant_id: ref_id(body.restaurant),
        }
    }
}

impl From<VisitBody> for HaveTriedInput {
    fn from(body: VisitBody) -> Self {
        HaveTriedInput {
            id: body.id,
            restaurant_id: ref_id(body.restaurant),
        }
    }
}

impl From<WantToTry> for VisitView {
    fn from(w: WantToTry) -> Self {
        VisitView {
            id: w.id,
            restaurant: w.restaurant_id.into(),
        }
    }
}

impl From<HaveTried> for VisitView {
    fn from(h: HaveTried) -> Self {
        VisitView {
            id: h.id,
            restaurant: h.restaurant_id.into(),
        }
    }
}

impl Resource for WantToTry {
    type Body = VisitBody;
    type View = VisitView;
}

impl Resource for HaveTried {
    type Body = VisitBody;
    type View = VisitView;
}

// ---------------- Rating ----------------

#[derive(Deserialize, Serialize, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingBody {
    pub id: Option<i32>,
    pub have_tried: Option<IdRef>,
    /// 1 to 5.
    pub food_rating: Option<i32>,
    /// 1 to 5.
    pub vibe_rating: Option<i32>,
    #[serde(alias = "description")]
    pub rating_description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingView {
    pub id: i32,
    pub have_tried: IdRef,
    pub food_rating: Option<i32>,
    pub vibe_rating: Option<i32>,
    pub rating_description: Option<String>,
}

impl From<RatingBody> for RatingInput {
    fn from(body: RatingBody) -> Self {
        RatingInput {
            id: body.id,
            have_tried_id: ref_id(body.have_tried),
            food_rating: body.food_rating,
            vibe_rating: body.vibe_rating,
            description: body.rating_description,
        }
    }
}

impl From<Rating> for RatingView {
    fn from(r: Rating) -> Self {
        RatingView {
            id: r.id,
            have_tried: r.have_tried_id.into(),
            food_rating: r.food_rating,
            vibe_rating: r.vibe_rating,
            rating_description: r.description,
        }
    }
}

impl Resource for Rating {
    type Body = RatingBody;
    type View = RatingView;
}

// ---------------- Experience ----------------

#[derive(Deserialize, Serialize, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceBody {
    pub id: Option<i32>,
    pub have_tried: Option<IdRef>,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceView {
    pub id: i32,
    pub have_tried: IdRef,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl From<ExperienceBody> for ExperienceInput {
    fn from(body: ExperienceBody) -> Self {
        ExperienceInput {
            id: body.id,
            have_tried_id: ref_id(body.have_tried),
            date: body.date,
            description: body.description,
        }
    }
}

impl From<Experience> for ExperienceView {
    fn from(e: Experience) -> Self {
        ExperienceView {
            id: e.id,
            have_tried: e.have_tried_id.into(),
            date: e.date,
            description: e.description,
        }
    }
}

impl Resource for Experience {
    type Body = ExperienceBody;
    type View = ExperienceView;
}

// ---------------- Dish ----------------

#[derive(Deserialize, Serialize, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishBody {
    pub id: Option<i32>,
    pub have_tried: Option<IdRef>,
    #[serde(alias = "name")]
    pub dish_name: Option<String>,
    #[serde(alias = "description")]
    pub food_description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishView {
    pub id: i32,
    pub have_tried: IdRef,
    pub dish_name: Option<String>,
    pub food_description: Option<String>,
}

impl From<DishBody> for DishInput {
    fn from(body: DishBody) -> Self {
        DishInput {
            id: body.id,
            have_tried_id: ref_id(body.have_tried),
            name: body.dish_name,
            description: body.food_description,
        }
    }
}

impl From<Dish> for DishView {
    fn from(d: Dish) -> Self {
        DishView {
            id: d.id,
            have_tried: d.have_tried_id.into(),
            dish_name: d.name,
            food_description: d.description,
        }
    }
}

impl Resource for Dish {
    type Body = DishBody;
    type View = DishView;
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(format!("Invalid JSON body: {} (expected: {})", err, expected)),
        }),
    )
}
