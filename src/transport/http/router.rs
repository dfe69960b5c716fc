use crate::transport::http::handlers::health;
use crate::transport::http::handlers::resources::{
    dishes, experiences, have_tried, locations, ratings, restaurants, want_to_try,
};
use crate::transport::http::types::{
    ApiResponse, AppState, DishBody, DishView, ExperienceBody, ExperienceView, IdRef, LocationBody,
    LocationView, RatingBody, RatingView, RestaurantBody, RestaurantView, VisitBody, VisitView,
};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        locations::list,
        locations::get_by_id,
        locations::create,
        locations::update,
        locations::delete,
        restaurants::list,
        restaurants::get_by_id,
        restaurants::list_by_parent,
        restaurants::create,
        restaurants::update,
        restaurants::delete,
        want_to_try::list,
        want_to_try::get_by_id,
        want_to_try::list_by_parent,
        want_to_try::create,
        want_to_try::update,
        want_to_try::delete,
        have_tried::list,
        have_tried::get_by_id,
        have_tried::list_by_parent,
        have_tried::create,
        have_tried::update,
        have_tried::delete,
        ratings::list,
        ratings::get_by_id,
        ratings::list_by_parent,
        ratings::create,
        ratings::update,
        ratings::delete,
        experiences::list,
        experiences::get_by_id,
        experiences::list_by_parent,
        experiences::create,
        experiences::update,
        experiences::delete,
        dishes::list,
        dishes::get_by_id,
        dishes::list_by_parent,
        dishes::create,
        dishes::update,
        dishes::delete
    ),
    components(schemas(
        ApiResponse,
        IdRef,
        LocationBody,
        LocationView,
        RestaurantBody,
        RestaurantView,
        VisitBody,
        VisitView,
        RatingBody,
        RatingView,
        ExperienceBody,
        ExperienceView,
        DishBody,
        DishView
    )),
    tags(
        (name = "locations", description = "Cities the tracker knows about"),
        (name = "restaurants", description = "Restaurants, each in one location"),
        (name = "want-to-try", description = "Restaurants on the wish list"),
        (name = "have-tried", description = "Restaurant visits; deleting one removes its ratings, experiences and dishes"),
        (name = "ratings"),
        (name = "experiences"),
        (name = "dishes")
    )
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/locations", get(locations::list).post(locations::create))
        .route(
            "/api/locations/:id",
            get(locations::get_by_id)
                .put(locations::update)
                .delete(locations::delete),
        )
        .route("/api/restaurants", get(restaurants::list).post(restaurants::create))
        .route(
            "/api/restaurants/:id",
            get(restaurants::get_by_id)
                .put(restaurants::update)
                .delete(restaurants::delete),
        )
        .route(
            "/api/restaurants/by-location/:parent_id",
            get(restaurants::list_by_parent),
        )
        .route("/api/wanttotry", get(want_to_try::list).post(want_to_try::create))
        .route(
            "/api/wanttotry/:id",
            get(want_to_try::get_by_id)
                .put(want_to_try::update)
                .delete(want_to_try::delete),
        )
        .route(
            "/api/wanttotry/by-restaurant/:parent_id",
            get(want_to_try::list_by_parent),
        )
        .route("/api/havetried", get(have_tried::list).post(have_tried::create))
        .route(
            "/api/havetried/:id",
            get(have_tried::get_by_id)
                .put(have_tried::update)
                .delete(have_tried::delete),
        )
        .route(
            "/api/havetried/by-restaurant/:parent_id",
            get(have_tried::list_by_parent),
        )
        .route("/api/ratings", get(ratings::list).post(ratings::create))
        .route(
            "/api/ratings/:id",
            get(ratings::get_by_id)
                .put(ratings::update)
                .delete(ratings::delete),
        )
        .route("/api/ratings/by-havetried/:parent_id", get(ratings::list_by_parent))
        .route("/api/experiences", get(experiences::list).post(experiences::create))
        .route(
            "/api/experiences/:id",
            get(experiences::get_by_id)
                .put(experiences::update)
                .delete(experiences::delete),
        )
        .route(
            "/api/experiences/by-havetried/:parent_id",
            get(experiences::list_by_parent),
        )
        .route("/api/dishes", get(dishes::list).post(dishes::create))
        .route(
            "/api/dishes/:id",
            get(dishes::get_by_id)
                .put(dishes::update)
                .delete(dishes::delete),
        )
        .route("/api/dishes/by-havetried/:parent_id", get(dishes::list_by_parent))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
