//! CRUD handlers for every entity.
//!
//! The work lives in a handful of generic functions; `resource_handlers!` stamps out one
//! module of thin, OpenAPI-annotated axum handlers per entity on top of them.

use crate::domain::model::{
    Dish, Entity, Experience, HaveTried, Location, Rating, Restaurant, WantToTry,
};
use crate::transport::http::handlers::common::{error_response, not_found, parse_id};
use crate::transport::http::types::{
    json_422, ApiResponse, AppState, DishBody, DishView, ExperienceBody, ExperienceView,
    LocationBody, LocationView, RatingBody, RatingView, Resource, RestaurantBody, RestaurantView,
    VisitBody, VisitView,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

fn table_of<E: Entity>() -> &'static str {
    E::model().table_name()
}

fn view_response<E: Resource>(status: StatusCode, record: E) -> Response {
    (status, Json(E::View::from(record))).into_response()
}

fn views_response<E: Resource>(records: Vec<E>) -> Response {
    let views: Vec<E::View> = records.into_iter().map(E::View::from).collect();
    (StatusCode::OK, Json(views)).into_response()
}

pub async fn list_records<E: Resource>(state: &AppState) -> Response {
    match state.service.repository::<E>().find_all().await {
        Ok(records) => views_response(records),
        Err(e) => error_response(e),
    }
}

pub async fn get_record<E: Resource>(state: &AppState, raw_id: &str) -> Response {
    let Some(id) = parse_id(raw_id) else {
        return not_found(table_of::<E>(), raw_id);
    };
    match state.service.repository::<E>().find_by_id(id).await {
        Ok(Some(record)) => view_response(StatusCode::OK, record),
        Ok(None) => not_found(table_of::<E>(), raw_id),
        Err(e) => error_response(e),
    }
}

/// Children of one parent. An unparseable parent id matches nothing.
pub async fn list_records_by_parent<E: Resource>(state: &AppState, raw_parent_id: &str) -> Response {
    let Some(parent_id) = parse_id(raw_parent_id) else {
        return views_response::<E>(Vec::new());
    };
    match state
        .service
        .repository::<E>()
        .find_by_parent_id(parent_id)
        .await
    {
        Ok(records) => views_response(records),
        Err(e) => error_response(e),
    }
}

pub async fn create_record<E: Resource>(
    state: &AppState,
    payload: Result<Json<E::Body>, JsonRejection>,
    expected: &str,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(e) => return json_422(e, expected).into_response(),
    };
    match state.service.repository::<E>().create(body.into()).await {
        Ok(record) => view_response(StatusCode::OK, record),
        Err(e) => error_response(e),
    }
}

pub async fn update_record<E: Resource>(
    state: &AppState,
    raw_id: &str,
    payload: Result<Json<E::Body>, JsonRejection>,
    expected: &str,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(e) => return json_422(e, expected).into_response(),
    };
    let Some(id) = parse_id(raw_id) else {
        return not_found(table_of::<E>(), raw_id);
    };
    match state.service.repository::<E>().update(id, body.into()).await {
        Ok(record) => view_response(StatusCode::OK, record),
        Err(e) => error_response(e),
    }
}

pub async fn delete_record<E: Resource>(state: &AppState, raw_id: &str) -> Response {
    let Some(id) = parse_id(raw_id) else {
        return not_found(table_of::<E>(), raw_id);
    };
    match state.service.repository::<E>().delete(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found(table_of::<E>(), raw_id),
        Err(e) => error_response(e),
    }
}

macro_rules! resource_handlers {
    (@crud $entity:ident, $body:ident, $view:ident, $tag:tt, $collection:tt, $item:tt) => {
        #[utoipa::path(
            get,
            path = $collection,
            tag = $tag,
            responses(
                (status = 200, description = "All records", body = [$view]),
                (status = 500, description = "Storage failure", body = ApiResponse)
            )
        )]
        pub async fn list(State(state): State<AppState>) -> Response {
            list_records::<$entity>(&state).await
        }

        #[utoipa::path(
            get,
            path = $item,
            tag = $tag,
            params(("id" = i32, Path, description = "Record id")),
            responses(
                (status = 200, description = "The record", body = $view),
                (status = 404, description = "No record with this id", body = ApiResponse)
            )
        )]
        pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> Response {
            get_record::<$entity>(&state, &id).await
        }

        #[utoipa::path(
            post,
            path = $collection,
            tag = $tag,
            request_body = $body,
            responses(
                (status = 200, description = "Created record with its assigned id", body = $view),
                (status = 400, description = "Validation or reference error", body = ApiResponse),
                (status = 422, description = "Malformed JSON body", body = ApiResponse)
            )
        )]
        pub async fn create(
            State(state): State<AppState>,
            payload: Result<Json<$body>, JsonRejection>,
        ) -> Response {
            create_record::<$entity>(&state, payload, stringify!($body)).await
        }

        #[utoipa::path(
            put,
            path = $item,
            tag = $tag,
            params(("id" = i32, Path, description = "Record id")),
            request_body = $body,
            responses(
                (status = 200, description = "Updated record", body = $view),
                (status = 400, description = "Validation or reference error", body = ApiResponse),
                (status = 404, description = "No record with this id", body = ApiResponse),
                (status = 422, description = "Malformed JSON body", body = ApiResponse)
            )
        )]
        pub async fn update(
            State(state): State<AppState>,
            Path(id): Path<String>,
            payload: Result<Json<$body>, JsonRejection>,
        ) -> Response {
            update_record::<$entity>(&state, &id, payload, stringify!($body)).await
        }

        #[utoipa::path(
            delete,
            path = $item,
            tag = $tag,
            params(("id" = i32, Path, description = "Record id")),
            responses(
                (status = 204, description = "Deleted"),
                (status = 404, description = "No record with this id", body = ApiResponse),
                (status = 500, description = "Still referenced, or storage failure", body = ApiResponse)
            )
        )]
        pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Response {
            delete_record::<$entity>(&state, &id).await
        }
    };

    (
        $module:ident {
            entity: $entity:ident,
            body: $body:ident,
            view: $view:ident,
            tag: $tag:tt,
            collection: $collection:tt,
            item: $item:tt,
            by_parent: $by_parent:tt $(,)?
        }
    ) => {
        pub mod $module {
            use super::*;

            resource_handlers!(@crud $entity, $body, $view, $tag, $collection, $item);

            #[utoipa::path(
                get,
                path = $by_parent,
                tag = $tag,
                params(("parent_id" = i32, Path, description = "Parent record id")),
                responses(
                    (status = 200, description = "Records referencing the parent; empty when none", body = [$view]),
                    (status = 500, description = "Storage failure", body = ApiResponse)
                )
            )]
            pub async fn list_by_parent(
                State(state): State<AppState>,
                Path(parent_id): Path<String>,
            ) -> Response {
                list_records_by_parent::<$entity>(&state, &parent_id).await
            }
        }
    };

    (
        $module:ident {
            entity: $entity:ident,
            body: $body:ident,
            view: $view:ident,
            tag: $tag:tt,
            collection: $collection:tt,
            item: $item:tt $(,)?
        }
    ) => {
        pub mod $module {
            use super::*;

            resource_handlers!(@crud $entity, $body, $view, $tag, $collection, $item);
        }
    };
}

resource_handlers!(locations {
    entity: Location,
    body: LocationBody,
    view: LocationView,
    tag: "locations",
    collection: "/api/locations",
    item: "/api/locations/{id}",
});

resource_handlers!(restaurants {
    entity: Restaurant,
    body: RestaurantBody,
    view: RestaurantView,
    tag: "restaurants",
    collection: "/api/restaurants",
    item: "/api/restaurants/{id}",
    by_parent: "/api/restaurants/by-location/{parent_id}",
});

resource_handlers!(want_to_try {
    entity: WantToTry,
    body: VisitBody,
    view: VisitView,
    tag: "want-to-try",
    collection: "/api/wanttotry",
    item: "/api/wanttotry/{id}",
    by_parent: "/api/wanttotry/by-restaurant/{parent_id}",
});

resource_handlers!(have_tried {
    entity: HaveTried,
    body: VisitBody,
    view: VisitView,
    tag: "have-tried",
    collection: "/api/havetried",
    item: "/api/havetried/{id}",
    by_parent: "/api/havetried/by-restaurant/{parent_id}",
});

resource_handlers!(ratings {
    entity: Rating,
    body: RatingBody,
    view: RatingView,
    tag: "ratings",
    collection: "/api/ratings",
    item: "/api/ratings/{id}",
    by_parent: "/api/ratings/by-havetried/{parent_id}",
});

resource_handlers!(experiences {
    entity: Experience,
    body: ExperienceBody,
    view: ExperienceView,
    tag: "experiences",
    collection: "/api/experiences",
    item: "/api/experiences/{id}",
    by_parent: "/api/experiences/by-havetried/{parent_id}",
});

resource_handlers!(dishes {
    entity: Dish,
    body: DishBody,
    view: DishView,
    tag: "dishes",
    collection: "/api/dishes",
    item: "/api/dishes/{id}",
    by_parent: "/api/dishes/by-havetried/{parent_id}",
});
