//! Access-layer behavior over the in-memory store: validation, references, partial update,
//! cascade and restrict delete.

use restaurant_tracker::{
    AccessError, DishInput, ExperienceInput, HaveTried, HaveTriedInput, Location, LocationInput,
    RatingInput, Restaurant, RestaurantInput, RestaurantService, WantToTryInput,
};

fn location(city: &str, state: &str) -> LocationInput {
    LocationInput {
        city: Some(city.to_string()),
        state: Some(state.to_string()),
        ..Default::default()
    }
}

async fn seed_restaurant(service: &RestaurantService) -> (Location, Restaurant) {
    let loc = service
        .locations()
        .create(location("Austin", "TX"))
        .await
        .unwrap();
    let restaurant = service
        .restaurants()
        .create(RestaurantInput {
            location_id: Some(loc.id),
            name: Some("Franklin Barbecue".into()),
            kind: Some("Counter".into()),
            cuisine: Some("BBQ".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    (loc, restaurant)
}

async fn seed_visit(service: &RestaurantService, restaurant_id: i32) -> HaveTried {
    service
        .have_tried()
        .create(HaveTriedInput {
            restaurant_id: Some(restaurant_id),
            ..Default::default()
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn location_state_is_normalized_and_validated() {
    let service = RestaurantService::in_memory();
    let locations = service.locations();

    let boston = locations.create(location("Boston", "ma")).await.unwrap();
    assert_eq!(boston.state, "MA");
    assert!(boston.id > 0);

    let err = locations.create(location("Boston", "XX")).await.unwrap_err();
    assert!(matches!(err, AccessError::Validation(_)), "got {err:?}");

    let err = locations.create(location("   ", "MA")).await.unwrap_err();
    assert!(matches!(err, AccessError::Validation(_)), "got {err:?}");

    let err = locations
        .create(LocationInput {
            city: Some("Boston".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Validation(_)), "got {err:?}");

    assert_eq!(locations.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn client_supplied_id_is_ignored_on_create() {
    let service = RestaurantService::in_memory();
    let created = service
        .locations()
        .create(LocationInput {
            id: Some(999),
            ..location("Denver", "CO")
        })
        .await
        .unwrap();
    assert_ne!(created.id, 999);
    assert!(service.locations().find_by_id(999).await.unwrap().is_none());
    assert_eq!(
        service.locations().find_by_id(created.id).await.unwrap(),
        Some(created)
    );
}

#[tokio::test]
async fn unknown_parent_is_a_reference_error() {
    let service = RestaurantService::in_memory();

    let err = service
        .restaurants()
        .create(RestaurantInput {
            location_id: Some(42),
            name: Some("Nowhere Diner".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(
        matches!(err, AccessError::Reference { ref table, id: 42 } if table == "location"),
        "got {err:?}"
    );

    let (_, restaurant) = seed_restaurant(&service).await;
    let err = service
        .restaurants()
        .update(
            restaurant.id,
            RestaurantInput {
                location_id: Some(777),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Reference { .. }), "got {err:?}");

    let err = service
        .want_to_try()
        .create(WantToTryInput::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Validation(_)), "got {err:?}");
}

#[tokio::test]
async fn partial_update_only_touches_given_fields() {
    let service = RestaurantService::in_memory();
    let (loc, restaurant) = seed_restaurant(&service).await;

    let updated = service
        .restaurants()
        .update(
            restaurant.id,
            RestaurantInput {
                cuisine: Some("Texas BBQ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.cuisine.as_deref(), Some("Texas BBQ"));
    assert_eq!(updated.name, restaurant.name);
    assert_eq!(updated.kind, restaurant.kind);
    assert_eq!(updated.location_id, loc.id);

    let unchanged = service
        .restaurants()
        .update(restaurant.id, RestaurantInput::default())
        .await
        .unwrap();
    assert_eq!(unchanged, updated);

    let relocated = service
        .locations()
        .update(
            loc.id,
            LocationInput {
                state: Some("ny".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(relocated.city, "Austin");
    assert_eq!(relocated.state, "NY");

    let err = service
        .locations()
        .update(
            loc.id,
            LocationInput {
                state: Some("ZZ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Validation(_)), "got {err:?}");
    let stored = service.locations().find_by_id(loc.id).await.unwrap().unwrap();
    assert_eq!(stored.state, "NY");
}

#[tokio::test]
async fn update_of_missing_record_is_not_found() {
    let service = RestaurantService::in_memory();
    let err = service
        .locations()
        .update(12, location("Reno", "NV"))
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::NotFound { id: 12, .. }), "got {err:?}");
}

#[tokio::test]
async fn rating_scores_must_be_between_one_and_five() {
    let service = RestaurantService::in_memory();
    let (_, restaurant) = seed_restaurant(&service).await;
    let visit = seed_visit(&service, restaurant.id).await;

    for bad in [0, 6] {
        let err = service
            .ratings()
            .create(RatingInput {
                have_tried_id: Some(visit.id),
                food_rating: Some(bad),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::Validation(_)), "score {bad}: {err:?}");
    }

    let rating = service
        .ratings()
        .create(RatingInput {
            have_tried_id: Some(visit.id),
            food_rating: Some(5),
            vibe_rating: None,
            description: Some("brisket".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rating.food_rating, Some(5));
    assert_eq!(rating.vibe_rating, None);
}

#[tokio::test]
async fn deleting_a_visit_cascades_to_its_children() {
    let service = RestaurantService::in_memory();
    let (_, restaurant) = seed_restaurant(&service).await;
    let visit = seed_visit(&service, restaurant.id).await;
    let other_visit = seed_visit(&service, restaurant.id).await;

    for score in [3, 4] {
        service
            .ratings()
            .create(RatingInput {
                have_tried_id: Some(visit.id),
                food_rating: Some(score),
                vibe_rating: Some(score),
                ..Default::default()
            })
            .await
            .unwrap();
    }
    service
        .experiences()
        .create(ExperienceInput {
            have_tried_id: Some(visit.id),
            date: chrono::NaiveDate::from_ymd_opt(2024, 5, 17),
            description: Some("Long line, worth it".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let dish = service
        .dishes()
        .create(DishInput {
            have_tried_id: Some(visit.id),
            name: Some("Brisket".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let kept_dish = service
        .dishes()
        .create(DishInput {
            have_tried_id: Some(other_visit.id),
            name: Some("Ribs".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(
        service.ratings().find_by_parent_id(visit.id).await.unwrap().len(),
        2
    );

    assert!(service.have_tried().delete(visit.id).await.unwrap());

    assert!(service.have_tried().find_by_id(visit.id).await.unwrap().is_none());
    assert!(service.ratings().find_by_parent_id(visit.id).await.unwrap().is_empty());
    assert!(service
        .experiences()
        .find_by_parent_id(visit.id)
        .await
        .unwrap()
        .is_empty());
    assert!(service.dishes().find_by_id(dish.id).await.unwrap().is_none());

    assert_eq!(
        service.dishes().find_by_id(kept_dish.id).await.unwrap(),
        Some(kept_dish)
    );
    assert!(service
        .restaurants()
        .find_by_id(restaurant.id)
        .await
        .unwrap()
        .is_some());

    assert!(!service.have_tried().delete(visit.id).await.unwrap());
}

#[tokio::test]
async fn referenced_parent_cannot_be_deleted() {
    let service = RestaurantService::in_memory();
    let (loc, restaurant) = seed_restaurant(&service).await;

    let err = service.locations().delete(loc.id).await.unwrap_err();
    assert!(matches!(err, AccessError::Storage(_)), "got {err:?}");
    assert!(service.locations().find_by_id(loc.id).await.unwrap().is_some());
    assert!(service
        .restaurants()
        .find_by_id(restaurant.id)
        .await
        .unwrap()
        .is_some());

    assert!(service.restaurants().delete(restaurant.id).await.unwrap());
    assert!(service.locations().delete(loc.id).await.unwrap());
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let service = RestaurantService::in_memory();
    let first = service
        .locations()
        .create(location("Portland", "OR"))
        .await
        .unwrap();
    assert!(service.locations().delete(first.id).await.unwrap());
    let second = service
        .locations()
        .create(location("Portland", "ME"))
        .await
        .unwrap();
    assert!(second.id > first.id);
}

#[tokio::test]
async fn children_of_missing_parent_is_empty() {
    let service = RestaurantService::in_memory();
    let (loc, restaurant) = seed_restaurant(&service).await;

    assert!(service.restaurants().find_by_parent_id(9_999).await.unwrap().is_empty());
    assert_eq!(
        service.restaurants().find_by_parent_id(loc.id).await.unwrap(),
        vec![restaurant.clone()]
    );
    assert!(service
        .want_to_try()
        .find_by_parent_id(restaurant.id)
        .await
        .unwrap()
        .is_empty());
}
