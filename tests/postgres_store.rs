//! Postgres store round trip. Needs a reachable database; skipped when `DATABASE_URL` is unset.

use restaurant_tracker::{
    AccessError, DishInput, EntityStore, HaveTriedInput, LocationInput, PgEntityStore,
    RatingInput, RestaurantInput, RestaurantService,
};
use std::env;
use std::sync::Arc;

async fn connect() -> Option<Arc<PgEntityStore>> {
    dotenv::dotenv().ok();
    let Ok(url) = env::var("DATABASE_URL") else {
        println!("DATABASE_URL not set; skipping postgres store test");
        return None;
    };
    Some(Arc::new(
        PgEntityStore::connect(&url, 2)
            .await
            .expect("connect to DATABASE_URL"),
    ))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn postgres_store_cascades_and_restricts() -> Result<(), Box<dyn std::error::Error>> {
    let Some(store) = connect().await else {
        return Ok(());
    };
    store.ping().await?;
    let service = RestaurantService::new(store.clone());

    let loc = service
        .locations()
        .create(LocationInput {
            city: Some("Savannah".into()),
            state: Some("ga".into()),
            ..Default::default()
        })
        .await?;
    assert_eq!(loc.state, "GA");

    let restaurant = service
        .restaurants()
        .create(RestaurantInput {
            location_id: Some(loc.id),
            name: Some("The Grey".into()),
            cuisine: Some("Southern".into()),
            ..Default::default()
        })
        .await?;
    let visit = service
        .have_tried()
        .create(HaveTriedInput {
            restaurant_id: Some(restaurant.id),
            ..Default::default()
        })
        .await?;
    let rating = service
        .ratings()
        .create(RatingInput {
            have_tried_id: Some(visit.id),
            food_rating: Some(4),
            vibe_rating: Some(5),
            ..Default::default()
        })
        .await?;
    let dish = service
        .dishes()
        .create(DishInput {
            have_tried_id: Some(visit.id),
            name: Some("Pig ear salad".into()),
            ..Default::default()
        })
        .await?;

    let err = service
        .ratings()
        .create(RatingInput {
            have_tried_id: Some(i32::MAX),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Reference { .. }), "got {err:?}");

    let renamed = service
        .restaurants()
        .update(
            restaurant.id,
            RestaurantInput {
                name: Some("The Grey Market".into()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(renamed.cuisine.as_deref(), Some("Southern"));

    let err = service.locations().delete(loc.id).await.unwrap_err();
    assert!(matches!(err, AccessError::Storage(_)), "got {err:?}");

    assert!(service.have_tried().delete(visit.id).await?);
    assert!(service.ratings().find_by_id(rating.id).await?.is_none());
    assert!(service.dishes().find_by_id(dish.id).await?.is_none());

    assert!(service.restaurants().delete(restaurant.id).await?);
    assert!(service.locations().delete(loc.id).await?);
    assert!(service.locations().find_by_id(loc.id).await?.is_none());

    Ok(())
}
