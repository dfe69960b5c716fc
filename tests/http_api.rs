//! REST API tests: in-process server on an ephemeral port, driven with reqwest.

use reqwest::StatusCode;
use restaurant_tracker::{transport, RestaurantService};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

async fn spawn_server() -> Result<String, Box<dyn std::error::Error>> {
    let app_state = transport::http::AppState {
        service: Arc::new(RestaurantService::in_memory()),
    };
    let router = transport::http::create_router(app_state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok(format!("http://127.0.0.1:{}", port))
}

async fn post_ok(client: &reqwest::Client, url: String, body: JsonValue) -> JsonValue {
    let resp = client.post(&url).json(&body).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK, "POST {url}");
    resp.json().await.unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn visit_lifecycle_cascades_over_http() -> Result<(), Box<dyn std::error::Error>> {
    let base = spawn_server().await?;
    let client = reqwest::Client::new();

    let location = post_ok(
        &client,
        format!("{base}/api/locations"),
        json!({ "city": "Austin", "state": "tx" }),
    )
    .await;
    assert_eq!(location["state"], "TX");
    let location_id = location["id"].as_i64().unwrap();

    let restaurant = post_ok(
        &client,
        format!("{base}/api/restaurants"),
        json!({
            "restaurantName": "Uchi",
            "type": "Sit-down",
            "cuisine": "Japanese",
            "location": { "id": location_id }
        }),
    )
    .await;
    assert_eq!(restaurant["location"]["id"], location_id);
    assert_eq!(restaurant["type"], "Sit-down");
    let restaurant_id = restaurant["id"].as_i64().unwrap();

    let visit = post_ok(
        &client,
        format!("{base}/api/havetried"),
        json!({ "restaurant": { "id": restaurant_id } }),
    )
    .await;
    let visit_id = visit["id"].as_i64().unwrap();

    let rating = post_ok(
        &client,
        format!("{base}/api/ratings"),
        json!({
            "haveTried": { "id": visit_id },
            "foodRating": 5,
            "vibeRating": 4,
            "ratingDescription": "Hama chili"
        }),
    )
    .await;
    assert_eq!(rating["foodRating"], 5);
    let rating_id = rating["id"].as_i64().unwrap();

    let experience = post_ok(
        &client,
        format!("{base}/api/experiences"),
        json!({ "haveTried": { "id": visit_id }, "date": "2024-03-09", "description": "Omakase" }),
    )
    .await;
    assert_eq!(experience["date"], "2024-03-09");

    let by_visit: Vec<JsonValue> = client
        .get(format!("{base}/api/ratings/by-havetried/{visit_id}"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(by_visit.len(), 1);

    let resp = client
        .delete(format!("{base}/api/havetried/{visit_id}"))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client.get(format!("{base}/api/ratings/{rating_id}")).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = client
        .get(format!("{base}/api/experiences/{}", experience["id"]))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .get(format!("{base}/api/restaurants/{restaurant_id}"))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn update_merges_and_reports_missing_records() -> Result<(), Box<dyn std::error::Error>> {
    let base = spawn_server().await?;
    let client = reqwest::Client::new();

    let location = post_ok(
        &client,
        format!("{base}/api/locations"),
        json!({ "city": "Chicago", "state": "IL" }),
    )
    .await;
    let location_id = location["id"].as_i64().unwrap();

    let restaurant = post_ok(
        &client,
        format!("{base}/api/restaurants"),
        json!({ "restaurantName": "Alinea", "cuisine": "Modernist", "location": { "id": location_id } }),
    )
    .await;
    let restaurant_id = restaurant["id"].as_i64().unwrap();

    let resp = client
        .put(format!("{base}/api/restaurants/{restaurant_id}"))
        .json(&json!({ "restaurantName": "Alinea UPDATED" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: JsonValue = resp.json().await?;
    assert_eq!(updated["restaurantName"], "Alinea UPDATED");
    assert_eq!(updated["cuisine"], "Modernist");
    assert_eq!(updated["location"]["id"], location_id);

    let resp = client
        .put(format!("{base}/api/restaurants/4040"))
        .json(&json!({ "cuisine": "None" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: JsonValue = resp.json().await?;
    assert_eq!(body["success"], false);

    let resp = client.delete(format!("{base}/api/locations/4040")).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn bad_requests_map_to_client_errors() -> Result<(), Box<dyn std::error::Error>> {
    let base = spawn_server().await?;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/locations"))
        .json(&json!({ "city": "Springfield", "state": "XX" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: JsonValue = resp.json().await?;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("XX"));

    let resp = client
        .post(format!("{base}/api/restaurants"))
        .json(&json!({ "restaurantName": "Ghost Kitchen", "location": { "id": 321 } }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .post(format!("{base}/api/locations"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = client.get(format!("{base}/api/dishes/abc")).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .get(format!("{base}/api/restaurants/by-location/not-a-number"))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let rows: Vec<JsonValue> = resp.json().await?;
    assert!(rows.is_empty());

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn health_reports_ok() -> Result<(), Box<dyn std::error::Error>> {
    let base = spawn_server().await?;
    let resp = reqwest::get(format!("{base}/health")).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: JsonValue = resp.json().await?;
    assert_eq!(body["data"]["status"], "ok");
    Ok(())
}
