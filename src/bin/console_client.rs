// src/bin/console_client.rs
//
// Walks the REST API through a full lifecycle against a running `api_server`.

use anyhow::Context;
use clap::Parser;
use reqwest::{Client, StatusCode};
use restaurant_tracker::infra::config;
use restaurant_tracker::transport::http::types::{
    DishView, ExperienceView, LocationView, RatingView, RestaurantView, VisitView,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value as JsonValue};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "console_client", about = "Drive the restaurant tracker API end to end")]
struct Args {
    /// API base URL, e.g. http://localhost:8080/api (overrides API_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,
}

struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    fn new(base: String) -> anyhow::Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn expect_json<T: DeserializeOwned>(resp: reqwest::Response, what: &str) -> anyhow::Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("{} failed: {} {}", what, status, body);
        }
        resp.json::<T>()
            .await
            .with_context(|| format!("{}: unexpected response body", what))
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: JsonValue) -> anyhow::Result<T> {
        let resp = self.http.post(self.url(path)).json(&body).send().await?;
        Self::expect_json(resp, &format!("POST {}", path)).await
    }

    async fn put<T: DeserializeOwned>(&self, path: &str, body: JsonValue) -> anyhow::Result<T> {
        let resp = self.http.put(self.url(path)).json(&body).send().await?;
        Self::expect_json(resp, &format!("PUT {}", path)).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        let resp = self.http.get(self.url(path)).send().await?;
        Self::expect_json(resp, &format!("GET {}", path)).await
    }

    async fn status_of(&self, path: &str) -> anyhow::Result<StatusCode> {
        Ok(self.http.get(self.url(path)).send().await?.status())
    }

    async fn delete(&self, path: &str) -> anyhow::Result<bool> {
        let status = self.http.delete(self.url(path)).send().await?.status();
        Ok(status == StatusCode::NO_CONTENT)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    let base = args.base_url.unwrap_or_else(config::api_base_url);
    let api = ApiClient::new(base)?;

    println!("=== console client starting ({}) ===\n", api.base);

    println!("--- Step 1: CREATE entities ---");
    let location: LocationView = api
        .post("/locations", json!({ "city": "ClientCity", "state": "NY" }))
        .await?;
    println!("Created Location (id={})", location.id);

    let restaurant: RestaurantView = api
        .post(
            "/restaurants",
            json!({
                "restaurantName": "Client Cafe",
                "type": "Cafe",
                "cuisine": "Fusion",
                "location": { "id": location.id }
            }),
        )
        .await?;
    println!("Created Restaurant (id={})", restaurant.id);

    let have_tried: VisitView = api
        .post("/havetried", json!({ "restaurant": { "id": restaurant.id } }))
        .await?;
    println!("Created HaveTried (id={})", have_tried.id);

    let rating: RatingView = api
        .post(
            "/ratings",
            json!({
                "haveTried": { "id": have_tried.id },
                "foodRating": 5,
                "vibeRating": 4,
                "ratingDescription": "Tasty via client"
            }),
        )
        .await?;
    println!("Created Rating (id={})", rating.id);

    let today = chrono::Local::now().date_naive();
    let experience: ExperienceView = api
        .post(
            "/experiences",
            json!({
                "haveTried": { "id": have_tried.id },
                "date": today,
                "description": "Client demo experience"
            }),
        )
        .await?;
    println!("Created Experience (id={})", experience.id);

    let dish: DishView = api
        .post(
            "/dishes",
            json!({
                "haveTried": { "id": have_tried.id },
                "dishName": "Client Special",
                "foodDescription": "Delicious sample"
            }),
        )
        .await?;
    println!("Created Dish (id={})", dish.id);

    println!("\n--- Step 2: GET entities (verify creates) ---");
    let fetched: RestaurantView = api.get(&format!("/restaurants/{}", restaurant.id)).await?;
    println!(
        "GET Restaurant: id={}, name={}",
        fetched.id,
        fetched.restaurant_name.as_deref().unwrap_or("-")
    );
    let fetched_ht: VisitView = api.get(&format!("/havetried/{}", have_tried.id)).await?;
    println!("GET HaveTried: id={}", fetched_ht.id);
    let fetched_rating: RatingView = api.get(&format!("/ratings/{}", rating.id)).await?;
    println!(
        "GET Rating: id={}, food={:?}, vibe={:?}",
        fetched_rating.id, fetched_rating.food_rating, fetched_rating.vibe_rating
    );
    let fetched_exp: ExperienceView = api.get(&format!("/experiences/{}", experience.id)).await?;
    println!("GET Experience: id={}, date={:?}", fetched_exp.id, fetched_exp.date);
    let fetched_dish: DishView = api.get(&format!("/dishes/{}", dish.id)).await?;
    println!(
        "GET Dish: id={}, name={}",
        fetched_dish.id,
        fetched_dish.dish_name.as_deref().unwrap_or("-")
    );

    println!("\n--- Step 3: UPDATE Restaurant ---");
    let new_name = format!("{} UPDATED", fetched.restaurant_name.unwrap_or_default());
    let updated: RestaurantView = api
        .put(
            &format!("/restaurants/{}", restaurant.id),
            json!({ "restaurantName": new_name, "location": { "id": fetched.location.id } }),
        )
        .await?;
    println!(
        "Updated Restaurant: id={}, name={}",
        updated.id,
        updated.restaurant_name.as_deref().unwrap_or("-")
    );
    let after_update: RestaurantView = api.get(&format!("/restaurants/{}", restaurant.id)).await?;
    println!(
        "GET after update: id={}, name={}",
        after_update.id,
        after_update.restaurant_name.as_deref().unwrap_or("-")
    );

    println!("\n--- Step 4: DELETE entities ---");
    let deleted = api.delete(&format!("/havetried/{}", have_tried.id)).await?;
    println!("Deleted HaveTried (id={}): {}", have_tried.id, deleted);
    for (label, path) in [
        ("HaveTried", format!("/havetried/{}", have_tried.id)),
        ("Rating", format!("/ratings/{}", rating.id)),
        ("Experience", format!("/experiences/{}", experience.id)),
        ("Dish", format!("/dishes/{}", dish.id)),
    ] {
        let status = api.status_of(&path).await?;
        println!("GET {} after delete: {} (404 expected)", label, status.as_u16());
    }

    let deleted = api.delete(&format!("/restaurants/{}", restaurant.id)).await?;
    println!("Deleted Restaurant (id={}): {}", restaurant.id, deleted);
    let status = api.status_of(&format!("/restaurants/{}", restaurant.id)).await?;
    println!("GET Restaurant after delete: {} (404 expected)", status.as_u16());

    let deleted = api.delete(&format!("/locations/{}", location.id)).await?;
    println!("Deleted Location (id={}): {}", location.id, deleted);
    let status = api.status_of(&format!("/locations/{}", location.id)).await?;
    println!("GET Location after delete: {} (404 expected)", status.as_u16());

    println!("\n=== console client finished ===");
    Ok(())
}
