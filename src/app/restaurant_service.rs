//! The restaurant access layer.
//!
//! One `RestaurantService` owns the shared entity store and hands out a `Repository` per
//! entity type. Repositories are cheap handles; every call goes straight to the store.

use crate::app::repository::Repository;
use crate::domain::error::AccessError;
use crate::domain::model::{
    Dish, Entity, Experience, HaveTried, Location, Rating, Restaurant, WantToTry,
};
use crate::infra::config::{Settings, StoreBackend};
use crate::storage::{EntityStore, MemoryEntityStore, PgEntityStore};
use std::sync::Arc;

pub struct RestaurantService {
    store: Arc<dyn EntityStore>,
}

impl RestaurantService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// A service over a fresh in-process store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryEntityStore::new()))
    }

    /// Opens the store selected by `settings`.
    pub async fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let store: Arc<dyn EntityStore> = match settings.store_backend {
            StoreBackend::Postgres => {
                let database_url = settings.database_url.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("DATABASE_URL must be set for the postgres store backend")
                })?;
                tracing::info!(max_connections = settings.max_connections, "connecting to postgres");
                Arc::new(PgEntityStore::connect(database_url, settings.max_connections).await?)
            }
            StoreBackend::Memory => {
                tracing::warn!("using the in-memory store; data is lost on shutdown");
                Arc::new(MemoryEntityStore::new())
            }
        };
        Ok(Self::new(store))
    }

    pub fn repository<E: Entity>(&self) -> Repository<E> {
        Repository::new(self.store.clone())
    }

    pub fn locations(&self) -> Repository<Location> {
        self.repository()
    }

    pub fn restaurants(&self) -> Repository<Restaurant> {
        self.repository()
    }

    pub fn want_to_try(&self) -> Repository<WantToTry> {
        self.repository()
    }

    pub fn have_tried(&self) -> Repository<HaveTried> {
        self.repository()
    }

    pub fn ratings(&self) -> Repository<Rating> {
        self.repository()
    }

    pub fn experiences(&self) -> Repository<Experience> {
        self.repository()
    }

    pub fn dishes(&self) -> Repository<Dish> {
        self.repository()
    }

    pub async fn ping(&self) -> Result<(), AccessError> {
        self.store.ping().await
    }
}
