pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{Repository, RestaurantService};
pub use domain::model::{
    Dish, DishInput, Entity, Experience, ExperienceInput, HaveTried, HaveTriedInput, Location,
    LocationInput, ModelRegistry, Rating, RatingInput, Restaurant, RestaurantInput, WantToTry,
    WantToTryInput,
};
pub use domain::AccessError;
pub use storage::{EntityStore, MemoryEntityStore, PgEntityStore};
