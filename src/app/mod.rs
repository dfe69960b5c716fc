pub mod repository;
pub mod restaurant_service;

pub use repository::Repository;
pub use restaurant_service::RestaurantService;
