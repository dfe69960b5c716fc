pub mod validator;

pub use validator::{normalize_state, require, validate_location, validate_rating_score};
