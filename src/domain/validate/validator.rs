//! Business rules checked before a record reaches the store.

use crate::domain::error::AccessError;

/// The 50 states plus the District of Columbia.
pub const US_STATE_ABBREVIATIONS: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC",
];

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;

/// Trims and upper-cases `state`, returning it if it is a recognised abbreviation.
pub fn normalize_state(state: &str) -> Option<String> {
    let upper = state.trim().to_uppercase();
    if US_STATE_ABBREVIATIONS.contains(&upper.as_str()) {
        Some(upper)
    } else {
        None
    }
}

/// Checks a location's city and state. Returns the normalized state on success.
pub fn validate_location(city: &str, state: &str) -> Result<String, AccessError> {
    if city.trim().is_empty() {
        return Err(AccessError::validation("City is required"));
    }
    normalize_state(state).ok_or_else(|| {
        AccessError::validation(format!("Invalid US state abbreviation: {}", state))
    })
}

/// Scores are optional, but when given must fall in `MIN_SCORE..=MAX_SCORE`.
pub fn validate_rating_score(field: &str, value: Option<i32>) -> Result<(), AccessError> {
    match value {
        Some(score) if !(MIN_SCORE..=MAX_SCORE).contains(&score) => Err(AccessError::validation(
            format!("{} must be between {} and {}, got {}", field, MIN_SCORE, MAX_SCORE, score),
        )),
        _ => Ok(()),
    }
}

pub fn require<T>(field: &str, value: Option<T>) -> Result<T, AccessError> {
    value.ok_or_else(|| AccessError::validation(format!("{} is required", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_case_state_is_normalized() {
        assert_eq!(validate_location("Boston", "ma").unwrap(), "MA");
        assert_eq!(validate_location("Austin", " tx ").unwrap(), "TX");
        assert_eq!(validate_location("Washington", "dc").unwrap(), "DC");
    }

    #[test]
    fn unknown_state_is_rejected() {
        let err = validate_location("Boston", "XX").unwrap_err();
        assert!(matches!(err, AccessError::Validation(_)));
        assert!(validate_location("Boston", "Massachusetts").is_err());
        assert!(validate_location("Boston", "").is_err());
    }

    #[test]
    fn blank_city_is_rejected() {
        assert!(validate_location("   ", "MA").is_err());
        assert!(validate_location("", "MA").is_err());
    }

    #[test]
    fn every_abbreviation_is_accepted_in_any_case() {
        assert_eq!(US_STATE_ABBREVIATIONS.len(), 51);
        for abbr in US_STATE_ABBREVIATIONS {
            assert_eq!(normalize_state(&abbr.to_lowercase()).as_deref(), Some(abbr));
        }
    }

    #[test]
    fn scores_outside_one_to_five_are_rejected() {
        assert!(validate_rating_score("foodRating", Some(0)).is_err());
        assert!(validate_rating_score("foodRating", Some(6)).is_err());
        assert!(validate_rating_score("foodRating", Some(1)).is_ok());
        assert!(validate_rating_score("foodRating", Some(5)).is_ok());
        assert!(validate_rating_score("foodRating", None).is_ok());
    }

    #[test]
    fn missing_required_value_names_the_field() {
        let err = require::<i32>("location", None).unwrap_err();
        assert!(err.to_string().contains("location is required"));
        assert_eq!(require("location", Some(3)).unwrap(), 3);
    }
}
