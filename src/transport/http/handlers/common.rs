use crate::domain::error::AccessError;
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub fn error_status(err: &AccessError) -> StatusCode {
    match err {
        AccessError::Validation(_) | AccessError::Reference { .. } => StatusCode::BAD_REQUEST,
        AccessError::NotFound { .. } => StatusCode::NOT_FOUND,
        AccessError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_response(err: AccessError) -> Response {
    let status = error_status(&err);
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    } else {
        tracing::debug!(error = %err, status = status.as_u16(), "request rejected");
    }
    (
        status,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(err.to_string()),
        }),
    )
        .into_response()
}

/// Path ids arrive as strings so that a malformed id can be answered like a missing one.
pub fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

pub fn not_found(table: &str, raw_id: &str) -> Response {
    let err = match parse_id(raw_id) {
        Some(id) => AccessError::not_found(table, id),
        None => AccessError::Validation(format!("'{}' is not a valid {} id", raw_id, table)),
    };
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(err.to_string()),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_error_kind_to_a_status() {
        assert_eq!(
            error_status(&AccessError::validation("city is required")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&AccessError::reference("location", 9)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&AccessError::not_found("restaurant", 3)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&AccessError::Storage("connection reset".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert_eq!(parse_id(" 42 "), Some(42));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
    }
}
