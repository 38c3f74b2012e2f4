//! Turns service failures into `{"error": "..."}` responses.
//!
//! | Failure                         | Status | `error` text                |
//! |---------------------------------|--------|-----------------------------|
//! | missing required field          | 400    | `Missing required fields`   |
//! | field value of the wrong type   | 400    | `Invalid value for <field>` |
//! | unknown property id             | 404    | `Property not found`        |
//! | storage failure                 | 500    | `internal server error`     |
//!
//! Storage causes are logged and never leak into the body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use listings_domain::error::{ListingsError, ValidationError};

/// Fixed body text for every storage failure.
const INTERNAL_ERROR: &str = "internal server error";

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Error returned by the property handlers.
pub struct ApiError(ListingsError);

impl From<ListingsError> for ApiError {
    fn from(err: ListingsError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            ListingsError::Validation(_) => StatusCode::BAD_REQUEST,
            ListingsError::NotFound(_) => StatusCode::NOT_FOUND,
            ListingsError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            ListingsError::Storage(cause) => {
                tracing::error!(error = ?cause, "property storage failed");
                INTERNAL_ERROR.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { error: &message })).into_response()
    }
}
