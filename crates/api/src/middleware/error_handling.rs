//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the
//! GroomRoute API. It maps domain-specific errors to appropriate HTTP
//! status codes and JSON error responses, ensuring a consistent error
//! handling experience across the entire API.
//!
//! The implementation is based on Axum's error handling mechanisms and
//! integrates with GroomRoute's custom error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use groomroute_core::errors::GroomError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `GroomError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub GroomError);

/// Converts application errors to HTTP responses
///
/// This implementation maps each error type to the appropriate HTTP status
/// code and formats the error message into a JSON response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            GroomError::NotFound(_) => StatusCode::NOT_FOUND,
            GroomError::Validation(_) => StatusCode::BAD_REQUEST,
            GroomError::Policy(_) => StatusCode::CONFLICT,
            GroomError::Authentication(_) => StatusCode::UNAUTHORIZED,
            GroomError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GroomError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Automatic conversion from GroomError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, GroomError>` in handler functions that return
/// `Result<T, AppError>`.
impl From<GroomError> for AppError {
    fn from(err: GroomError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, eyre::Report>` in handler functions that return
/// `Result<T, AppError>`. It wraps the eyre error in a
/// `GroomError::Database` variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(GroomError::Database(err))
    }
}

/// Maps a GroomError to an HTTP response
///
/// This function is provided for code that directly maps errors outside a
/// handler's `?` chain.
pub fn map_error(err: GroomError) -> Response {
    AppError(err).into_response()
}
