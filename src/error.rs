//! HTTP error mapping
//!
//! Converts service failures into plain-text responses:
//!
//! - validation errors -> **400** with the validation message
//! - unknown or undecodable shortcodes -> **404**
//! - persistence failures -> **500** with a generic message

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::service::ServiceError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound,
    Internal,
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => AppError::BadRequest(e.to_string()),
            ServiceError::NotFound => AppError::NotFound,
            // Backend detail is logged by the service, never sent to clients
            ServiceError::Persistence(_) => AppError::Internal,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            AppError::NotFound => (StatusCode::NOT_FOUND, "not found").into_response(),
            AppError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "failed to persist url").into_response()
            }
        }
    }
}
