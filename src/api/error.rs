//! HTTP error responses

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::Error;

/// JSON error body: `{"description": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub description: String,
}

/// Handler failure: a status plus an optional description
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    description: Option<String>,
}

impl ApiError {
    pub fn bad_request(description: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            description: Some(description.into()),
        }
    }

    /// 404 with an empty body
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            description: None,
        }
    }

    pub fn internal(error: &Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            description: Some(error.to_string()),
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        if error.is_client_error() {
            Self::bad_request(error.to_string())
        } else {
            Self::internal(&error)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.description {
            Some(description) => (self.status, Json(ErrorBody { description })).into_response(),
            None => (self.status, [(header::CONTENT_TYPE, "application/json")]).into_response(),
        }
    }
}
