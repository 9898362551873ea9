//! # REST API Errors
//!
//! Every handler failure is rendered as `{"error": {<key>: <message>}}`.
//! The body shape is fixed for client compatibility; only the status code
//! depends on the configured [`ErrorMode`].

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// Result type for REST operations
pub type ApiResult<T> = Result<T, ApiError>;

/// How handled errors are signalled on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMode {
    /// Error body with a matching 4xx/5xx status
    #[default]
    Conventional,
    /// Error body with `200 OK`, as older clients expect
    Legacy,
}

/// REST API errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Lookup by location or id missed
    #[error("{0}")]
    NotFound(String),

    /// Shared secret did not match
    #[error("Sorry thats a wrong api key.")]
    Unauthorized,

    /// Insert collided with an existing name
    #[error("Sorry, a cafe named '{0}' already exists.")]
    DuplicateName(String),

    /// Random pick on an empty collection
    #[error("Sorry, there are no cafes in the database.")]
    EmptyStore,

    /// Required parameter absent from the request
    #[error("Missing required parameter: {0}")]
    MissingField(&'static str),

    /// Store failure
    #[error("{0}")]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateName(name) => ApiError::DuplicateName(name),
            other => ApiError::Store(other),
        }
    }
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) | ApiError::EmptyStore => StatusCode::NOT_FOUND,
            ApiError::DuplicateName(_) => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Key under which the message appears in the error body.
    ///
    /// A bad api key is reported as "Not Found" so that the body matches
    /// what existing clients parse.
    pub fn body_key(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) | ApiError::Unauthorized | ApiError::EmptyStore => "Not Found",
            ApiError::DuplicateName(_) => "Duplicate",
            ApiError::MissingField(_) => "Bad Request",
            ApiError::Store(_) => "Internal Error",
        }
    }

    /// Render with the status implied by `mode`
    pub fn into_response_with(self, mode: ErrorMode) -> Response {
        let status = match mode {
            ErrorMode::Conventional => self.status_code(),
            ErrorMode::Legacy => StatusCode::OK,
        };
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: BTreeMap<&'static str, String>,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let mut error = BTreeMap::new();
        error.insert(err.body_key(), err.to_string());
        Self { error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_response_with(ErrorMode::Conventional)
    }
}
