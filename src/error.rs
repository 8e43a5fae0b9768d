//! Error types for HubLink.
//!
//! Three layers of errors live here, all built with `thiserror`:
//! - [`HubLinkError`] covers startup and seed data handling (files, JSON, HTTP).
//! - [`StoreError`] is what a [`crate::store::HubStore`] returns.
//! - [`HubQueryError`] is the request-path error of the hub listing endpoint
//!   and knows how to turn itself into an HTTP response.

use std::time::Duration;

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorBody;

/// Error type for loading, fetching and refreshing hub data.
///
/// # Rust Concepts
/// - `#[derive(Error)]` from `thiserror` auto-implements `std::error::Error`
/// - `#[from]` implements `From<T>` so the `?` operator converts for us
#[derive(Debug, Error)]
pub enum HubLinkError {
    /// Error reading or writing files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing JSON data.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Error making HTTP requests.
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Seed data parsed but is not usable (e.g. duplicate ids).
    #[error("Invalid hub data: {0}")]
    InvalidData(String),
}

/// Failure reported by the backing hub store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The fetch did not complete within the configured budget.
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    /// The request was well-formed JSON but not acceptable to the store,
    /// e.g. a start key without the `id` attribute.
    #[error("store validation error: {0}")]
    Validation(String),

    /// The store could not serve the request at all.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Request-path error of `GET /api/hubs`.
///
/// Client mistakes and store failures are kept apart so that they map to
/// 400 and 500 respectively.
#[derive(Debug, Error)]
pub enum HubQueryError {
    /// `lastKey` was not percent-encoded JSON describing a store key.
    #[error("invalid lastKey: {0}")]
    InvalidLastKey(String),

    /// The query string itself could not be deserialised, e.g. a repeated
    /// `region`.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// The backing store failed. The detail is logged, never returned.
    #[error("failed to fetch hubs")]
    Upstream(#[from] StoreError),
}

impl HubQueryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HubQueryError::InvalidLastKey(_) | HubQueryError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            HubQueryError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            HubQueryError::InvalidLastKey(_) => ErrorBody {
                error: "Bad request".into(),
                message: "Invalid lastKey parameter".into(),
            },
            HubQueryError::InvalidQuery(_) => ErrorBody {
                error: "Bad request".into(),
                message: "Invalid query parameters".into(),
            },
            HubQueryError::Upstream(_) => ErrorBody {
                error: "Internal server error".into(),
                message: "Failed to fetch hubs".into(),
            },
        }
    }
}

impl From<QueryRejection> for HubQueryError {
    fn from(rejection: QueryRejection) -> Self {
        HubQueryError::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for HubQueryError {
    fn into_response(self) -> Response {
        if let HubQueryError::Upstream(ref source) = self {
            error!("Error fetching hubs: {}", source);
        }
        (self.status_code(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_last_key_is_client_error() {
        let err = HubQueryError::InvalidLastKey("expected value".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body().error, "Bad request");
    }

    #[test]
    fn test_invalid_query_is_client_error_with_fixed_message() {
        let err = HubQueryError::InvalidQuery("duplicate field `region`".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = err.body();
        assert_eq!(body.error, "Bad request");
        assert_eq!(body.message, "Invalid query parameters");
    }

    #[test]
    fn test_upstream_hides_detail() {
        let err = HubQueryError::from(StoreError::Unavailable("table HubsTable not found".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = err.body();
        assert_eq!(body.message, "Failed to fetch hubs");
        assert!(!body.message.contains("HubsTable"));
        assert!(!body.error.contains("HubsTable"));
    }
}
