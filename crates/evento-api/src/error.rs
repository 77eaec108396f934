// Error-to-response mapping shared by every route
//
// Client errors carry their own message. Store and internal errors are
// logged with full detail and answered with the operation's generic message.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use evento_core::EventError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const NOT_FOUND_MESSAGE: &str = "No event found with the given id";

/// Error body returned by every failing request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Confirmation body returned by mutating requests
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
    /// Id of the created event (create only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// A failed operation: what was attempted plus why it failed
#[derive(Debug, thiserror::Error)]
#[error("{context}: {source}")]
pub struct ApiError {
    context: &'static str,
    source: EventError,
}

impl ApiError {
    pub fn new(context: &'static str, source: EventError) -> Self {
        Self { context, source }
    }

    /// Adapter for `map_err` at call sites
    pub fn context(context: &'static str) -> impl FnOnce(EventError) -> ApiError {
        move |source| ApiError::new(context, source)
    }

    pub fn status(&self) -> StatusCode {
        match self.source {
            EventError::Validation(_) => StatusCode::BAD_REQUEST,
            EventError::NotFound(_) => StatusCode::NOT_FOUND,
            EventError::Store(_) | EventError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match &self.source {
            EventError::Validation(msg) => msg.clone(),
            EventError::NotFound(_) => NOT_FOUND_MESSAGE.to_string(),
            EventError::Store(_) | EventError::Internal(_) => self.context.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(
            "Invalid request body",
            EventError::validation(format!("Invalid request body: {}", rejection.body_text())),
        )
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::new(
            "Invalid path parameter",
            EventError::validation(format!("Invalid path parameter: {}", rejection.body_text())),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.source, "{}", self.context);
        } else {
            tracing::debug!(status = status.as_u16(), error = %self.source, "{}", self.context);
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
