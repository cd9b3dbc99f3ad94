use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::dashboard_store::WriteError;

/// Every error the server hands to a client. Always rendered as `{"error": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The body was not a JSON object, or a field was missing or had the wrong type.
    #[error("Invalid input")]
    InvalidInput,
    /// The record was well-formed but refused by the store.
    #[error("{0}")]
    Rejected(&'static str),
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput | ApiError::Rejected(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        error!("Dashboard read failed: {:#}", err);
        ApiError::Internal
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// The kinds of record the API can write, used to pick client-facing messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Metric,
    Employee,
    Sale,
}

impl RecordKind {
    pub fn created_message(&self) -> &'static str {
        match self {
            RecordKind::Metric => "Metric added successfully",
            RecordKind::Employee => "Employee added successfully",
            RecordKind::Sale => "Sale added successfully",
        }
    }

    pub fn rejection(&self, err: &WriteError) -> ApiError {
        let message = match (self, err) {
            (RecordKind::Metric, WriteError::Invalid(invalid)) if invalid.field() == "name" => {
                "Metric name required"
            }
            (RecordKind::Metric, WriteError::Invalid(_)) => "Invalid metric data",
            (RecordKind::Employee, WriteError::Invalid(_)) => "Invalid employee data",
            (RecordKind::Sale, WriteError::Invalid(_)) => "Invalid sale data",
            (RecordKind::Metric, WriteError::Storage(_)) => "Failed to add metric",
            (RecordKind::Employee, WriteError::Storage(_)) => "Failed to add employee",
            (RecordKind::Sale, WriteError::Storage(_)) => "Failed to add sale",
        };
        ApiError::Rejected(message)
    }
}
