use std::fmt::{Display, Formatter};

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;

use crate::record_model::RecordId;

/// Every failure a collection operation can report.
///
/// Callers match on the variant; the payload is a human-readable description
/// suitable for forwarding as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppResponse {
    ValidationError(String),
    NotFound(String),
    StorageError(String),
}

impl Display for AppResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AppResponse::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppResponse::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppResponse::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for AppResponse {}

impl From<std::io::Error> for AppResponse {
    fn from(err: std::io::Error) -> Self {
        AppResponse::StorageError(format!("IO error: {}", err))
    }
}

impl From<SerdeError> for AppResponse {
    fn from(err: SerdeError) -> Self {
        AppResponse::StorageError(format!("JSON serialization error: {}", err))
    }
}

impl AppResponse {
    pub fn not_found(kind: &str, id: RecordId) -> Self {
        AppResponse::NotFound(format!("{} with id {} not found", kind, id))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppResponse::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppResponse::NotFound(_) => StatusCode::NOT_FOUND,
            AppResponse::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
