//! HTTP error taxonomy and response payloads.

use crate::entity::MembershipError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body
    pub status_code: u16,
    /// "Not Found" or "Raw"
    pub error_type: String,
    /// Human readable message
    pub error_message: String,
    /// Optional detail list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Rendered cause chain of the wrapped error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_raw: Option<String>,
}

/// Error surfaced by the HTTP handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Requested entity does not exist (404)
    #[error("{message}")]
    NotFound {
        message: String,
        errors: Option<Vec<String>>,
    },
    /// Any other failure (400), keeping the original error as context
    #[error("{message}")]
    Raw {
        message: String,
        cause: Option<anyhow::Error>,
    },
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            errors: None,
        }
    }

    pub fn raw(message: impl Into<String>, cause: impl Into<anyhow::Error>) -> Self {
        Self::Raw {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Raw { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn to_payload(&self) -> ErrorResponse {
        let status_code = self.status().as_u16();
        match self {
            Self::NotFound { message, errors } => ErrorResponse {
                status_code,
                error_type: "Not Found".to_string(),
                error_message: message.clone(),
                errors: errors.clone(),
                error_raw: None,
            },
            Self::Raw { message, cause } => ErrorResponse {
                status_code,
                error_type: "Raw".to_string(),
                error_message: message.clone(),
                errors: None,
                error_raw: cause.as_ref().map(|err| format!("{err:#}")),
            },
        }
    }
}

impl From<MembershipError> for ApiError {
    fn from(err: MembershipError) -> Self {
        let message = err.to_string();
        match err {
            MembershipError::PersonNotRelated(_) | MembershipError::ResultNotFound(_) => {
                Self::NotFound {
                    errors: Some(vec![message.clone()]),
                    message,
                }
            }
            MembershipError::InvalidRole(role) => Self::Raw {
                message,
                cause: Some(anyhow::anyhow!("unknown collaborator role: {role}")),
            },
            MembershipError::Storage(cause) => Self::Raw {
                message,
                cause: Some(cause),
            },
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Raw {
            message: "Invalid path parameter".to_string(),
            cause: Some(anyhow::anyhow!(rejection.body_text())),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Raw {
            message: "Invalid request body".to_string(),
            cause: Some(anyhow::anyhow!(rejection.body_text())),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = self.to_payload();
        match &payload.error_raw {
            Some(raw) => tracing::error!("❌ {}: {}", payload.error_message, raw),
            None => tracing::debug!("🔍 {}", payload.error_message),
        }
        (self.status(), Json(payload)).into_response()
    }
}

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = ApiError::not_found("Project not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn raw_keeps_cause_chain() {
        let cause = anyhow::anyhow!("disk full").context("insert failed");
        let payload = ApiError::raw("Could not create project", cause).to_payload();

        assert_eq!(payload.status_code, 400);
        assert_eq!(payload.error_type, "Raw");
        assert_eq!(payload.error_raw.as_deref(), Some("insert failed: disk full"));
    }

    #[test]
    fn membership_errors_follow_http_taxonomy() {
        let not_related = ApiError::from(MembershipError::PersonNotRelated(3));
        assert_eq!(not_related.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_related.to_string(), "Provided person not related to project");

        let missing = ApiError::from(MembershipError::ResultNotFound(9));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let bad_role = ApiError::from(MembershipError::InvalidRole("intern".to_string()));
        assert_eq!(bad_role.status(), StatusCode::BAD_REQUEST);
        assert_eq!(bad_role.to_string(), "Could not edit member");
    }

    #[test]
    fn storage_error_keeps_original_message() {
        let err = ApiError::from(MembershipError::Storage(anyhow::anyhow!(
            "Result 4 does not exist"
        )));
        assert_eq!(err.to_string(), "Result 4 does not exist");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
