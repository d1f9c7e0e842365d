//! HTTP error responses.
//!
//! The only place where `VaultError` variants meet status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::VaultError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error kind string.
    pub status: String,
    /// HTTP status code.
    pub code: u16,
    /// Human-readable message.
    pub detail: String,
}

impl ApiError {
    #[must_use]
    pub fn new(status: impl Into<String>, code: u16, detail: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            code,
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new("bad_request", 400, detail)
    }

    #[must_use]
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new("unauthorized", 401, detail)
    }

    #[must_use]
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new("not_found", 404, detail)
    }

    #[must_use]
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new("internal_error", 500, detail)
    }

    /// Translate a vault error raised while running `operation`
    /// (e.g. "Save", "Update").  Server-side failures carry the
    /// operation name so logs and clients can tell them apart.
    #[must_use]
    pub fn from_vault(err: &VaultError, operation: &str) -> Self {
        match err {
            VaultError::AuthenticationFailed => Self::unauthorized(err.to_string()),
            VaultError::SecretNotFound(_) => Self::not_found(err.to_string()),
            VaultError::InvalidSecretName(_) => Self::bad_request(err.to_string()),
            VaultError::Corrupted(_) => Self::internal(err.to_string()),
            _ => Self::internal(format!("{operation} error: {err}")),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<Json<T>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_failure_maps_to_401() {
        let error = ApiError::from_vault(&VaultError::AuthenticationFailed, "Unlock");
        assert_eq!(error.code, 401);
        assert_eq!(error.detail, "Invalid password or corrupted data");
    }

    #[test]
    fn not_found_maps_to_404() {
        let error = ApiError::from_vault(&VaultError::SecretNotFound("k".into()), "Delete");
        assert_eq!(error.code, 404);
        assert_eq!(error.detail, "Secret 'k' not found");
    }

    #[test]
    fn invalid_name_maps_to_400() {
        let error = ApiError::from_vault(&VaultError::InvalidSecretName("x".into()), "Update");
        assert_eq!(error.code, 400);
    }

    #[test]
    fn corruption_maps_to_500_without_prefix() {
        let error = ApiError::from_vault(&VaultError::Corrupted("bad".into()), "Get");
        assert_eq!(error.code, 500);
        assert!(error.detail.starts_with("Vault data corruption"));
    }

    #[test]
    fn io_error_maps_to_500_with_operation() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = ApiError::from_vault(&VaultError::Io(io), "Save");
        assert_eq!(error.code, 500);
        assert!(error.detail.starts_with("Save error:"));
    }

    #[test]
    fn serializes_detail_field() {
        let json = serde_json::to_string(&ApiError::not_found("gone")).unwrap();
        assert!(json.contains("\"detail\":\"gone\""));
        assert!(json.contains("404"));
    }
}
