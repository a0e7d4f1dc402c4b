//! API error handling
//!
//! Every error renders as `{code, msg, details?}` with a stable numeric code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use noebs_fields::{FieldsError, ResponseEnvelope};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::switch::SwitchError;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    // =========================================================================
    // Request Errors (-1100 to -1199)
    // =========================================================================
    #[error("Invalid request body")]
    InvalidRequestBody,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // =========================================================================
    // Switch Errors (-2000 to -2099)
    // =========================================================================
    /// The switch answered with a non-zero response code. The envelope is
    /// already sanitized.
    #[error("Switch rejected transaction ({code}): {message}")]
    SwitchRejected {
        code: i32,
        message: String,
        envelope: Box<ResponseEnvelope>,
    },

    #[error("Switch unavailable: {0}")]
    SwitchUnavailable(String),

    #[error("Switch timed out")]
    SwitchTimeout,
}

impl ApiError {
    pub fn error_code(&self) -> i32 {
        match self {
            Self::InvalidRequestBody => -1100,
            Self::BadRequest(_) => -1101,
            Self::ValidationError(_) => -1102,
            Self::NotFound(_) => -1104,

            Self::SwitchRejected { .. } => -2001,
            Self::SwitchUnavailable(_) => -2002,
            Self::SwitchTimeout => -2003,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody | Self::BadRequest(_) | Self::ValidationError(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::SwitchRejected { .. } => StatusCode::BAD_GATEWAY,
            Self::SwitchUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::SwitchTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: i32,
    /// Human-readable error message
    pub msg: String,
    /// Sanitized switch envelope, for switch rejections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        let details = match err {
            ApiError::SwitchRejected { envelope, .. } => serde_json::to_value(envelope).ok(),
            _ => None,
        };
        Self {
            code: err.error_code(),
            msg: err.to_string(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

impl From<SwitchError> for ApiError {
    fn from(err: SwitchError) -> Self {
        tracing::warn!(error = %err, "switch call failed");
        match err {
            SwitchError::Timeout => Self::SwitchTimeout,
            other => Self::SwitchUnavailable(other.to_string()),
        }
    }
}

impl From<FieldsError> for ApiError {
    fn from(err: FieldsError) -> Self {
        match err {
            FieldsError::UnknownShape(_) => Self::NotFound(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!("{}: {}", field, e.message.as_ref().map(|m| m.as_ref()).unwrap_or("invalid"))
                })
            })
            .collect();
        messages.sort();
        Self::ValidationError(messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::InvalidRequestBody.error_code(), -1100);
        assert_eq!(ApiError::ValidationError("x".into()).error_code(), -1102);
        assert_eq!(ApiError::SwitchTimeout.error_code(), -2003);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::SwitchUnavailable("down".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(ApiError::SwitchTimeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_rejection_carries_envelope() {
        let envelope = ResponseEnvelope {
            pan: "0123".to_string(),
            ..Default::default()
        };
        let err = ApiError::SwitchRejected {
            code: 51,
            message: "Insufficient funds".to_string(),
            envelope: Box::new(envelope),
        };
        let body = ErrorResponse::from(&err);
        assert_eq!(body.code, -2001);
        assert_eq!(body.details.unwrap()["PAN"], "0123");
    }

    #[test]
    fn test_unknown_shape_is_not_found() {
        let err = ApiError::from(FieldsError::UnknownShape("Voucher".into()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_switch_timeout_mapping() {
        assert!(matches!(ApiError::from(SwitchError::Timeout), ApiError::SwitchTimeout));
        assert!(matches!(
            ApiError::from(SwitchError::Transport("refused".into())),
            ApiError::SwitchUnavailable(_)
        ));
    }
}
