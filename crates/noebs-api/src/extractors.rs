//! Custom Axum Extractors
//!
//! Request extractors for switch payloads, validated queries and request ids.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

// =============================================================================
// Switch Payload Extractor
// =============================================================================

/// Raw JSON body of a switch request.
///
/// Shape validation happens in the handler, once the route's shape is known.
pub struct SwitchPayload(pub Value);

#[async_trait]
impl<S> FromRequest<S> for SwitchPayload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "rejected request body");
            error_response(ApiError::InvalidRequestBody)
        })?;

        Ok(SwitchPayload(value))
    }
}

// =============================================================================
// Validated Query Extractor
// =============================================================================

/// Query extractor with validation
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + validator::Validate,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| error_response(ApiError::BadRequest(e.to_string())))?;

        value.validate().map_err(|e| error_response(ApiError::from(e)))?;

        Ok(ValidatedQuery(value))
    }
}

// =============================================================================
// Request ID Extractor
// =============================================================================

/// Extract request ID from headers
pub struct RequestId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(RequestId(request_id))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Create error response from ApiError
pub fn error_response(error: ApiError) -> Response {
    error.into_response()
}
