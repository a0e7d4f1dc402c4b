//! Switch Transaction Handler
//!
//! Every switch route shares one flow. The route table binds each path to
//! its shape and switch operation name; the `/ebs/` passthrough looks the
//! operation up in the same table.

use axum::{
    extract::{Path, State},
    Json,
};
use noebs_fields::{mask_sensitive_fields, ShapeId};
use serde_json::Value;
use std::sync::Arc;

use crate::dto::TransactionResponse;
use crate::error::{ApiError, ApiResult};
use crate::extractors::{RequestId, SwitchPayload};
use crate::routes::shape_for_endpoint;
use crate::state::AppState;
use crate::validation::validate_payload;

/// Validate, forward to the switch and return the sanitized envelope
#[utoipa::path(
    post,
    path = "/{endpoint}",
    tag = "Switch",
    params(
        ("endpoint" = String, Path, description = "Switch operation, e.g. cashIn or cardTransfer")
    ),
    responses(
        (status = 200, description = "Approved", body = TransactionResponse),
        (status = 400, description = "Invalid payload", body = crate::error::ErrorResponse),
        (status = 502, description = "Rejected by the switch", body = crate::error::ErrorResponse),
        (status = 503, description = "Switch unavailable", body = crate::error::ErrorResponse),
        (status = 504, description = "Switch timed out", body = crate::error::ErrorResponse)
    )
)]
pub async fn forward(
    State(state): State<Arc<AppState>>,
    RequestId(request_id): RequestId,
    SwitchPayload(payload): SwitchPayload,
    shape: ShapeId,
    endpoint: &'static str,
) -> ApiResult<Json<TransactionResponse>> {
    dispatch(&state, &request_id, &payload, shape, endpoint).await
}

/// Forward any switch operation under `/ebs/`
///
/// Operations with a dedicated route are validated against that route's
/// shape. Anything else only has to be a JSON object.
#[utoipa::path(
    post,
    path = "/ebs/{operation}",
    tag = "Switch",
    params(
        ("operation" = String, Path, description = "Switch operation, e.g. cardTransfer")
    ),
    responses(
        (status = 200, description = "Approved", body = TransactionResponse),
        (status = 400, description = "Invalid payload", body = crate::error::ErrorResponse),
        (status = 404, description = "Malformed operation name", body = crate::error::ErrorResponse),
        (status = 502, description = "Rejected by the switch", body = crate::error::ErrorResponse),
        (status = 503, description = "Switch unavailable", body = crate::error::ErrorResponse),
        (status = 504, description = "Switch timed out", body = crate::error::ErrorResponse)
    )
)]
pub async fn forward_ebs(
    State(state): State<Arc<AppState>>,
    RequestId(request_id): RequestId,
    Path(operation): Path<String>,
    SwitchPayload(payload): SwitchPayload,
) -> ApiResult<Json<TransactionResponse>> {
    let operation = operation.trim_start_matches('/');
    if !is_operation_name(operation) {
        return Err(ApiError::NotFound(format!("switch operation '{operation}'")));
    }
    let shape = shape_for_endpoint(operation);
    dispatch(&state, &request_id, &payload, shape, operation).await
}

/// Operation names are single path segments of ASCII letters, digits and `_`
fn is_operation_name(operation: &str) -> bool {
    !operation.is_empty()
        && operation
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

async fn dispatch(
    state: &AppState,
    request_id: &str,
    payload: &Value,
    shape: ShapeId,
    endpoint: &str,
) -> ApiResult<Json<TransactionResponse>> {
    if let Err(err) = validate_payload(shape, payload) {
        record(endpoint, "invalid");
        return Err(err);
    }

    let envelope = match state.switch.send(endpoint, payload).await {
        Ok(envelope) => mask_sensitive_fields(envelope),
        Err(err) => {
            record(endpoint, "unavailable");
            return Err(err.into());
        }
    };

    tracing::info!(
        request_id = %request_id,
        endpoint,
        %shape,
        pan = %envelope.pan,
        response_code = envelope.outcome.response_code,
        "switch transaction"
    );

    if envelope.is_approved() {
        record(endpoint, "approved");
        return Ok(Json(TransactionResponse { ebs_response: envelope }));
    }

    tracing::warn!(
        request_id = %request_id,
        endpoint,
        response_code = envelope.outcome.response_code,
        message = %envelope.outcome.response_message,
        "switch rejected transaction"
    );
    record(endpoint, "rejected");
    Err(ApiError::SwitchRejected {
        code: envelope.outcome.response_code,
        message: envelope.outcome.response_message.clone(),
        envelope: Box::new(envelope),
    })
}

fn record(endpoint: &str, outcome: &'static str) {
    metrics::counter!(
        "noebs_switch_requests_total",
        "endpoint" => endpoint.to_owned(),
        "outcome" => outcome
    )
    .increment(1);
}
