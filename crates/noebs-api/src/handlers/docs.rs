//! Documentation Handlers
//!
//! Route catalogue, field introspection and the assembled API reference.

use axum::{
    extract::{Path, State},
    Json,
};
use noebs_fields::{describe, document, EndpointDoc, RouteEntry, ShapeId};
use std::sync::Arc;

use crate::dto::{FieldsDocResponse, FieldsQuery, ShapeDocResponse};
use crate::error::ApiResult;
use crate::extractors::ValidatedQuery;
use crate::state::AppState;

/// List every registered route
#[utoipa::path(
    get,
    path = "/docs/routes",
    tag = "Documentation",
    responses(
        (status = 200, description = "Route catalogue", body = Vec<RouteEntry>)
    )
)]
pub async fn list_routes(State(state): State<Arc<AppState>>) -> Json<Vec<RouteEntry>> {
    Json(state.catalogue.to_vec())
}

/// Describe the request fields for a route path
///
/// Paths that match no switch operation describe the generic response shape.
#[utoipa::path(
    get,
    path = "/docs/fields",
    tag = "Documentation",
    params(FieldsQuery),
    responses(
        (status = 200, description = "Resolved shape and its fields", body = FieldsDocResponse),
        (status = 400, description = "Missing path", body = crate::error::ErrorResponse)
    )
)]
pub async fn describe_path(ValidatedQuery(query): ValidatedQuery<FieldsQuery>) -> Json<FieldsDocResponse> {
    let (shape, fields) = document(&query.path);
    tracing::debug!(path = %query.path, %shape, "described path");
    Json(FieldsDocResponse {
        path: query.path,
        shape,
        fields,
    })
}

/// Describe a shape by name
#[utoipa::path(
    get,
    path = "/docs/shapes/{shape}",
    tag = "Documentation",
    params(
        ("shape" = String, Path, description = "Shape name, case-insensitive")
    ),
    responses(
        (status = 200, description = "Shape fields", body = ShapeDocResponse),
        (status = 404, description = "Unknown shape", body = crate::error::ErrorResponse)
    )
)]
pub async fn describe_shape(Path(name): Path<String>) -> ApiResult<Json<ShapeDocResponse>> {
    let shape: ShapeId = name.parse()?;
    Ok(Json(ShapeDocResponse {
        shape,
        fields: describe(shape),
    }))
}

/// Full reference: every route with the fields of its shape
#[utoipa::path(
    get,
    path = "/docs/reference",
    tag = "Documentation",
    responses(
        (status = 200, description = "API reference", body = Vec<EndpointDoc>)
    )
)]
pub async fn api_reference(State(state): State<Arc<AppState>>) -> Json<Vec<EndpointDoc>> {
    Json(noebs_fields::api_reference(&state.catalogue))
}
