//! API Routes
//!
//! Every route lives in [`ROUTE_TABLE`]. The router and the published route
//! catalogue are both built from it, so they cannot disagree.

use axum::{
    extract::State,
    routing::{on, MethodFilter, MethodRouter},
    Router,
};
use noebs_fields::{build_route_catalogue, RouteEntry, ShapeId};
use std::sync::Arc;

use crate::extractors::{RequestId, SwitchPayload};
use crate::handlers;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }

    fn filter(self) -> MethodFilter {
        match self {
            Self::Get => MethodFilter::GET,
            Self::Post => MethodFilter::POST,
        }
    }
}

/// What a route does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    /// Forward to the switch, validating against the shape
    Transaction(ShapeId),
    /// Forward the operation named by the path tail
    SwitchPassthrough,
    Health,
    RouteCatalogue,
    FieldDocs,
    ShapeDocs,
    ApiReference,
}

#[derive(Debug, Clone, Copy)]
pub struct RouteSpec {
    pub method: HttpMethod,
    pub path: &'static str,
    pub target: RouteTarget,
}

impl RouteSpec {
    const fn get(path: &'static str, target: RouteTarget) -> Self {
        Self { method: HttpMethod::Get, path, target }
    }

    const fn post(path: &'static str, shape: ShapeId) -> Self {
        Self { method: HttpMethod::Post, path, target: RouteTarget::Transaction(shape) }
    }

    /// Switch operation name: the path without its leading separator
    pub fn endpoint(&self) -> &'static str {
        self.path.strip_prefix('/').unwrap_or(self.path)
    }

    fn method_router(&self) -> MethodRouter<Arc<AppState>> {
        let filter = self.method.filter();
        match self.target {
            RouteTarget::Transaction(shape) => {
                let endpoint = self.endpoint();
                on(
                    filter,
                    move |state: State<Arc<AppState>>, request_id: RequestId, payload: SwitchPayload| {
                        handlers::transaction::forward(state, request_id, payload, shape, endpoint)
                    },
                )
            }
            RouteTarget::SwitchPassthrough => on(filter, handlers::transaction::forward_ebs),
            RouteTarget::Health => on(filter, handlers::health::health_check),
            RouteTarget::RouteCatalogue => on(filter, handlers::docs::list_routes),
            RouteTarget::FieldDocs => on(filter, handlers::docs::describe_path),
            RouteTarget::ShapeDocs => on(filter, handlers::docs::describe_shape),
            RouteTarget::ApiReference => on(filter, handlers::docs::api_reference),
        }
    }
}

/// Every route the API exposes, in registration order
pub const ROUTE_TABLE: &[RouteSpec] = &[
    RouteSpec::get("/health", RouteTarget::Health),
    RouteSpec {
        method: HttpMethod::Post,
        path: "/ebs/*all",
        target: RouteTarget::SwitchPassthrough,
    },
    // Switch operations
    RouteSpec::post("/workingKey", ShapeId::WorkingKey),
    RouteSpec::post("/cardTransfer", ShapeId::CardTransfer),
    RouteSpec::post("/voucher", ShapeId::GenericResponse),
    RouteSpec::post("/voucher/cash_in", ShapeId::GenericResponse),
    RouteSpec::post("/cashout", ShapeId::GenericResponse),
    RouteSpec::post("/purchase", ShapeId::Purchase),
    RouteSpec::post("/cashIn", ShapeId::CashIn),
    RouteSpec::post("/cashOut", ShapeId::CashOut),
    RouteSpec::post("/billInquiry", ShapeId::BillInquiry),
    RouteSpec::post("/billPayment", ShapeId::BillPayment),
    RouteSpec::post("/bills", ShapeId::GenericResponse),
    RouteSpec::post("/changePin", ShapeId::ChangePin),
    RouteSpec::post("/miniStatement", ShapeId::MiniStatement),
    RouteSpec::post("/isAlive", ShapeId::IsAlive),
    RouteSpec::post("/balance", ShapeId::Balance),
    RouteSpec::post("/refund", ShapeId::Refund),
    RouteSpec::post("/toAccount", ShapeId::GenericResponse),
    RouteSpec::post("/statement", ShapeId::GenericResponse),
    RouteSpec::post("/purchaseWithCashBack", ShapeId::PurchaseWithCashBack),
    RouteSpec::post("/reverse", ShapeId::Reverse),
    // Documentation
    RouteSpec::get("/docs/routes", RouteTarget::RouteCatalogue),
    RouteSpec::get("/docs/fields", RouteTarget::FieldDocs),
    RouteSpec::get("/docs/shapes/:shape", RouteTarget::ShapeDocs),
    RouteSpec::get("/docs/reference", RouteTarget::ApiReference),
];

/// Create the routes of [`ROUTE_TABLE`]
pub fn api_routes() -> Router<Arc<AppState>> {
    ROUTE_TABLE
        .iter()
        .fold(Router::new(), |router, route| router.route(route.path, route.method_router()))
}

/// Shape declared for the dedicated route of a switch operation.
///
/// Operations without one have no structured schema.
pub fn shape_for_endpoint(endpoint: &str) -> ShapeId {
    ROUTE_TABLE
        .iter()
        .find_map(|route| match route.target {
            RouteTarget::Transaction(shape) if route.endpoint() == endpoint => Some(shape),
            _ => None,
        })
        .unwrap_or(ShapeId::GenericResponse)
}

/// Catalogue snapshot of [`ROUTE_TABLE`]
pub fn route_catalogue() -> Vec<RouteEntry> {
    build_route_catalogue(ROUTE_TABLE.iter().map(|route| (route.method.as_str(), route.path)))
}

/// Swagger UI routes
pub fn swagger_routes() -> Router<Arc<AppState>> {
    use crate::openapi::ApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
