//! OpenAPI Documentation
//!
//! OpenAPI 3.0 specification for the noebs switch API.

use utoipa::OpenApi;

use crate::dto;
use crate::error::ErrorResponse;
use crate::handlers;

/// noebs API Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "noebs API",
        description = "JSON boundary in front of the EBS payment switch: card transactions, bill payments and self-describing request shapes.",
        version = "1.0.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local Development")
    ),
    paths(
        // Health
        handlers::health::health_check,
        // Switch
        handlers::transaction::forward,
        handlers::transaction::forward_ebs,
        // Documentation
        handlers::docs::list_routes,
        handlers::docs::describe_path,
        handlers::docs::describe_shape,
        handlers::docs::api_reference,
    ),
    components(
        schemas(
            // Common
            ErrorResponse,
            handlers::health::HealthResponse,
            // Switch
            dto::TransactionResponse,
            noebs_fields::ResponseEnvelope,
            noebs_fields::SwitchOutcome,
            // Documentation
            dto::FieldsDocResponse,
            dto::ShapeDocResponse,
            noebs_fields::ShapeId,
            noebs_fields::FieldDescriptor,
            noebs_fields::Requirement,
            noebs_fields::FieldType,
            noebs_fields::RouteEntry,
            noebs_fields::EndpointDoc,
        )
    ),
    tags(
        (name = "Health", description = "Service health and status"),
        (name = "Switch", description = "Transactions forwarded to the payment switch"),
        (name = "Documentation", description = "Route catalogue and request field introspection")
    )
)]
pub struct ApiDoc;

/// Get the OpenAPI JSON specification
pub fn openapi_json() -> Result<String, serde_json::Error> {
    ApiDoc::openapi().to_pretty_json()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_generation() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "noebs API");
        assert_eq!(spec.info.version, "1.0.0");
    }

    #[test]
    fn test_openapi_json() {
        let json = openapi_json().unwrap();
        assert!(json.contains("/docs/shapes/{shape}"));
        assert!(json.contains("/ebs/{operation}"));
        assert!(json.contains("ResponseEnvelope"));
    }
}
