//! API reference generation
//!
//! Joins the route catalogue with endpoint resolution and introspection:
//! one entry per route, carrying the fields of the shape its path resolves to.

use serde::{Deserialize, Serialize};

use crate::introspect::{describe, FieldDescriptor};
use crate::resolver::resolve;
use crate::routes::RouteEntry;
use crate::shape::ShapeId;

/// Documentation for one route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EndpointDoc {
    pub http_method: String,
    pub path: String,
    pub shape: ShapeId,
    pub fields: Vec<FieldDescriptor>,
}

/// Document a single path
pub fn document(path: &str) -> (ShapeId, Vec<FieldDescriptor>) {
    let shape = resolve(path);
    (shape, describe(shape))
}

/// Document every route of a catalogue snapshot, in catalogue order
pub fn api_reference(routes: &[RouteEntry]) -> Vec<EndpointDoc> {
    routes
        .iter()
        .map(|route| {
            let (shape, fields) = document(&route.path);
            EndpointDoc {
                http_method: route.http_method.clone(),
                path: route.path.clone(),
                shape,
                fields,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::build_route_catalogue;

    #[test]
    fn test_reference_follows_catalogue() {
        let routes = build_route_catalogue([
            ("POST", "/cashOut"),
            ("GET", "/dashboard/all"),
            ("POST", "/billPayment"),
        ]);
        let docs = api_reference(&routes);

        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].path, "cashOut");
        assert_eq!(docs[0].shape, ShapeId::CashOut);
        assert_eq!(docs[0].fields.len(), 9);
        assert_eq!(docs[1].shape, ShapeId::GenericResponse);
        assert_eq!(docs[2].http_method, "POST");
        assert_eq!(docs[2].fields.last().unwrap().name, "payeeId");
    }

    #[test]
    fn test_document_single_path() {
        let (shape, fields) = document("/ebs/cardTransfer");
        assert_eq!(shape, ShapeId::CardTransfer);
        assert_eq!(fields.last().unwrap().name, "toCard");
    }
}
