//! Data Transfer Objects
//!
//! Response bodies of the transaction and documentation endpoints.

use noebs_fields::{FieldDescriptor, ResponseEnvelope, ShapeId};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

// =============================================================================
// Transactions
// =============================================================================

/// Approved switch transaction
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    /// Sanitized switch envelope
    pub ebs_response: ResponseEnvelope,
}

// =============================================================================
// Documentation
// =============================================================================

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FieldsQuery {
    /// Route path to document, e.g. `/ebs/cardTransfer`
    #[validate(length(min = 1, message = "path must not be empty"))]
    pub path: String,
}

/// Fields of the shape a path resolves to
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FieldsDocResponse {
    pub path: String,
    pub shape: ShapeId,
    pub fields: Vec<FieldDescriptor>,
}

/// Fields of a named shape
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShapeDocResponse {
    pub shape: ShapeId,
    pub fields: Vec<FieldDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_query_rejects_empty_path() {
        assert!(FieldsQuery { path: String::new() }.validate().is_err());
        assert!(FieldsQuery { path: "/balance".into() }.validate().is_ok());
    }
}
