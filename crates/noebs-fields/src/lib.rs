//! noebs fields - transaction shapes for the payment switch boundary
//!
//! Every request the boundary accepts is described by a *shape*: a static
//! union of a few primitive field groups. This crate owns those declarations
//! and the pure operations over them:
//!
//! - field groups and the composite shape catalogue ([`groups`], [`shape`])
//! - schema introspection ([`describe`])
//! - endpoint → shape resolution ([`resolve`])
//! - route catalogue building ([`build_route_catalogue`])
//! - card-number sanitizing of switch responses ([`mask_sensitive_fields`])
//!
//! # Shapes
//!
//! ```text
//! Context      systemTraceAuditNumber, tranDateTime, terminalId(8), clientId
//! Credential   PAN, PIN, expDate
//! Amount       tranAmount, tranCurrencyCode?
//! Biller       personalPaymentInfo, payeeId
//!
//! CardTransfer = Context + Credential + Amount + toCard
//! BillPayment  = Context + Credential + Amount + Biller
//! Purchase     = WorkingKey + Credential + Amount
//! CashIn       = Purchase
//! ```
//!
//! All operations are stateless and safe to call from any thread.

pub mod error;
pub mod field;
pub mod groups;
pub mod shape;
pub mod introspect;
pub mod resolver;
pub mod routes;
pub mod envelope;
pub mod reference;

pub use error::*;
pub use field::{FieldGroup, FieldSpec, FieldType, Requirement};
pub use shape::{Component, Shape, ShapeId};
pub use introspect::{describe, describe_shape, flatten, FieldDescriptor};
pub use resolver::{resolve, ENDPOINT_KEYWORDS};
pub use routes::{build_route_catalogue, RouteEntry};
pub use envelope::{mask_pan, mask_sensitive_fields, ResponseEnvelope, SwitchOutcome};
pub use reference::{api_reference, document, EndpointDoc};
