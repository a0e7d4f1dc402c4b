//! Endpoint → shape resolution
//!
//! Used to attach schema documentation to a path. Dispatch of live traffic
//! belongs to the transport layer and never goes through here.

use crate::shape::ShapeId;

/// Ordered keyword table. The first keyword found as a substring of the
/// path wins, so longer keywords must precede their prefixes.
pub const ENDPOINT_KEYWORDS: &[(&str, ShapeId)] = &[
    ("cashIn", ShapeId::CashIn),
    ("cashOut", ShapeId::CashOut),
    ("balance", ShapeId::Balance),
    ("billPayment", ShapeId::BillPayment),
    ("billInquiry", ShapeId::BillInquiry),
    ("cardTransfer", ShapeId::CardTransfer),
    ("changePin", ShapeId::ChangePin),
    ("miniStatement", ShapeId::MiniStatement),
    ("purchaseWithCashBack", ShapeId::PurchaseWithCashBack),
    ("purchase", ShapeId::Purchase),
    ("refund", ShapeId::Refund),
    ("reverse", ShapeId::Reverse),
    ("workingKey", ShapeId::WorkingKey),
    ("isAlive", ShapeId::IsAlive),
];

/// Resolve a request path to the shape that governs it.
///
/// Matching is case-sensitive. Paths matching no keyword resolve to
/// [`ShapeId::GenericResponse`], meaning "no structured schema available".
pub fn resolve(path: &str) -> ShapeId {
    let shape = ENDPOINT_KEYWORDS
        .iter()
        .find(|(keyword, _)| path.contains(keyword))
        .map(|(_, shape)| *shape)
        .unwrap_or(ShapeId::GenericResponse);

    tracing::debug!(path, shape = %shape, "resolved endpoint shape");
    shape
}
