//! Composite shape catalogue
//!
//! A shape is a union of field groups, other shapes and standalone fields.
//! Every transaction kind the boundary accepts is declared here as a static
//! composition table; `ShapeId` is the registry over those tables.
//!
//! ```text
//! Purchase  = WorkingKey + Credential + Amount
//! CashIn    = Purchase
//! WorkingKey = Context
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FieldsError;
use crate::field::{FieldGroup, FieldSpec, FieldType};
use crate::groups::{
    AMOUNT, BILLER, CONTEXT, CREDENTIAL, ECHOED_CONTEXT, PAYMENT_IDENTIFIERS, SWITCH_OUTCOME,
};

/// One contributor to a composite shape
#[derive(Debug)]
pub enum Component {
    Group(&'static FieldGroup),
    Shape(&'static Shape),
    Field(FieldSpec),
}

/// A named composition of components, in combination order
#[derive(Debug)]
pub struct Shape {
    pub name: &'static str,
    pub components: &'static [Component],
}

impl Shape {
    pub const fn new(name: &'static str, components: &'static [Component]) -> Self {
        Self { name, components }
    }
}

// =============================================================================
// Catalogue
// =============================================================================

pub static IS_ALIVE: Shape = Shape::new("IsAlive", &[Component::Group(&CONTEXT)]);

pub static WORKING_KEY: Shape = Shape::new("WorkingKey", &[Component::Group(&CONTEXT)]);

pub static BALANCE: Shape = Shape::new(
    "Balance",
    &[Component::Group(&CONTEXT), Component::Group(&CREDENTIAL)],
);

pub static MINI_STATEMENT: Shape = Shape::new(
    "MiniStatement",
    &[Component::Group(&CONTEXT), Component::Group(&CREDENTIAL)],
);

pub static CHANGE_PIN: Shape = Shape::new(
    "ChangePin",
    &[
        Component::Group(&CONTEXT),
        Component::Group(&CREDENTIAL),
        Component::Field(FieldSpec::required("newPIN", FieldType::String)),
    ],
);

pub static CARD_TRANSFER: Shape = Shape::new(
    "CardTransfer",
    &[
        Component::Group(&CONTEXT),
        Component::Group(&CREDENTIAL),
        Component::Group(&AMOUNT),
        Component::Field(FieldSpec::required("toCard", FieldType::String)),
    ],
);

pub static PURCHASE: Shape = Shape::new(
    "Purchase",
    &[
        Component::Shape(&WORKING_KEY),
        Component::Group(&CREDENTIAL),
        Component::Group(&AMOUNT),
    ],
);

pub static BILL_PAYMENT: Shape = Shape::new(
    "BillPayment",
    &[
        Component::Group(&CONTEXT),
        Component::Group(&CREDENTIAL),
        Component::Group(&AMOUNT),
        Component::Group(&BILLER),
    ],
);

pub static BILL_INQUIRY: Shape = Shape::new(
    "BillInquiry",
    &[
        Component::Group(&CONTEXT),
        Component::Group(&CREDENTIAL),
        Component::Group(&AMOUNT),
        Component::Group(&BILLER),
    ],
);

pub static CASH_IN: Shape = Shape::new("CashIn", &[Component::Shape(&PURCHASE)]);

pub static CASH_OUT: Shape = Shape::new("CashOut", &[Component::Shape(&PURCHASE)]);

pub static REFUND: Shape = Shape::new("Refund", &[Component::Shape(&PURCHASE)]);

pub static PURCHASE_WITH_CASH_BACK: Shape =
    Shape::new("PurchaseWithCashBack", &[Component::Shape(&PURCHASE)]);

pub static REVERSE: Shape = Shape::new("Reverse", &[Component::Shape(&PURCHASE)]);

/// Unstructured fallback: the switch response envelope
pub static GENERIC_RESPONSE: Shape = Shape::new(
    "GenericResponse",
    &[
        Component::Group(&SWITCH_OUTCOME),
        Component::Group(&ECHOED_CONTEXT),
        Component::Group(&PAYMENT_IDENTIFIERS),
    ],
);

// =============================================================================
// Registry
// =============================================================================

/// Identifier of a catalogued shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ShapeId {
    IsAlive,
    WorkingKey,
    Balance,
    MiniStatement,
    ChangePin,
    CardTransfer,
    Purchase,
    BillPayment,
    BillInquiry,
    CashIn,
    CashOut,
    Refund,
    PurchaseWithCashBack,
    Reverse,
    GenericResponse,
}

impl ShapeId {
    pub const ALL: [ShapeId; 15] = [
        ShapeId::IsAlive,
        ShapeId::WorkingKey,
        ShapeId::Balance,
        ShapeId::MiniStatement,
        ShapeId::ChangePin,
        ShapeId::CardTransfer,
        ShapeId::Purchase,
        ShapeId::BillPayment,
        ShapeId::BillInquiry,
        ShapeId::CashIn,
        ShapeId::CashOut,
        ShapeId::Refund,
        ShapeId::PurchaseWithCashBack,
        ShapeId::Reverse,
        ShapeId::GenericResponse,
    ];

    /// The static declaration behind this identifier
    pub fn shape(self) -> &'static Shape {
        match self {
            Self::IsAlive => &IS_ALIVE,
            Self::WorkingKey => &WORKING_KEY,
            Self::Balance => &BALANCE,
            Self::MiniStatement => &MINI_STATEMENT,
            Self::ChangePin => &CHANGE_PIN,
            Self::CardTransfer => &CARD_TRANSFER,
            Self::Purchase => &PURCHASE,
            Self::BillPayment => &BILL_PAYMENT,
            Self::BillInquiry => &BILL_INQUIRY,
            Self::CashIn => &CASH_IN,
            Self::CashOut => &CASH_OUT,
            Self::Refund => &REFUND,
            Self::PurchaseWithCashBack => &PURCHASE_WITH_CASH_BACK,
            Self::Reverse => &REVERSE,
            Self::GenericResponse => &GENERIC_RESPONSE,
        }
    }

    pub fn name(self) -> &'static str {
        self.shape().name
    }

    /// Whether this is the unstructured fallback
    pub fn is_generic(self) -> bool {
        self == Self::GenericResponse
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeId {
    type Err = FieldsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeId::ALL
            .iter()
            .copied()
            .find(|id| id.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| FieldsError::UnknownShape(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names_match_declarations() {
        for id in ShapeId::ALL {
            assert_eq!(format!("{:?}", id), id.shape().name);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("CashOut".parse::<ShapeId>().unwrap(), ShapeId::CashOut);
        assert_eq!("cardtransfer".parse::<ShapeId>().unwrap(), ShapeId::CardTransfer);
        assert!(matches!(
            "Voucher".parse::<ShapeId>(),
            Err(FieldsError::UnknownShape(name)) if name == "Voucher"
        ));
    }

    #[test]
    fn test_purchase_family_reuses_purchase() {
        for id in [
            ShapeId::CashIn,
            ShapeId::CashOut,
            ShapeId::Refund,
            ShapeId::PurchaseWithCashBack,
            ShapeId::Reverse,
        ] {
            let shape = id.shape();
            assert_eq!(shape.components.len(), 1);
            assert!(matches!(shape.components[0], Component::Shape(s) if s.name == "Purchase"));
        }
    }

    #[test]
    fn test_only_generic_is_generic() {
        assert!(ShapeId::GenericResponse.is_generic());
        assert!(!ShapeId::Purchase.is_generic());
    }
}
