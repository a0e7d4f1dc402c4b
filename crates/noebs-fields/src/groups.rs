//! Primitive field groups
//!
//! Wire names are shared with existing switch clients and must not change.

use crate::field::{FieldGroup, FieldSpec, FieldType};

/// Length of a terminal identifier
pub const TERMINAL_ID_LEN: usize = 8;

// =============================================================================
// Request groups
// =============================================================================

/// Transaction context sent with every request
pub static CONTEXT: FieldGroup = FieldGroup::new(
    "Context",
    &[
        FieldSpec::required("systemTraceAuditNumber", FieldType::Integer),
        FieldSpec::required("tranDateTime", FieldType::DateTime),
        FieldSpec::required("terminalId", FieldType::String).with_length(TERMINAL_ID_LEN),
        FieldSpec::required("clientId", FieldType::String),
    ],
);

/// Card credentials
pub static CREDENTIAL: FieldGroup = FieldGroup::new(
    "Credential",
    &[
        FieldSpec::required("PAN", FieldType::String),
        FieldSpec::required("PIN", FieldType::String),
        FieldSpec::required("expDate", FieldType::String),
    ],
);

pub static AMOUNT: FieldGroup = FieldGroup::new(
    "Amount",
    &[
        FieldSpec::required("tranAmount", FieldType::Decimal),
        FieldSpec::optional("tranCurrencyCode", FieldType::String),
    ],
);

/// Payee of a bill payment or inquiry
pub static BILLER: FieldGroup = FieldGroup::new(
    "Biller",
    &[
        FieldSpec::required("personalPaymentInfo", FieldType::String),
        FieldSpec::required("payeeId", FieldType::String),
    ],
);

// =============================================================================
// Response envelope groups
// =============================================================================

/// Outcome fields reported by the switch
pub static SWITCH_OUTCOME: FieldGroup = FieldGroup::new(
    "SwitchOutcome",
    &[
        FieldSpec::optional("responseMessage", FieldType::String),
        FieldSpec::optional("responseStatus", FieldType::String),
        FieldSpec::optional("responseCode", FieldType::Integer),
        FieldSpec::optional("referenceNumber", FieldType::String),
        FieldSpec::optional("approvalCode", FieldType::String),
        FieldSpec::optional("voucherNumber", FieldType::Integer),
        FieldSpec::optional("miniStatementRecords", FieldType::String),
        FieldSpec::optional("DisputeRRN", FieldType::String),
        FieldSpec::optional("additionalData", FieldType::String),
        FieldSpec::optional("tranDateTime", FieldType::DateTime),
        FieldSpec::optional("tranFee", FieldType::Decimal),
        FieldSpec::optional("additionalAmount", FieldType::Decimal),
    ],
);

/// Request context echoed back in a response
pub static ECHOED_CONTEXT: FieldGroup = FieldGroup::new(
    "EchoedContext",
    &[
        FieldSpec::optional("terminalId", FieldType::String),
        FieldSpec::optional("systemTraceAuditNumber", FieldType::Integer),
        FieldSpec::optional("clientId", FieldType::String),
    ],
);

pub static PAYMENT_IDENTIFIERS: FieldGroup = FieldGroup::new(
    "PaymentIdentifiers",
    &[
        FieldSpec::optional("PAN", FieldType::String),
        FieldSpec::optional("serviceId", FieldType::String),
        FieldSpec::optional("tranAmount", FieldType::Decimal),
        FieldSpec::optional("phoneNumber", FieldType::String),
        FieldSpec::optional("fromAccount", FieldType::String),
        FieldSpec::optional("toAccount", FieldType::String),
        FieldSpec::optional("fromCard", FieldType::String),
        FieldSpec::optional("toCard", FieldType::String),
        FieldSpec::optional("otp", FieldType::String),
        FieldSpec::optional("otpId", FieldType::String),
        FieldSpec::optional("tranCurrencyCode", FieldType::String),
        FieldSpec::optional("workingKey", FieldType::String),
    ],
);

/// Every primitive group, requests first
pub static ALL_GROUPS: &[&FieldGroup] = &[
    &CONTEXT,
    &CREDENTIAL,
    &AMOUNT,
    &BILLER,
    &SWITCH_OUTCOME,
    &ECHOED_CONTEXT,
    &PAYMENT_IDENTIFIERS,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Requirement;
    use std::collections::HashSet;

    #[test]
    fn test_every_field_has_a_wire_name() {
        for group in ALL_GROUPS {
            for field in group.fields {
                assert!(!field.name.is_empty(), "unnamed field in {}", group.name);
            }
        }
    }

    #[test]
    fn test_wire_names_unique_within_group() {
        for group in ALL_GROUPS {
            let names: HashSet<_> = group.fields.iter().map(|f| f.name).collect();
            assert_eq!(names.len(), group.fields.len(), "duplicate name in {}", group.name);
        }
    }

    #[test]
    fn test_context_declarations() {
        let terminal = CONTEXT.field("terminalId").unwrap();
        assert_eq!(terminal.length, Some(8));
        assert_eq!(terminal.requirement, Requirement::Required);
        assert_eq!(
            CONTEXT.field("tranDateTime").unwrap().field_type,
            FieldType::DateTime
        );
        assert_eq!(CONTEXT.required_fields().count(), 4);
    }

    #[test]
    fn test_amount_currency_is_optional() {
        assert_eq!(AMOUNT.required_fields().collect::<Vec<_>>(), vec!["tranAmount"]);
        assert_eq!(AMOUNT.field("tranAmount").unwrap().field_type, FieldType::Decimal);
    }

    #[test]
    fn test_envelope_groups_are_optional() {
        for group in [&SWITCH_OUTCOME, &ECHOED_CONTEXT, &PAYMENT_IDENTIFIERS] {
            assert_eq!(group.required_fields().count(), 0, "{}", group.name);
        }
    }
}
