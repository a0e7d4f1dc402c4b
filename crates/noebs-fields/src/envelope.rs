//! Switch response envelope and card-data sanitizer
//!
//! The envelope is built once per transaction result and must pass through
//! [`mask_sensitive_fields`] before it is logged, stored or returned. After
//! masking, no card-number field carries more than its last four characters.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Number of trailing card-number characters allowed past the boundary
pub const VISIBLE_PAN_DIGITS: usize = 4;

/// Outcome reported by the switch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SwitchOutcome {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub response_message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub response_status: String,
    /// Zero means approved. Mandatory on the wire.
    pub response_code: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reference_number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub approval_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voucher_number: Option<i64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mini_statement_records: String,
    #[serde(rename = "DisputeRRN", default, skip_serializing_if = "String::is_empty")]
    pub dispute_rrn: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub additional_data: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tran_date_time: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<f64>))]
    pub tran_fee: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<f64>))]
    pub additional_amount: Option<Decimal>,
}

/// Switch response plus echoed context and payment identifiers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    #[serde(flatten)]
    pub outcome: SwitchOutcome,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub terminal_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_trace_audit_number: Option<i64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_id: String,

    #[serde(rename = "PAN", default, skip_serializing_if = "String::is_empty")]
    pub pan: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service_id: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<f64>))]
    pub tran_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub from_account: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub to_account: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub from_card: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub to_card: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub otp: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub otp_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tran_currency_code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub working_key: String,
}

impl ResponseEnvelope {
    /// Whether the switch approved the transaction
    pub fn is_approved(&self) -> bool {
        self.outcome.response_code == 0
    }

    /// Reduce every card-number field to its trailing digits, in place
    pub fn mask_sensitive_fields(&mut self) {
        for field in [&mut self.pan, &mut self.to_card, &mut self.from_card] {
            mask_in_place(field);
        }
    }
}

fn mask_in_place(value: &mut String) {
    let masked = match mask_pan(value) {
        Cow::Owned(masked) => masked,
        Cow::Borrowed(_) => return,
    };
    *value = masked;
}

/// Consume an envelope and return its sanitized form
pub fn mask_sensitive_fields(mut envelope: ResponseEnvelope) -> ResponseEnvelope {
    envelope.mask_sensitive_fields();
    envelope
}

/// Keep only the last [`VISIBLE_PAN_DIGITS`] characters of a card number.
///
/// Empty values and values of four characters or fewer are returned as-is.
pub fn mask_pan(value: &str) -> Cow<'_, str> {
    let len = value.chars().count();
    if len <= VISIBLE_PAN_DIGITS {
        return Cow::Borrowed(value);
    }
    let start = value
        .char_indices()
        .nth(len - VISIBLE_PAN_DIGITS)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    Cow::Owned(value[start..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn envelope(pan: &str, to_card: &str, from_card: &str) -> ResponseEnvelope {
        ResponseEnvelope {
            pan: pan.to_string(),
            to_card: to_card.to_string(),
            from_card: from_card.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_mask_full_pan() {
        let masked = mask_sensitive_fields(envelope("5061234567890123", "", ""));
        assert_eq!(masked.pan, "0123");
    }

    #[test]
    fn test_mask_empty_untouched() {
        let masked = mask_sensitive_fields(envelope("", "", ""));
        assert_eq!(masked.pan, "");
        assert_eq!(masked.to_card, "");
        assert_eq!(masked.from_card, "");
    }

    #[test]
    fn test_mask_short_value_unchanged() {
        let masked = mask_sensitive_fields(envelope("12", "123", "1234"));
        assert_eq!(masked.pan, "12");
        assert_eq!(masked.to_card, "123");
        assert_eq!(masked.from_card, "1234");
    }

    #[test]
    fn test_mask_all_card_fields() {
        let masked = mask_sensitive_fields(envelope(
            "5061234567890123",
            "6280111122223333",
            "9222000011119876",
        ));
        assert_eq!(masked.pan, "0123");
        assert_eq!(masked.to_card, "3333");
        assert_eq!(masked.from_card, "9876");
    }

    #[test]
    fn test_mask_idempotent() {
        let once = mask_sensitive_fields(envelope("5061234567890123", "12", ""));
        let twice = mask_sensitive_fields(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mask_multibyte_does_not_fault() {
        assert_eq!(mask_pan("٥٠٦١٢٣٤٥"), "٢٣٤٥");
        assert_eq!(mask_pan("ab٤"), "ab٤");
    }

    #[test]
    fn test_mask_leaves_other_fields() {
        let mut env = envelope("5061234567890123", "", "");
        env.phone_number = "0912345678".to_string();
        env.to_account = "1234567890123".to_string();
        env.mask_sensitive_fields();
        assert_eq!(env.phone_number, "0912345678");
        assert_eq!(env.to_account, "1234567890123");
    }

    #[test]
    fn test_envelope_wire_format() {
        let json = serde_json::json!({
            "responseMessage": "Approved",
            "responseStatus": "Successful",
            "responseCode": 0,
            "referenceNumber": "094018",
            "DisputeRRN": "000000094018",
            "tranFee": 1.5,
            "terminalId": "18000377",
            "systemTraceAuditNumber": 42,
            "PAN": "5061234567890123",
            "tranAmount": 100.25,
            "toCard": "6280111122223333"
        });
        let env: ResponseEnvelope = serde_json::from_value(json).unwrap();
        assert!(env.is_approved());
        assert_eq!(env.outcome.dispute_rrn, "000000094018");
        assert_eq!(env.outcome.tran_fee, Some(dec!(1.5)));
        assert_eq!(env.tran_amount, Some(dec!(100.25)));
        assert_eq!(env.system_trace_audit_number, Some(42));

        let out = serde_json::to_value(mask_sensitive_fields(env)).unwrap();
        assert_eq!(out["PAN"], "0123");
        assert_eq!(out["toCard"], "3333");
        assert_eq!(out["responseCode"], 0);
        assert!(out.get("fromCard").is_none());
    }

    #[test]
    fn test_rejected_envelope() {
        let env: ResponseEnvelope =
            serde_json::from_value(serde_json::json!({"responseCode": 51})).unwrap();
        assert!(!env.is_approved());
    }

    #[test]
    fn test_envelope_without_response_code_is_rejected() {
        for body in [
            serde_json::json!({}),
            serde_json::json!({"error": "database down"}),
            serde_json::json!({"responseMessage": "Approved", "PAN": "5061234567890123"}),
        ] {
            assert!(serde_json::from_value::<ResponseEnvelope>(body).is_err());
        }
    }
}
