//! Request payload validation against a shape
//!
//! Shapes declare the rules; this module enforces them on a JSON body and
//! reports failures as `validator::ValidationErrors`.

use chrono::DateTime;
use noebs_fields::{flatten, FieldSpec, FieldType, ShapeId};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::str::FromStr;
use validator::{ValidationError, ValidationErrors};

use crate::error::{ApiError, ApiResult};

/// Check a request body against the fields of `shape`.
///
/// Unknown keys are ignored. Optional fields are only checked when present.
pub fn validate_payload(shape: ShapeId, payload: &Value) -> ApiResult<()> {
    let object = payload.as_object().ok_or(ApiError::InvalidRequestBody)?;
    check_object(shape, object).map_err(ApiError::from)
}

fn check_object(shape: ShapeId, object: &Map<String, Value>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for spec in flatten(shape.shape()) {
        if let Err(error) = check_field(&spec, object.get(spec.name)) {
            errors.add(spec.name, error);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_field(spec: &FieldSpec, value: Option<&Value>) -> Result<(), ValidationError> {
    let value = match value {
        None | Some(Value::Null) => {
            return if spec.requirement.is_required() {
                Err(failure("required", "is required".into()))
            } else {
                Ok(())
            };
        }
        Some(value) => value,
    };

    if spec.requirement.is_required() && value.as_str().is_some_and(str::is_empty) {
        return Err(failure("required", "is required".into()));
    }

    let is_zero = match spec.field_type {
        FieldType::Integer => check_integer(value)? == 0,
        FieldType::Decimal => check_decimal(value)?.is_zero(),
        FieldType::DateTime => {
            check_datetime(value)?;
            false
        }
        FieldType::String => {
            if !value.is_string() {
                return Err(failure("string", "must be a string".into()));
            }
            false
        }
    };

    // A zero number counts as absent for a required field.
    if is_zero && spec.requirement.is_required() {
        return Err(failure("required", "is required".into()));
    }

    if let (Some(len), Some(text)) = (spec.length, value.as_str()) {
        if text.chars().count() != len {
            return Err(failure("len", format!("must be exactly {len} characters").into()));
        }
    }

    Ok(())
}

fn check_integer(value: &Value) -> Result<i128, ValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().map(i128::from).or_else(|| n.as_u64().map(i128::from)),
        Value::String(s) => s.parse::<i64>().ok().map(i128::from),
        _ => None,
    };
    parsed.ok_or_else(|| failure("integer", "must be an integer".into()))
}

fn check_decimal(value: &Value) -> Result<Decimal, ValidationError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => return Err(failure("decimal", "must be a decimal amount".into())),
    };
    parse_decimal(&text).ok_or_else(|| failure("decimal", "must be a decimal amount".into()))
}

/// Parse an amount without passing through binary floating point
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn check_datetime(value: &Value) -> Result<(), ValidationError> {
    match value.as_str().map(DateTime::parse_from_rfc3339) {
        Some(Ok(_)) => Ok(()),
        _ => Err(failure("iso8601", "must be an RFC 3339 date-time".into())),
    }
}

fn failure(code: &'static str, message: Cow<'static, str>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message);
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn purchase() -> Value {
        json!({
            "systemTraceAuditNumber": 17,
            "tranDateTime": "2024-03-01T10:15:00+03:00",
            "terminalId": "18000377",
            "clientId": "noebs",
            "PAN": "5061234567890123",
            "PIN": "a7b3",
            "expDate": "2503",
            "tranAmount": 150.75,
        })
    }

    fn message(err: ApiError) -> String {
        match err {
            ApiError::ValidationError(msg) => msg,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_valid_purchase() {
        assert!(validate_payload(ShapeId::Purchase, &purchase()).is_ok());
    }

    #[test]
    fn test_optional_currency_checked_when_present() {
        let mut body = purchase();
        body["tranCurrencyCode"] = json!("SDG");
        assert!(validate_payload(ShapeId::CashIn, &body).is_ok());

        body["tranCurrencyCode"] = json!(938);
        let msg = message(validate_payload(ShapeId::CashIn, &body).unwrap_err());
        assert_eq!(msg, "tranCurrencyCode: must be a string");
    }

    #[test]
    fn test_missing_required_fields_reported() {
        let mut body = purchase();
        body.as_object_mut().unwrap().remove("PAN");
        body["PIN"] = json!("");
        let msg = message(validate_payload(ShapeId::Purchase, &body).unwrap_err());
        assert!(msg.contains("PAN: is required"), "{msg}");
        assert!(msg.contains("PIN: is required"), "{msg}");
    }

    #[test]
    fn test_terminal_id_length() {
        let mut body = purchase();
        body["terminalId"] = json!("1800037");
        let msg = message(validate_payload(ShapeId::Purchase, &body).unwrap_err());
        assert_eq!(msg, "terminalId: must be exactly 8 characters");
    }

    #[test]
    fn test_datetime_rule() {
        let mut body = purchase();
        body["tranDateTime"] = json!("01/03/2024 10:15");
        let msg = message(validate_payload(ShapeId::Purchase, &body).unwrap_err());
        assert_eq!(msg, "tranDateTime: must be an RFC 3339 date-time");
    }

    #[test]
    fn test_amount_rules() {
        let mut body = purchase();
        body["tranAmount"] = json!("1500.10");
        assert!(validate_payload(ShapeId::Purchase, &body).is_ok());

        body["tranAmount"] = json!("lots");
        let msg = message(validate_payload(ShapeId::Purchase, &body).unwrap_err());
        assert_eq!(msg, "tranAmount: must be a decimal amount");
    }

    #[test]
    fn test_required_numbers_reject_zero() {
        let mut body = purchase();
        body["tranAmount"] = json!(0);
        body["systemTraceAuditNumber"] = json!(0);
        let msg = message(validate_payload(ShapeId::Purchase, &body).unwrap_err());
        assert_eq!(msg, "systemTraceAuditNumber: is required, tranAmount: is required");

        body["tranAmount"] = json!("0.00");
        body["systemTraceAuditNumber"] = json!(1);
        let msg = message(validate_payload(ShapeId::Purchase, &body).unwrap_err());
        assert_eq!(msg, "tranAmount: is required");
    }

    #[test]
    fn test_optional_numbers_accept_zero() {
        let body = json!({"voucherNumber": 0, "tranFee": 0});
        assert!(validate_payload(ShapeId::GenericResponse, &body).is_ok());
    }

    #[test]
    fn test_trace_number_must_be_integer() {
        let mut body = purchase();
        body["systemTraceAuditNumber"] = json!(1.5);
        assert!(validate_payload(ShapeId::Purchase, &body).is_err());
    }

    #[test]
    fn test_shape_specific_fields() {
        let body = purchase();
        let msg = message(validate_payload(ShapeId::CardTransfer, &body).unwrap_err());
        assert_eq!(msg, "toCard: is required");

        let msg = message(validate_payload(ShapeId::ChangePin, &body).unwrap_err());
        assert_eq!(msg, "newPIN: is required");
    }

    #[test]
    fn test_generic_shape_accepts_anything_object() {
        assert!(validate_payload(ShapeId::GenericResponse, &json!({})).is_ok());
    }

    #[test]
    fn test_non_object_body() {
        assert!(matches!(
            validate_payload(ShapeId::Balance, &json!([1, 2])),
            Err(ApiError::InvalidRequestBody)
        ));
    }

    #[test]
    fn test_parse_decimal_is_exact() {
        assert_eq!(parse_decimal("0.1").unwrap().to_string(), "0.1");
        assert_eq!(parse_decimal("1e3").unwrap(), Decimal::from(1000));
        assert!(parse_decimal("abc").is_none());
    }
}
