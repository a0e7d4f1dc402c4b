//! Field specifications and field groups
//!
//! A field group is a static, named list of field specs. Groups never exist
//! as runtime instances; they only declare the shape of a payload.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Requirement marker of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    Required,
    Optional,
}

impl Requirement {
    /// Combine two markers for the same field. Required always wins.
    pub const fn union(self, other: Requirement) -> Requirement {
        match (self, other) {
            (Requirement::Optional, Requirement::Optional) => Requirement::Optional,
            _ => Requirement::Required,
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Requirement::Required)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
        }
    }
}

impl Default for Requirement {
    fn default() -> Self {
        Self::Optional
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared semantic type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Whole number (trace audit numbers, response codes)
    Integer,
    /// Currency amount, carried as a fixed-point decimal
    Decimal,
    /// Free or fixed-length text
    String,
    /// Date-time in RFC 3339 (ISO-8601) interchange format
    DateTime,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::DateTime => "datetime",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared field: wire name, requirement, type and optional exact length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name on the wire (JSON key)
    pub name: &'static str,
    pub requirement: Requirement,
    pub field_type: FieldType,
    /// Exact length in characters, if the field is fixed-length
    pub length: Option<usize>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            requirement: Requirement::Required,
            field_type,
            length: None,
        }
    }

    pub const fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            requirement: Requirement::Optional,
            field_type,
            length: None,
        }
    }

    /// Declare an exact character length
    pub const fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }
}

/// A named, immutable set of fields
#[derive(Debug)]
pub struct FieldGroup {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl FieldGroup {
    pub const fn new(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self { name, fields }
    }

    /// Look up a field by wire name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Wire names of the required fields, in declaration order
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|f| f.requirement.is_required())
            .map(|f| f.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_union() {
        use Requirement::*;
        assert_eq!(Required.union(Optional), Required);
        assert_eq!(Optional.union(Required), Required);
        assert_eq!(Required.union(Required), Required);
        assert_eq!(Optional.union(Optional), Optional);
    }

    #[test]
    fn test_unmarked_requirement_is_optional() {
        assert_eq!(Requirement::default(), Requirement::Optional);
    }

    #[test]
    fn test_field_spec_length() {
        let spec = FieldSpec::required("terminalId", FieldType::String).with_length(8);
        assert_eq!(spec.length, Some(8));
        assert!(spec.requirement.is_required());
    }

    #[test]
    fn test_serialized_tags() {
        assert_eq!(serde_json::to_string(&Requirement::Required).unwrap(), "\"required\"");
        assert_eq!(serde_json::to_string(&FieldType::DateTime).unwrap(), "\"datetime\"");
        assert_eq!(FieldType::Decimal.to_string(), "decimal");
    }
}
