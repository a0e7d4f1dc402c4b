//! Schema introspection
//!
//! Flattens a composite shape into an ordered list of field descriptors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::field::{FieldSpec, FieldType, Requirement};
use crate::shape::{Component, Shape, ShapeId};

/// Documentation record for one field of a shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldDescriptor {
    /// Wire name
    #[serde(rename = "field")]
    pub name: String,
    #[serde(rename = "is_required")]
    pub requirement: Requirement,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Exact length in characters, if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
}

impl FieldDescriptor {
    pub fn is_required(&self) -> bool {
        self.requirement.is_required()
    }
}

impl From<&FieldSpec> for FieldDescriptor {
    fn from(spec: &FieldSpec) -> Self {
        Self {
            name: spec.name.to_string(),
            requirement: spec.requirement,
            field_type: spec.field_type,
            length: spec.length,
        }
    }
}

/// Describe a catalogued shape
pub fn describe(id: ShapeId) -> Vec<FieldDescriptor> {
    describe_shape(id.shape())
}

/// Describe any shape, catalogued or not
pub fn describe_shape(shape: &Shape) -> Vec<FieldDescriptor> {
    flatten(shape).iter().map(FieldDescriptor::from).collect()
}

/// Flatten a shape into its effective field specs.
///
/// Fields are emitted in declaration order, embedded shapes expanding in
/// place. A wire name contributed more than once keeps its first position
/// and the union of the requirements.
pub fn flatten(shape: &Shape) -> Vec<FieldSpec> {
    let mut out = Vec::new();
    let mut seen = HashMap::new();
    visit(shape, &mut out, &mut seen);
    out
}

fn visit(shape: &Shape, out: &mut Vec<FieldSpec>, seen: &mut HashMap<&'static str, usize>) {
    for component in shape.components {
        match component {
            Component::Group(group) => {
                for spec in group.fields {
                    push(spec, out, seen);
                }
            }
            Component::Shape(inner) => visit(inner, out, seen),
            Component::Field(spec) => push(spec, out, seen),
        }
    }
}

fn push(spec: &FieldSpec, out: &mut Vec<FieldSpec>, seen: &mut HashMap<&'static str, usize>) {
    match seen.get(spec.name) {
        Some(&idx) => {
            let existing = &mut out[idx];
            existing.requirement = existing.requirement.union(spec.requirement);
            if existing.length.is_none() {
                existing.length = spec.length;
            }
        }
        None => {
            seen.insert(spec.name, out.len());
            out.push(*spec);
        }
    }
}
