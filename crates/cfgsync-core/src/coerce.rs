//! Coercion between document nodes and typed field values
//!
//! - [`materialize`]: field value to node (defaults and `set`)
//! - [`hydrate`]: node to field value (loading)
//! - [`convert`]: lossless conversion between field types (accessors)

use cfgsync_document::{DocumentNode, NodeKind};
use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::ConfigField;
use crate::value::{FieldType, FieldValue, ScalarType};

/// Wrap a field value as the matching document node.
pub fn materialize(value: &FieldValue) -> DocumentNode {
    match value {
        FieldValue::String(s) => DocumentNode::String(s.clone()),
        FieldValue::Int32(i) => DocumentNode::Int(i64::from(*i)),
        FieldValue::Int64(i) => DocumentNode::Int(*i),
        FieldValue::Bool(b) => DocumentNode::Bool(*b),
        FieldValue::StringList(items) => {
            DocumentNode::List(items.iter().cloned().map(DocumentNode::String).collect())
        }
        FieldValue::Int32List(items) => DocumentNode::List(
            items
                .iter()
                .map(|i| DocumentNode::Int(i64::from(*i)))
                .collect(),
        ),
        FieldValue::Int64List(items) => {
            DocumentNode::List(items.iter().copied().map(DocumentNode::Int).collect())
        }
        FieldValue::BoolList(items) => {
            DocumentNode::List(items.iter().copied().map(DocumentNode::Bool).collect())
        }
    }
}

/// Convert the node stored for `field` into the field's declared type.
///
/// Int32 fields reject integers outside the `i32` range. List elements of the
/// wrong kind are dropped.
///
/// # Errors
///
/// Returns `TypeMismatch` when the node kind cannot represent the declared
/// type.
pub fn hydrate(field: &ConfigField, node: &DocumentNode) -> Result<FieldValue> {
    let value = match field.field_type() {
        FieldType::Scalar(scalar) => scalar_from_node(scalar, node),
        FieldType::List(scalar) => node.as_list().map(|items| list_from_nodes(field, scalar, items)),
    };
    value.ok_or_else(|| Error::type_mismatch(field.name(), field.field_type(), describe(node)))
}

fn scalar_from_node(scalar: ScalarType, node: &DocumentNode) -> Option<FieldValue> {
    match scalar {
        ScalarType::String => node.as_str().map(|s| FieldValue::String(s.to_string())),
        ScalarType::Int32 => node
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .map(FieldValue::Int32),
        ScalarType::Int64 => node.as_i64().map(FieldValue::Int64),
        ScalarType::Bool => node.as_bool().map(FieldValue::Bool),
    }
}

fn list_from_nodes(field: &ConfigField, scalar: ScalarType, items: &[DocumentNode]) -> FieldValue {
    match scalar {
        ScalarType::String => FieldValue::StringList(collect_elements(field, items, |n| {
            n.as_str().map(str::to_string)
        })),
        ScalarType::Int32 => FieldValue::Int32List(collect_elements(field, items, |n| {
            n.as_i64().and_then(|i| i32::try_from(i).ok())
        })),
        ScalarType::Int64 => {
            FieldValue::Int64List(collect_elements(field, items, DocumentNode::as_i64))
        }
        ScalarType::Bool => {
            FieldValue::BoolList(collect_elements(field, items, DocumentNode::as_bool))
        }
    }
}

fn collect_elements<V>(
    field: &ConfigField,
    items: &[DocumentNode],
    extract: impl Fn(&DocumentNode) -> Option<V>,
) -> Vec<V> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let value = extract(node);
            if value.is_none() {
                debug!(
                    field = field.name(),
                    index,
                    found = %describe(node),
                    "Dropping list element of the wrong kind"
                );
            }
            value
        })
        .collect()
}

fn describe(node: &DocumentNode) -> String {
    match node {
        DocumentNode::Int(i) => format!("{} {i}", NodeKind::Int),
        other => other.kind().to_string(),
    }
}

/// Convert `value` to `target` without losing information.
///
/// Integers widen from 32 to 64 bits, and narrow back when every value fits.
/// A value already of type `target` is returned unchanged.
///
/// # Errors
///
/// Returns `TypeMismatch` naming `field` for any other combination.
pub fn convert(field: &str, value: FieldValue, target: FieldType) -> Result<FieldValue> {
    let found = value.field_type();
    if found == target {
        return Ok(value);
    }

    let converted = match (value, target) {
        (FieldValue::Int32(i), FieldType::INT64) => Some(FieldValue::Int64(i64::from(i))),
        (FieldValue::Int64(i), FieldType::INT32) => i32::try_from(i).ok().map(FieldValue::Int32),
        (FieldValue::Int32List(items), FieldType::List(ScalarType::Int64)) => Some(
            FieldValue::Int64List(items.into_iter().map(i64::from).collect()),
        ),
        (FieldValue::Int64List(items), FieldType::List(ScalarType::Int32)) => items
            .into_iter()
            .map(|i| i32::try_from(i).ok())
            .collect::<Option<Vec<_>>>()
            .map(FieldValue::Int32List),
        _ => None,
    };
    converted.ok_or_else(|| Error::type_mismatch(field, target, found))
}
