//! JSON format handler

use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};
use crate::format::{Format, FormatHandler, expect_root};
use crate::node::{DocumentNode, NodeMap};

/// Handler for JSON files
///
/// Output is pretty-printed with two-space indentation and keys in
/// insertion order.
#[derive(Debug, Default)]
pub struct JsonHandler;

impl JsonHandler {
    pub fn new() -> Self {
        Self
    }

    fn from_value(value: Value) -> DocumentNode {
        match value {
            Value::Null => DocumentNode::Null,
            Value::Bool(b) => DocumentNode::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => DocumentNode::Int(i),
                None => n
                    .as_f64()
                    .map(DocumentNode::Float)
                    .unwrap_or(DocumentNode::Null),
            },
            Value::String(s) => DocumentNode::String(s),
            Value::Array(items) => {
                DocumentNode::List(items.into_iter().map(Self::from_value).collect())
            }
            Value::Object(map) => DocumentNode::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from_value(v)))
                    .collect(),
            ),
        }
    }

    fn to_value(node: &DocumentNode) -> Value {
        match node {
            DocumentNode::Null => Value::Null,
            DocumentNode::Bool(b) => Value::Bool(*b),
            DocumentNode::Int(i) => Value::Number((*i).into()),
            // NaN and infinities have no JSON spelling
            DocumentNode::Float(f) => Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            DocumentNode::String(s) => Value::String(s.clone()),
            DocumentNode::List(items) => Value::Array(items.iter().map(Self::to_value).collect()),
            DocumentNode::Object(map) => Value::Object(Self::to_object(map)),
        }
    }

    fn to_object(map: &NodeMap) -> Map<String, Value> {
        map.iter()
            .map(|(k, v)| (k.to_string(), Self::to_value(v)))
            .collect()
    }
}

impl FormatHandler for JsonHandler {
    fn format(&self) -> Format {
        Format::Json
    }

    fn parse(&self, source: &str) -> Result<NodeMap> {
        if source.trim().is_empty() {
            return Ok(NodeMap::new());
        }
        let value: Value =
            serde_json::from_str(source).map_err(|e| Error::parse("JSON", e.to_string()))?;
        expect_root(Format::Json, Self::from_value(value))
    }

    fn render(&self, root: &NodeMap) -> Result<String> {
        let mut rendered = serde_json::to_string_pretty(&Value::Object(Self::to_object(root)))
            .map_err(|e| Error::serialize("JSON", e.to_string()))?;
        rendered.push('\n');
        Ok(rendered)
    }
}
