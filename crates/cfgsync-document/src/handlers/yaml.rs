//! YAML format handler using serde_yaml

use serde_yaml::{Mapping, Number, Value as YamlValue};

use crate::error::{Error, Result};
use crate::format::{Format, FormatHandler, expect_root};
use crate::node::{DocumentNode, NodeMap};

/// Handler for YAML files using serde_yaml
#[derive(Debug, Default)]
pub struct YamlHandler;

impl YamlHandler {
    pub fn new() -> Self {
        Self
    }

    fn from_value(value: YamlValue) -> Result<DocumentNode> {
        Ok(match value {
            YamlValue::Null => DocumentNode::Null,
            YamlValue::Bool(b) => DocumentNode::Bool(b),
            YamlValue::Number(n) => match n.as_i64() {
                Some(i) => DocumentNode::Int(i),
                None => n
                    .as_f64()
                    .map(DocumentNode::Float)
                    .unwrap_or(DocumentNode::Null),
            },
            YamlValue::String(s) => DocumentNode::String(s),
            YamlValue::Sequence(items) => DocumentNode::List(
                items
                    .into_iter()
                    .map(Self::from_value)
                    .collect::<Result<_>>()?,
            ),
            YamlValue::Mapping(mapping) => {
                let mut map = NodeMap::new();
                for (key, value) in mapping {
                    map.insert(Self::key_to_string(key)?, Self::from_value(value)?);
                }
                DocumentNode::Object(map)
            }
            YamlValue::Tagged(tagged) => Self::from_value(tagged.value)?,
        })
    }

    fn key_to_string(key: YamlValue) -> Result<String> {
        match key {
            YamlValue::String(s) => Ok(s),
            YamlValue::Number(n) => Ok(n.to_string()),
            YamlValue::Bool(b) => Ok(b.to_string()),
            other => Err(Error::parse(
                "YAML",
                format!("unsupported mapping key: {:?}", other),
            )),
        }
    }

    fn to_value(node: &DocumentNode) -> YamlValue {
        match node {
            DocumentNode::Null => YamlValue::Null,
            DocumentNode::Bool(b) => YamlValue::Bool(*b),
            DocumentNode::Int(i) => YamlValue::Number(Number::from(*i)),
            DocumentNode::Float(f) => YamlValue::Number(Number::from(*f)),
            DocumentNode::String(s) => YamlValue::String(s.clone()),
            DocumentNode::List(items) => {
                YamlValue::Sequence(items.iter().map(Self::to_value).collect())
            }
            DocumentNode::Object(map) => YamlValue::Mapping(Self::to_mapping(map)),
        }
    }

    fn to_mapping(map: &NodeMap) -> Mapping {
        let mut mapping = Mapping::new();
        for (key, value) in map.iter() {
            mapping.insert(YamlValue::String(key.to_string()), Self::to_value(value));
        }
        mapping
    }
}

impl FormatHandler for YamlHandler {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn parse(&self, source: &str) -> Result<NodeMap> {
        if source.trim().is_empty() {
            return Ok(NodeMap::new());
        }
        let value: YamlValue =
            serde_yaml::from_str(source).map_err(|e| Error::parse("YAML", e.to_string()))?;
        expect_root(Format::Yaml, Self::from_value(value)?)
    }

    fn render(&self, root: &NodeMap) -> Result<String> {
        serde_yaml::to_string(&YamlValue::Mapping(Self::to_mapping(root)))
            .map_err(|e| Error::serialize("YAML", e.to_string()))
    }
}
