//! TOML format handler

use toml::{Table, Value as TomlValue};

use crate::error::{Error, Result};
use crate::format::{Format, FormatHandler};
use crate::node::{DocumentNode, NodeMap};

/// Handler for TOML files
///
/// TOML has no null; rendering a document that holds a `Null` node fails.
#[derive(Debug, Default)]
pub struct TomlHandler;

impl TomlHandler {
    pub fn new() -> Self {
        Self
    }

    fn from_value(value: TomlValue) -> DocumentNode {
        match value {
            TomlValue::String(s) => DocumentNode::String(s),
            TomlValue::Integer(i) => DocumentNode::Int(i),
            TomlValue::Float(f) => DocumentNode::Float(f),
            TomlValue::Boolean(b) => DocumentNode::Bool(b),
            TomlValue::Datetime(dt) => DocumentNode::String(dt.to_string()),
            TomlValue::Array(items) => {
                DocumentNode::List(items.into_iter().map(Self::from_value).collect())
            }
            TomlValue::Table(table) => DocumentNode::Object(Self::from_table(table)),
        }
    }

    fn from_table(table: Table) -> NodeMap {
        table
            .into_iter()
            .map(|(k, v)| (k, Self::from_value(v)))
            .collect()
    }

    fn to_value(node: &DocumentNode, key: &str) -> Result<TomlValue> {
        Ok(match node {
            DocumentNode::Null => {
                return Err(Error::serialize(
                    "TOML",
                    format!("TOML does not support null values (at '{key}')"),
                ));
            }
            DocumentNode::Bool(b) => TomlValue::Boolean(*b),
            DocumentNode::Int(i) => TomlValue::Integer(*i),
            DocumentNode::Float(f) => TomlValue::Float(*f),
            DocumentNode::String(s) => TomlValue::String(s.clone()),
            DocumentNode::List(items) => TomlValue::Array(
                items
                    .iter()
                    .map(|item| Self::to_value(item, key))
                    .collect::<Result<_>>()?,
            ),
            DocumentNode::Object(map) => TomlValue::Table(Self::to_table(map, key)?),
        })
    }

    fn to_table(map: &NodeMap, prefix: &str) -> Result<Table> {
        let mut table = Table::new();
        for (key, value) in map.iter() {
            let path = if prefix.is_empty() {
                key.to_string()
            } else {
                format!("{prefix}.{key}")
            };
            table.insert(key.to_string(), Self::to_value(value, &path)?);
        }
        Ok(table)
    }
}

impl FormatHandler for TomlHandler {
    fn format(&self) -> Format {
        Format::Toml
    }

    fn parse(&self, source: &str) -> Result<NodeMap> {
        let table: Table =
            toml::from_str(source).map_err(|e| Error::parse("TOML", e.to_string()))?;
        Ok(Self::from_table(table))
    }

    fn render(&self, root: &NodeMap) -> Result<String> {
        let table = Self::to_table(root, "")?;
        toml::to_string_pretty(&table).map_err(|e| Error::serialize("TOML", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_is_rejected_with_path() {
        let mut inner = NodeMap::new();
        inner.insert("host", DocumentNode::Null);
        let mut root = NodeMap::new();
        root.insert("network", DocumentNode::Object(inner));

        let err = TomlHandler::new().render(&root).unwrap_err();
        assert!(err.to_string().contains("network.host"), "{err}");
    }

    #[test]
    fn test_empty_source_is_empty_root() {
        assert!(TomlHandler::new().parse("").unwrap().is_empty());
    }

    #[test]
    fn test_datetime_becomes_string() {
        let root = TomlHandler::new()
            .parse("released = 1979-05-27T07:32:00Z\n")
            .unwrap();
        assert_eq!(
            root.get("released"),
            Some(&DocumentNode::from("1979-05-27T07:32:00Z"))
        );
    }
}
