//! Schema registry
//!
//! A [`Schema`] is the fixed list of fields a host declares, each resolved
//! once to the document location it is stored at. Schemas are built with
//! [`SchemaBuilder`]; registration problems surface from
//! [`SchemaBuilder::build`].

use cfgsync_document::DocPath;

use crate::error::{Error, Result};
use crate::value::FieldType;

/// Derive the document key for a field inside a category.
///
/// If `name` starts with `category` the prefix is removed, then one leading
/// `_` or `-` is removed from what remains. A name equal to its category
/// (optionally plus one separator) yields the empty key.
///
/// # Examples
///
/// ```
/// use cfgsync_core::derive_key;
///
/// assert_eq!(derive_key("net_port", "net"), "port");
/// assert_eq!(derive_key("netPort", "net"), "Port");
/// assert_eq!(derive_key("timeout", "net"), "timeout");
/// ```
pub fn derive_key<'a>(name: &'a str, category: &str) -> &'a str {
    let Some(rest) = name.strip_prefix(category) else {
        return name;
    };
    rest.strip_prefix(|c| c == '_' || c == '-').unwrap_or(rest)
}

/// One registered configuration field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigField {
    name: String,
    field_type: FieldType,
    category: Option<String>,
    key: String,
}

impl ConfigField {
    /// Create a field, resolving its document key.
    ///
    /// An empty category is the same as no category.
    pub fn new(name: impl Into<String>, field_type: FieldType, category: Option<&str>) -> Self {
        let name = name.into();
        let category = category.filter(|c| !c.is_empty()).map(str::to_string);
        let key = match &category {
            Some(category) => derive_key(&name, category).to_string(),
            None => name.clone(),
        };
        Self {
            name,
            field_type,
            category,
            key,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// The key under the category object, or under the root.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The resolved document path.
    pub fn path(&self) -> DocPath {
        match &self.category {
            Some(category) => DocPath::new([category.as_str(), self.key.as_str()]),
            None => DocPath::new([self.key.as_str()]),
        }
    }
}

/// The fields of one host type, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<ConfigField>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&ConfigField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigField> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of fields whose declared type equals `filter`; all names when `None`.
    pub fn names(&self, filter: Option<FieldType>) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| filter.is_none_or(|ty| f.field_type == ty))
            .map(|f| f.name.clone())
            .collect()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a ConfigField;
    type IntoIter = std::slice::Iter<'a, ConfigField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Builder for [`Schema`].
///
/// Errors are held until [`build`](Self::build) so declarations can be chained.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<ConfigField>,
    error: Option<Error>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field of a known type.
    pub fn field(mut self, name: &str, field_type: FieldType, category: Option<&str>) -> Self {
        self.fields.push(ConfigField::new(name, field_type, category));
        self
    }

    /// Register a field from a textual type name such as `"list<int64>"`.
    ///
    /// An unrecognized name makes [`build`](Self::build) fail with
    /// `UnsupportedFieldType`.
    pub fn field_named(self, name: &str, type_name: &str, category: Option<&str>) -> Self {
        match FieldType::parse(type_name) {
            Some(field_type) => self.field(name, field_type, category),
            None => self.fail(Error::UnsupportedFieldType {
                field: name.to_string(),
                type_name: type_name.to_string(),
            }),
        }
    }

    fn fail(mut self, error: Error) -> Self {
        self.error.get_or_insert(error);
        self
    }

    /// Finish the schema.
    ///
    /// # Errors
    ///
    /// - `UnsupportedFieldType` from a rejected [`field_named`](Self::field_named)
    /// - `DuplicateField` if a name is registered twice
    /// - `PathConflict` if one field's path equals or contains another's
    pub fn build(self) -> Result<Schema> {
        if let Some(error) = self.error {
            return Err(error);
        }

        for (i, field) in self.fields.iter().enumerate() {
            let path = field.path();
            for earlier in &self.fields[..i] {
                if earlier.name == field.name {
                    return Err(Error::DuplicateField {
                        name: field.name.clone(),
                    });
                }
                let other = earlier.path();
                if overlaps(&path, &other) {
                    let shorter = if path.segments().len() <= other.segments().len() {
                        &path
                    } else {
                        &other
                    };
                    return Err(Error::PathConflict {
                        field: field.name.clone(),
                        other: earlier.name.clone(),
                        path: shorter.to_string(),
                    });
                }
            }
        }

        Ok(Schema {
            fields: self.fields,
        })
    }
}

fn overlaps(a: &DocPath, b: &DocPath) -> bool {
    a.segments()
        .iter()
        .zip(b.segments())
        .all(|(x, y)| x == y)
}
