//! Field types and typed field values
//!
//! [`FieldType`] is the closed set of declarable types: four scalars and a
//! list of any one of them. [`FieldValue`] carries a value of one of those
//! types across the host boundary, and [`ConfigValue`] ties Rust types to it.

use std::fmt;

use crate::error::{Error, Result};

/// The scalar kinds a field may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Int32,
    Int64,
    Bool,
}

impl ScalarType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Bool => "bool",
        }
    }

    /// Parse a scalar type name, accepting a few common aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" | "str" => Some(Self::String),
            "int32" | "i32" | "int" => Some(Self::Int32),
            "int64" | "i64" | "long" => Some(Self::Int64),
            "bool" | "boolean" => Some(Self::Bool),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The declared type of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Scalar(ScalarType),
    List(ScalarType),
}

impl FieldType {
    pub const STRING: Self = Self::Scalar(ScalarType::String);
    pub const INT32: Self = Self::Scalar(ScalarType::Int32);
    pub const INT64: Self = Self::Scalar(ScalarType::Int64);
    pub const BOOL: Self = Self::Scalar(ScalarType::Bool);

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// The scalar kind, or the element kind for lists.
    pub fn scalar(&self) -> ScalarType {
        match self {
            Self::Scalar(s) | Self::List(s) => *s,
        }
    }

    /// Parse a type name such as `int32` or `list<string>`.
    ///
    /// Returns `None` for anything outside the supported set, including
    /// nested lists.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        match lower
            .strip_prefix("list<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            Some(inner) => ScalarType::parse(inner).map(Self::List),
            None => ScalarType::parse(&lower).map(Self::Scalar),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{s}"),
            Self::List(s) => write!(f, "list<{s}>"),
        }
    }
}

/// A typed field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    String(String),
    Int32(i32),
    Int64(i64),
    Bool(bool),
    StringList(Vec<String>),
    Int32List(Vec<i32>),
    Int64List(Vec<i64>),
    BoolList(Vec<bool>),
}

impl FieldValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::String(_) => FieldType::STRING,
            Self::Int32(_) => FieldType::INT32,
            Self::Int64(_) => FieldType::INT64,
            Self::Bool(_) => FieldType::BOOL,
            Self::StringList(_) => FieldType::List(ScalarType::String),
            Self::Int32List(_) => FieldType::List(ScalarType::Int32),
            Self::Int64List(_) => FieldType::List(ScalarType::Int64),
            Self::BoolList(_) => FieldType::List(ScalarType::Bool),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer value of either width.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int32(i) => Some(i64::from(*i)),
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Int32(i) => write!(f, "{i}"),
            Self::Int64(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::StringList(items) => write!(f, "{items:?}"),
            Self::Int32List(items) => write!(f, "{items:?}"),
            Self::Int64List(items) => write!(f, "{items:?}"),
            Self::BoolList(items) => write!(f, "{items:?}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

/// A Rust type that can back a configuration field.
///
/// Implemented for `String`, `i32`, `i64`, `bool` and `Vec` of each. Types
/// without an implementation cannot be declared as fields at all.
pub trait ConfigValue: Sized {
    /// The declared type a field of this Rust type registers with.
    const FIELD_TYPE: FieldType;

    fn to_field_value(&self) -> FieldValue;

    /// Extract a value of exactly this type.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` naming `field` if `value` holds another type.
    fn from_field_value(field: &str, value: FieldValue) -> Result<Self>;
}

macro_rules! impl_config_value {
    ($ty:ty, $scalar:ident, $variant:ident, $list_variant:ident) => {
        impl ConfigValue for $ty {
            const FIELD_TYPE: FieldType = FieldType::Scalar(ScalarType::$scalar);

            fn to_field_value(&self) -> FieldValue {
                FieldValue::$variant(self.clone())
            }

            fn from_field_value(field: &str, value: FieldValue) -> Result<Self> {
                match value {
                    FieldValue::$variant(v) => Ok(v),
                    other => Err(Error::type_mismatch(
                        field,
                        Self::FIELD_TYPE,
                        other.field_type(),
                    )),
                }
            }
        }

        impl ConfigValue for Vec<$ty> {
            const FIELD_TYPE: FieldType = FieldType::List(ScalarType::$scalar);

            fn to_field_value(&self) -> FieldValue {
                FieldValue::$list_variant(self.clone())
            }

            fn from_field_value(field: &str, value: FieldValue) -> Result<Self> {
                match value {
                    FieldValue::$list_variant(v) => Ok(v),
                    other => Err(Error::type_mismatch(
                        field,
                        Self::FIELD_TYPE,
                        other.field_type(),
                    )),
                }
            }
        }

        impl From<$ty> for FieldValue {
            fn from(value: $ty) -> Self {
                FieldValue::$variant(value)
            }
        }

        impl From<Vec<$ty>> for FieldValue {
            fn from(value: Vec<$ty>) -> Self {
                FieldValue::$list_variant(value)
            }
        }
    };
}

impl_config_value!(String, String, String, StringList);
impl_config_value!(i32, Int32, Int32, Int32List);
impl_config_value!(i64, Int64, Int64, Int64List);
impl_config_value!(bool, Bool, Bool, BoolList);
