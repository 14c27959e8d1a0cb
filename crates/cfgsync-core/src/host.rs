//! The host contract

use crate::error::Result;
use crate::schema::Schema;
use crate::value::FieldValue;

/// A struct whose fields are kept in sync with a configuration file.
///
/// Usually generated by [`config_fields!`](crate::config_fields). A manual
/// implementation must agree with its own schema: `read_field` returns
/// `Some` for every registered name, and `write_field` accepts a value of
/// the field's declared type.
///
/// # Example
///
/// ```
/// use cfgsync_core::{ConfigFields, ConfigValue, Error, FieldType, FieldValue, Result, Schema};
///
/// #[derive(Default)]
/// struct Limits {
///     max_clients: i32,
///     reloads: u32,
/// }
///
/// impl ConfigFields for Limits {
///     fn schema() -> Result<Schema> {
///         Schema::builder().field("max_clients", FieldType::INT32, None).build()
///     }
///
///     fn read_field(&self, name: &str) -> Option<FieldValue> {
///         (name == "max_clients").then(|| self.max_clients.to_field_value())
///     }
///
///     fn write_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
///         match name {
///             "max_clients" => self.max_clients = i32::from_field_value(name, value)?,
///             _ => return Err(Error::FieldNotFound { name: name.to_string() }),
///         }
///         Ok(())
///     }
///
///     fn on_reload(&mut self) {
///         self.reloads += 1;
///     }
/// }
/// ```
pub trait ConfigFields: Send + 'static {
    /// Describe the declared fields.
    fn schema() -> Result<Schema>
    where
        Self: Sized;

    /// Current value of a field, or `None` for an unknown name.
    fn read_field(&self, name: &str) -> Option<FieldValue>;

    /// Replace the value of a field.
    fn write_field(&mut self, name: &str, value: FieldValue) -> Result<()>;

    /// Called after every successful load or `set`.
    fn on_reload(&mut self) {}
}
