//! Declarative host definitions

/// Declare a configuration struct and implement [`ConfigFields`](crate::ConfigFields) for it.
///
/// Each field carries its compile-time default after `=`, and may be placed in
/// a category with `#[category("name")]` (after any doc comments). The macro
/// generates the struct, a `Default` impl using those defaults, and the
/// schema and accessors.
///
/// # Example
///
/// ```
/// use cfgsync_core::{ConfigFields, FieldValue};
///
/// cfgsync_core::config_fields! {
///     #[derive(Debug, Clone)]
///     pub struct ServerConfig {
///         /// Display name
///         pub name: String = "demo".to_string(),
///         #[category("network")]
///         pub network_port: i32 = 8080,
///         #[category("network")]
///         pub network_hosts: Vec<String> = vec!["localhost".to_string()],
///     }
/// }
///
/// let schema = ServerConfig::schema().unwrap();
/// assert_eq!(schema.get("network_port").unwrap().path().to_string(), "network.port");
/// assert_eq!(
///     ServerConfig::default().read_field("network_port"),
///     Some(FieldValue::Int32(8080))
/// );
/// ```
#[macro_export]
macro_rules! config_fields {
    (@category $category:literal) => {
        ::std::option::Option::Some($category)
    };
    (@category) => {
        ::std::option::Option::None
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[doc = $doc:expr])*
                $(#[category($category:literal)])?
                $field_vis:vis $field:ident : $ty:ty = $default:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[doc = $doc])*
                $field_vis $field: $ty,
            )*
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: $default, )*
                }
            }
        }

        impl $crate::ConfigFields for $name {
            fn schema() -> $crate::Result<$crate::Schema> {
                $crate::Schema::builder()
                    $(
                        .field(
                            ::std::stringify!($field),
                            <$ty as $crate::ConfigValue>::FIELD_TYPE,
                            $crate::config_fields!(@category $($category)?),
                        )
                    )*
                    .build()
            }

            fn read_field(&self, name: &str) -> ::std::option::Option<$crate::FieldValue> {
                match name {
                    $(
                        ::std::stringify!($field) => ::std::option::Option::Some(
                            $crate::ConfigValue::to_field_value(&self.$field),
                        ),
                    )*
                    _ => ::std::option::Option::None,
                }
            }

            fn write_field(&mut self, name: &str, value: $crate::FieldValue) -> $crate::Result<()> {
                match name {
                    $(
                        ::std::stringify!($field) => {
                            self.$field = <$ty as $crate::ConfigValue>::from_field_value(name, value)?;
                            ::std::result::Result::Ok(())
                        }
                    )*
                    _ => ::std::result::Result::Err($crate::Error::FieldNotFound {
                        name: name.to_string(),
                    }),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{ConfigFields, Error, FieldType, FieldValue};

    crate::config_fields! {
        #[derive(Debug, PartialEq)]
        struct Sample {
            title: String = "t".to_string(),
            #[category("db")]
            db_pool_size: i64 = 4,
            tags: Vec<bool> = Vec::new(),
        }
    }

    #[test]
    fn test_schema_follows_declaration() {
        let schema = Sample::schema().unwrap();
        assert_eq!(schema.names(None), vec!["title", "db_pool_size", "tags"]);

        let pool = schema.get("db_pool_size").unwrap();
        assert_eq!(pool.category(), Some("db"));
        assert_eq!(pool.key(), "pool_size");
        assert_eq!(pool.field_type(), FieldType::INT64);
    }

    #[test]
    fn test_write_field_rejects_wrong_type_and_unknown_name() {
        let mut sample = Sample::default();

        sample
            .write_field("db_pool_size", FieldValue::Int64(16))
            .unwrap();
        assert_eq!(sample.db_pool_size, 16);

        let err = sample
            .write_field("db_pool_size", FieldValue::Bool(true))
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert_eq!(sample.db_pool_size, 16);

        let err = sample
            .write_field("missing", FieldValue::Bool(true))
            .unwrap_err();
        assert!(matches!(err, Error::FieldNotFound { .. }));
    }
}
