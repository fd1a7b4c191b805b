//! Key/value annotations attached to records

use std::fmt;

/// A single key/value pair
///
/// The value is rendered with `Display` when the field is built, so any
/// displayable value can be attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    pub value: String,
}

impl Field {
    /// Create a field, rendering `value` immediately
    pub fn new(key: impl Into<String>, value: impl fmt::Display) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }
}

impl<K: Into<String>, V: fmt::Display> From<(K, V)> for Field {
    fn from((key, value): (K, V)) -> Self {
        Field::new(key, value)
    }
}

/// Build a `&[Field]` from `key => value` pairs
///
/// ```
/// use noticelog::{fields, Field};
///
/// let f: &[Field] = fields!["k" => "v", "n" => 1];
/// assert_eq!(f[1], Field::new("n", 1));
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        &[]
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        &[$($crate::Field::new($key, $value)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_renders_value() {
        assert_eq!(Field::new("n", 42).value, "42");
        assert_eq!(Field::new("ok", true).value, "true");
        assert_eq!(Field::new("pi", 3.5).value, "3.5");
    }

    #[test]
    fn test_field_from_tuple() {
        let field: Field = ("user", "ann").into();
        assert_eq!(field, Field::new("user", "ann"));
    }

    #[test]
    fn test_fields_macro_keeps_order() {
        let fields: &[Field] = fields!["b" => 1, "a" => "x", "b" => 2];
        let keys: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, ["b", "a", "b"]);

        let empty: &[Field] = fields![];
        assert!(empty.is_empty());
    }
}
