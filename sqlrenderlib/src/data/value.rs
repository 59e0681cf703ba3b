//! Scalar cell values

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::fmt;

/// Textual datetime layout used by the text formats.
pub const DATETIME_TEXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Datetime layout used by the structured formats (ISO-8601, no offset).
pub const DATETIME_ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A single cell of a query result.
///
/// Source values are discovered at query time, so this is a closed set of
/// the scalar types a driver hands back. `Null` stands for SQL NULL and for
/// a column missing from a row.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// SQL NULL or an absent value
    #[default]
    Null,
    /// Character data
    Text(String),
    /// Signed integer
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Boolean
    Boolean(bool),
    /// Date and time without an offset
    DateTime(NaiveDateTime),
    /// Raw byte sequence (BLOB, BINARY, ...)
    Bytes(Vec<u8>),
}

impl Value {
    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is an integer or a float
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Short type name, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::DateTime(_) => "datetime",
            Value::Bytes(_) => "bytes",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_TEXT_FORMAT)),
            Value::Bytes(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Integer(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Boolean(v) => serializer.serialize_bool(*v),
            Value::DateTime(dt) => serializer.collect_str(&dt.format(DATETIME_ISO_FORMAT)),
            Value::Bytes(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_datetime(nanos: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_nano_opt(14, 5, 7, nanos)
            .unwrap()
    }

    #[test]
    fn test_display_scalars() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(-7i64).to_string(), "-7");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(3.0).to_string(), "3");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn test_display_datetime() {
        assert_eq!(
            Value::from(sample_datetime(0)).to_string(),
            "2024-03-09 14:05:07"
        );
        assert_eq!(
            Value::from(sample_datetime(250_000_000)).to_string(),
            "2024-03-09 14:05:07.250"
        );
    }

    #[test]
    fn test_display_bytes_is_lossy_utf8() {
        assert_eq!(Value::from(b"hi".to_vec()).to_string(), "hi");
        assert_eq!(Value::from(vec![0x61, 0xff]).to_string(), "a\u{fffd}");
    }

    #[test]
    fn test_serialize_json() {
        let values = vec![
            Value::Null,
            Value::from("x"),
            Value::from(1),
            Value::from(true),
            Value::from(sample_datetime(0)),
            Value::from(b"hi".to_vec()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,"x",1,true,"2024-03-09T14:05:07","aGk="]"#);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::Text("a".to_string()));
    }

    #[test]
    fn test_type_name_and_predicates() {
        assert!(Value::Null.is_null());
        assert!(Value::from(1).is_numeric());
        assert!(Value::from(1.0).is_numeric());
        assert!(!Value::from("1").is_numeric());
        assert_eq!(Value::from(vec![1u8]).type_name(), "bytes");
    }
}
