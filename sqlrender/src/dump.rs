//! Result dump reader.
//!
//! The binary does not talk to a database. It reads query output that was
//! dumped as JSON:
//!
//! ```json
//! {
//!   "columns": ["id", {"name": "created", "type": "datetime"}],
//!   "rows": [[1, "2024-01-02 03:04:05"], [2, null]]
//! }
//! ```
//!
//! A column is either a bare name or a `{name, type}` object. Untyped
//! columns take the JSON type of each value.

use std::io::Read;

use anyhow::{anyhow, bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use sqlrenderlib::{ResultSet, Value};

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Declared type of a dumped column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Take the JSON type of each value
    #[default]
    Auto,
    Text,
    Integer,
    Float,
    Boolean,
    Datetime,
    Bytes,
}

/// A column entry in the dump.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    Name(String),
    Typed {
        name: String,
        #[serde(rename = "type", default)]
        kind: ColumnKind,
    },
}

impl ColumnSpec {
    fn name(&self) -> &str {
        match self {
            ColumnSpec::Name(name) | ColumnSpec::Typed { name, .. } => name,
        }
    }

    fn kind(&self) -> ColumnKind {
        match self {
            ColumnSpec::Name(_) => ColumnKind::Auto,
            ColumnSpec::Typed { kind, .. } => *kind,
        }
    }
}

/// Query output as read from a dump file.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultDump {
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub rows: Vec<Vec<JsonValue>>,
}

impl ResultDump {
    /// Parse a dump from JSON
    pub fn read(reader: impl Read) -> Result<Self> {
        serde_json::from_reader(reader).context("invalid result dump")
    }

    /// Convert the dump into a result set, typing every value.
    pub fn into_result_set(self) -> Result<ResultSet> {
        let names: Vec<String> = self.columns.iter().map(|c| c.name().to_string()).collect();

        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, raw)| {
                        let (name, kind) = self
                            .columns
                            .get(j)
                            .map(|c| (c.name(), c.kind()))
                            .unwrap_or(("?", ColumnKind::Auto));
                        convert(raw, kind)
                            .with_context(|| format!("row {}, column '{}'", i, name))
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ResultSet::build(names, rows)?)
    }
}

fn convert(raw: &JsonValue, kind: ColumnKind) -> Result<Value> {
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let value = match (kind, raw) {
        (_, JsonValue::Array(_) | JsonValue::Object(_)) => {
            bail!("nested values are not supported")
        }
        (ColumnKind::Auto, JsonValue::Bool(b)) => Value::Boolean(*b),
        (ColumnKind::Auto, JsonValue::Number(n)) => number_value(n),
        (ColumnKind::Auto | ColumnKind::Text, JsonValue::String(s)) => Value::Text(s.clone()),
        (ColumnKind::Text, other) => Value::Text(other.to_string()),
        (ColumnKind::Integer, JsonValue::Number(n)) => n
            .as_i64()
            .map(Value::Integer)
            .ok_or_else(|| anyhow!("{} is not a 64-bit integer", n))?,
        (ColumnKind::Integer, JsonValue::String(s)) => Value::Integer(
            s.trim()
                .parse()
                .with_context(|| format!("'{}' is not an integer", s))?,
        ),
        (ColumnKind::Float, JsonValue::Number(n)) => n
            .as_f64()
            .map(Value::Float)
            .ok_or_else(|| anyhow!("{} is not a number", n))?,
        (ColumnKind::Float, JsonValue::String(s)) => Value::Float(
            s.trim()
                .parse()
                .with_context(|| format!("'{}' is not a number", s))?,
        ),
        (ColumnKind::Boolean, JsonValue::Bool(b)) => Value::Boolean(*b),
        (ColumnKind::Boolean, JsonValue::String(s)) => Value::Boolean(
            s.trim()
                .parse()
                .with_context(|| format!("'{}' is not a boolean", s))?,
        ),
        (ColumnKind::Datetime, JsonValue::String(s)) => Value::DateTime(parse_datetime(s)?),
        (ColumnKind::Bytes, JsonValue::String(s)) => Value::Bytes(
            STANDARD
                .decode(s)
                .with_context(|| format!("'{}' is not base64", s))?,
        ),
        (kind, other) => bail!("cannot read {} as {:?}", other, kind),
    };

    Ok(value)
}

fn number_value(n: &serde_json::Number) -> Value {
    match n.as_i64() {
        Some(v) => Value::Integer(v),
        None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| anyhow!("'{}' is not a datetime", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(json: &str) -> Result<ResultSet> {
        ResultDump::read(json.as_bytes())?.into_result_set()
    }

    #[test]
    fn test_untyped_columns() {
        let rs = load(r#"{"columns": ["a", "b", "c", "d"], "rows": [[1, 1.5, "x", true]]}"#)
            .unwrap();
        let row = &rs.rows()[0];

        assert_eq!(row.get("a"), Some(&Value::Integer(1)));
        assert_eq!(row.get("b"), Some(&Value::Float(1.5)));
        assert_eq!(row.get("c"), Some(&Value::from("x")));
        assert_eq!(row.get("d"), Some(&Value::Boolean(true)));
    }

    #[test]
    fn test_typed_columns() {
        let rs = load(
            r#"{
                "columns": [
                    {"name": "at", "type": "datetime"},
                    {"name": "blob", "type": "bytes"},
                    {"name": "n", "type": "integer"},
                    {"name": "label", "type": "text"}
                ],
                "rows": [["2024-01-02 03:04:05", "aGk=", "42", 7]]
            }"#,
        )
        .unwrap();
        let row = &rs.rows()[0];

        let expected = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(row.get("at"), Some(&Value::DateTime(expected)));
        assert_eq!(row.get("blob"), Some(&Value::Bytes(b"hi".to_vec())));
        assert_eq!(row.get("n"), Some(&Value::Integer(42)));
        assert_eq!(row.get("label"), Some(&Value::from("7")));
    }

    #[test]
    fn test_nulls_and_missing_rows() {
        let rs = load(r#"{"columns": [{"name": "at", "type": "datetime"}]}"#).unwrap();
        assert!(rs.is_empty());

        let rs = load(r#"{"columns": [{"name": "at", "type": "datetime"}], "rows": [[null]]}"#)
            .unwrap();
        assert_eq!(rs.rows()[0].get("at"), Some(&Value::Null));
    }

    #[test]
    fn test_datetime_formats() {
        assert!(parse_datetime("2024-01-02T03:04:05").is_ok());
        assert!(parse_datetime("2024-01-02 03:04:05.123").is_ok());
        assert!(parse_datetime("2024-01-02").is_ok());
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn test_row_length_mismatch() {
        let err = load(r#"{"columns": ["a", "b"], "rows": [[1]]}"#).unwrap_err();
        assert!(err.to_string().contains("row 0 has 1 values"));
    }

    #[test]
    fn test_nested_values_rejected() {
        let err = load(r#"{"columns": ["a"], "rows": [[[1, 2]]]}"#).unwrap_err();
        assert!(format!("{:#}", err).contains("nested values"));
    }
}
