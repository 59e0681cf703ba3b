//! Columns, rows and the immutable result set

use std::collections::{HashMap, HashSet};

use super::value::Value;
use crate::error::RenderError;
use crate::Result;

/// A named, ordered field of a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name as reported by the query
    pub name: String,
    /// Position in the ordered column list
    pub position: usize,
}

/// One result row, keyed by column name.
///
/// A row is total over the result's columns: a name with no entry reads
/// exactly like an explicit `Value::Null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: HashMap<String, Value>,
}

impl Row {
    /// Create an empty row (every column reads as null)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the value for a column
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Look up a column's value. `None` means absent.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The ordered column/row output of one query.
///
/// Built once, then only read by renderers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl ResultSet {
    /// Build a result set from positional query output.
    ///
    /// Row `i` maps `column_names[j]` to `raw_rows[i][j]`. Every raw row must
    /// carry exactly one value per column.
    pub fn build(column_names: Vec<String>, raw_rows: Vec<Vec<Value>>) -> Result<Self> {
        let columns = make_columns(column_names)?;

        let rows = raw_rows
            .into_iter()
            .enumerate()
            .map(|(i, raw)| {
                if raw.len() != columns.len() {
                    return Err(RenderError::MalformedRow {
                        row: i,
                        expected: columns.len(),
                        actual: raw.len(),
                    });
                }
                Ok(columns
                    .iter()
                    .map(|c| c.name.clone())
                    .zip(raw)
                    .collect::<Row>())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { columns, rows })
    }

    /// Create a result set from rows that are already keyed by name.
    pub fn new(column_names: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        Ok(Self {
            columns: make_columns(column_names)?,
            rows,
        })
    }

    /// Columns in query order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Rows in query order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Column names in query order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the result has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn make_columns(names: Vec<String>) -> Result<Vec<Column>> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .enumerate()
        .map(|(position, name)| {
            if !seen.insert(name.clone()) {
                return Err(RenderError::DuplicateColumn(name));
            }
            Ok(Column { name, position })
        })
        .collect()
}
