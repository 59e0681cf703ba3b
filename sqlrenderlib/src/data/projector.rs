//! Row projection: read a keyed row back in column order.
//!
//! Every renderer goes through [`project`] instead of reading a [`Row`]
//! directly, so null handling is identical across formats.

use super::result_set::{Column, Row};
use super::value::Value;

/// A projected cell. `None` is the missing marker for both an absent key
/// and an explicit `Value::Null`.
pub type Cell<'a> = Option<&'a Value>;

/// Project a row onto the given columns, left to right.
pub fn project<'a>(row: &'a Row, columns: &[Column]) -> Vec<Cell<'a>> {
    columns
        .iter()
        .map(|column| row.get(&column.name).filter(|v| !v.is_null()))
        .collect()
}

/// Textual form of a projected cell; missing cells are empty.
pub fn cell_text(cell: Cell<'_>) -> String {
    cell.map(|v| v.to_string()).unwrap_or_default()
}
