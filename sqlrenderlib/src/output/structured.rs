//! JSON, YAML and XML rendering.
//!
//! JSON and YAML share one serde view of the rows so both carry the same
//! logical structure: a sequence of column-ordered mappings with nulls kept.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::data::{cell_text, project, Cell, Column, ResultSet, Value};
use crate::error::RenderError;
use crate::options::RenderOptions;
use crate::Result;

use super::Renderer;

/// XML declaration line.
pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Namespace declared on the `resultset` root.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

const XML_INDENT: &str = "    ";

/// One row as a column-ordered mapping.
struct RowView<'a> {
    columns: &'a [Column],
    cells: Vec<Cell<'a>>,
}

impl Serialize for RowView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(&self.cells) {
            map.serialize_entry(&column.name, cell)?;
        }
        map.end()
    }
}

fn row_views(rs: &ResultSet) -> Vec<RowView<'_>> {
    rs.rows()
        .iter()
        .map(|row| RowView {
            columns: rs.columns(),
            cells: project(row, rs.columns()),
        })
        .collect()
}

/// Compact JSON array of objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, rs: &ResultSet, _options: &RenderOptions) -> Result<Vec<u8>> {
        let views = row_views(rs);

        // serde_json would quietly turn NaN and infinities into null
        for view in &views {
            for (column, cell) in view.columns.iter().zip(&view.cells) {
                if let Some(Value::Float(v)) = cell {
                    if !v.is_finite() {
                        return Err(RenderError::encoding(
                            "json",
                            format!("column '{}' holds non-finite number {}", column.name, v),
                        ));
                    }
                }
            }
        }

        serde_json::to_vec(&views).map_err(|e| RenderError::encoding("json", e))
    }
}

/// YAML sequence of mappings.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlRenderer;

impl Renderer for YamlRenderer {
    fn render(&self, rs: &ResultSet, _options: &RenderOptions) -> Result<Vec<u8>> {
        serde_yaml::to_string(&row_views(rs))
            .map(String::into_bytes)
            .map_err(|e| RenderError::encoding("yaml", e))
    }
}

/// `resultset/row/field` XML document.
///
/// ```text
/// <?xml version="1.0" encoding="UTF-8"?>
/// <resultset statement="SELECT 1" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
///     <row>
///         <field name="1">1</field>
///     </row>
/// </resultset>
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlRenderer;

impl Renderer for XmlRenderer {
    fn render(&self, rs: &ResultSet, options: &RenderOptions) -> Result<Vec<u8>> {
        let mut out = String::from(XML_HEADER);
        out.push_str(&format!(
            "<resultset statement=\"{}\" xmlns:xsi=\"{}\">",
            escape_xml(&options.statement)?,
            XSI_NAMESPACE
        ));

        for row in rs.rows() {
            out.push('\n');
            out.push_str(XML_INDENT);
            out.push_str("<row>");
            if rs.columns().is_empty() {
                out.push_str("</row>");
                continue;
            }
            for (column, cell) in rs.columns().iter().zip(project(row, rs.columns())) {
                out.push('\n');
                out.push_str(&XML_INDENT.repeat(2));
                out.push_str(&format!(
                    "<field name=\"{}\">{}</field>",
                    escape_xml(&column.name)?,
                    escape_xml(&cell_text(cell))?
                ));
            }
            out.push('\n');
            out.push_str(XML_INDENT);
            out.push_str("</row>");
        }

        if !rs.is_empty() {
            out.push('\n');
        }
        out.push_str("</resultset>");

        Ok(out.into_bytes())
    }
}

/// Escape text for use in XML content or attribute values.
fn escape_xml(text: &str) -> Result<String> {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            '\t' => escaped.push_str("&#x9;"),
            '\n' => escaped.push_str("&#xA;"),
            '\r' => escaped.push_str("&#xD;"),
            c if is_xml_char(c) => escaped.push(c),
            c => {
                return Err(RenderError::encoding(
                    "xml",
                    format!("character U+{:04X} is not allowed in XML", c as u32),
                ))
            }
        }
    }
    Ok(escaped)
}

/// XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}
