//! Plain `name=value` rendering

use crate::data::{cell_text, project, ResultSet};
use crate::options::RenderOptions;
use crate::Result;

use super::Renderer;

/// One `name=value, name=value` line per row. Embedded newlines are written
/// as the two characters `\n`, so one line is always one row.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn render(&self, rs: &ResultSet, _options: &RenderOptions) -> Result<Vec<u8>> {
        let mut out = String::new();
        for row in rs.rows() {
            let pairs: Vec<String> = rs
                .columns()
                .iter()
                .zip(project(row, rs.columns()))
                .map(|(column, cell)| {
                    format!("{}={}", column.name, cell_text(cell)).replace('\n', "\\n")
                })
                .collect();
            out.push_str(&pairs.join(", "));
            out.push('\n');
        }
        Ok(out.into_bytes())
    }
}
