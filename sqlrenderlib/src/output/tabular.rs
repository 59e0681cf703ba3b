//! Table, markdown, HTML and CSV rendering

use crate::data::ResultSet;
use crate::error::RenderError;
use crate::options::RenderOptions;
use crate::Result;

use super::table::{Align, TableCell, TextTable};
use super::Renderer;

/// UTF-8 byte-order mark written ahead of CSV output.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Tabular output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// ASCII grid, with a summary footer past the row threshold
    Table,
    /// Markdown pipe table
    Markdown,
    /// HTML table
    Html,
    /// CSV with a BOM
    Csv,
}

/// Renders a result set in one of the tabular styles.
#[derive(Debug, Clone, Copy)]
pub struct TabularRenderer {
    style: TableStyle,
}

impl TabularRenderer {
    pub fn new(style: TableStyle) -> Self {
        Self { style }
    }
}

impl Renderer for TabularRenderer {
    fn render(&self, rs: &ResultSet, options: &RenderOptions) -> Result<Vec<u8>> {
        let table = TextTable::from_result_set(rs, options.include_header);

        match self.style {
            TableStyle::Table => Ok(table.with_summary_footer().render_grid().into_bytes()),
            TableStyle::Markdown => Ok(render_markdown(&table).into_bytes()),
            TableStyle::Html => Ok(render_html(&table).into_bytes()),
            TableStyle::Csv => render_csv(&table),
        }
    }
}

fn render_markdown(table: &TextTable) -> String {
    let mut out = String::new();
    if table.column_count == 0 {
        return out;
    }

    if let Some(headers) = &table.headers {
        markdown_line(&mut out, headers.iter().map(String::as_str));
        out.push('|');
        out.push_str(&" --- |".repeat(table.column_count));
        out.push('\n');
    }
    for row in &table.rows {
        markdown_line(&mut out, row.iter().map(|c| c.text.as_str()));
    }
    out
}

fn markdown_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    out.push('|');
    for cell in cells {
        out.push(' ');
        out.push_str(&escape_markdown(cell));
        out.push_str(" |");
    }
    out.push('\n');
}

fn escape_markdown(text: &str) -> String {
    text.replace('|', "\\|")
        .replace("\r\n", "<br/>")
        .replace(['\r', '\n'], "<br/>")
}

fn render_html(table: &TextTable) -> String {
    let mut out = String::new();
    if table.column_count == 0 {
        return out;
    }

    out.push_str("<table class=\"resultset\">\n");
    if let Some(headers) = &table.headers {
        out.push_str("  <thead>\n  <tr>\n");
        for header in headers {
            out.push_str(&format!("    <th>{}</th>\n", escape_html(header)));
        }
        out.push_str("  </tr>\n  </thead>\n");
    }
    if !table.rows.is_empty() {
        out.push_str("  <tbody>\n");
        for row in &table.rows {
            out.push_str("  <tr>\n");
            for cell in row {
                html_cell(&mut out, cell);
            }
            out.push_str("  </tr>\n");
        }
        out.push_str("  </tbody>\n");
    }
    out.push_str("</table>\n");
    out
}

fn html_cell(out: &mut String, cell: &TableCell) {
    let text = escape_html(&cell.text);
    if cell.align == Align::Right {
        out.push_str(&format!("    <td align=\"right\">{}</td>\n", text));
    } else {
        out.push_str(&format!("    <td>{}</td>\n", text));
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            '\r' => {
                chars.next_if_eq(&'\n');
                escaped.push_str("<br/>");
            }
            '\n' => escaped.push_str("<br/>"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn render_csv(table: &TextTable) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(UTF8_BOM.to_vec());

    if table.column_count > 0 {
        for record in table.records() {
            writer
                .write_record(record)
                .map_err(|e| RenderError::encoding("csv", e))?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| RenderError::encoding("csv", e.error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Value;

    fn sample() -> ResultSet {
        ResultSet::build(
            vec!["id".into(), "name".into()],
            vec![
                vec![Value::from(1), Value::from("a|b")],
                vec![Value::from(2), Value::Null],
            ],
        )
        .unwrap()
    }

    fn render_str(style: TableStyle, rs: &ResultSet, options: &RenderOptions) -> String {
        let out = TabularRenderer::new(style).render(rs, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_markdown() {
        let out = render_str(TableStyle::Markdown, &sample(), &RenderOptions::new());
        assert_eq!(
            out,
            "| id | name |\n| --- | --- |\n| 1 | a\\|b |\n| 2 |  |\n"
        );
    }

    #[test]
    fn test_markdown_without_header() {
        let options = RenderOptions::new().include_header(false);
        let out = render_str(TableStyle::Markdown, &sample(), &options);
        assert_eq!(out, "| 1 | a\\|b |\n| 2 |  |\n");
    }

    #[test]
    fn test_html() {
        let out = render_str(TableStyle::Html, &sample(), &RenderOptions::new());
        let expected = "\
<table class=\"resultset\">
  <thead>
  <tr>
    <th>id</th>
    <th>name</th>
  </tr>
  </thead>
  <tbody>
  <tr>
    <td align=\"right\">1</td>
    <td>a|b</td>
  </tr>
  <tr>
    <td align=\"right\">2</td>
    <td></td>
  </tr>
  </tbody>
</table>
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_html_escapes() {
        let rs = ResultSet::build(vec!["v".into()], vec![vec![Value::from("<b>&\"x\"\n")]])
            .unwrap();
        let out = render_str(TableStyle::Html, &rs, &RenderOptions::new());
        assert!(out.contains("<td>&lt;b&gt;&amp;&#34;x&#34;<br/></td>"));
    }

    #[test]
    fn test_carriage_returns_break_lines() {
        let rs = ResultSet::build(vec!["v".into()], vec![vec![Value::from("a\rb\r\nc\nd")]])
            .unwrap();

        let html = render_str(TableStyle::Html, &rs, &RenderOptions::new());
        assert!(html.contains("<td>a<br/>b<br/>c<br/>d</td>"));

        let markdown = render_str(TableStyle::Markdown, &rs, &RenderOptions::new());
        assert_eq!(markdown, "| v |\n| --- |\n| a<br/>b<br/>c<br/>d |\n");
        assert!(!markdown.contains('\r'));
    }

    #[test]
    fn test_csv_has_bom_and_empty_nulls() {
        let out = TabularRenderer::new(TableStyle::Csv)
            .render(&sample(), &RenderOptions::new())
            .unwrap();

        assert!(out.starts_with(UTF8_BOM));
        let text = String::from_utf8(out[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text, "id,name\n1,a|b\n2,\n");
    }

    #[test]
    fn test_csv_without_header_and_quoting() {
        let rs = ResultSet::build(
            vec!["a".into(), "b".into()],
            vec![vec![Value::from("x,y"), Value::from("line\nbreak")]],
        )
        .unwrap();
        let options = RenderOptions::new().include_header(false);
        let out = TabularRenderer::new(TableStyle::Csv)
            .render(&rs, &options)
            .unwrap();

        let text = String::from_utf8(out[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text, "\"x,y\",\"line\nbreak\"\n");
    }

    #[test]
    fn test_csv_empty_result_is_only_bom() {
        let rs = ResultSet::build(vec![], vec![]).unwrap();
        let out = TabularRenderer::new(TableStyle::Csv)
            .render(&rs, &RenderOptions::new())
            .unwrap();
        assert_eq!(out, UTF8_BOM);
    }

    #[test]
    fn test_null_never_rendered_as_word() {
        let rs = ResultSet::build(vec!["n".into()], vec![vec![Value::Null]]).unwrap();
        for style in [
            TableStyle::Table,
            TableStyle::Markdown,
            TableStyle::Html,
            TableStyle::Csv,
        ] {
            let out = render_str(style, &rs, &RenderOptions::new()).to_lowercase();
            assert!(!out.contains("null"), "{style:?}: {out}");
            assert!(!out.contains("nil"), "{style:?}: {out}");
        }
    }

    #[test]
    fn test_table_style_footer() {
        let rows = (0..11)
            .map(|i| vec![Value::from(i), Value::from("x"), Value::from("y")])
            .collect();
        let rs = ResultSet::build(vec!["a".into(), "b".into(), "c".into()], rows).unwrap();

        let table = render_str(TableStyle::Table, &rs, &RenderOptions::new());
        assert!(table.contains("| Total |  11   |"));

        let markdown = render_str(TableStyle::Markdown, &rs, &RenderOptions::new());
        assert!(!markdown.contains("Total"));
    }
}
