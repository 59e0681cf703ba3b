//! Table-ready data structures for tabular output.
//!
//! `TextTable` is the presentation model shared by the table, markdown,
//! HTML and CSV styles: headers, data rows and an optional summary footer,
//! all as display strings. Building it is the only place tabular styles
//! touch the result set; drawing is plain string work.

use console::measure_text_width;

use crate::data::{cell_text, project, Cell, ResultSet};

/// Row count above which the table style appends a summary footer.
pub const FOOTER_THRESHOLD: usize = 10;

/// Horizontal alignment of a cell inside its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

/// A display cell: text plus alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    pub text: String,
    pub align: Align,
}

impl TableCell {
    pub fn new(text: impl Into<String>, align: Align) -> Self {
        Self {
            text: text.into(),
            align,
        }
    }

    /// Numbers are right-aligned, everything else left-aligned.
    fn from_cell(cell: Cell<'_>) -> Self {
        let align = match cell {
            Some(v) if v.is_numeric() => Align::Right,
            _ => Align::Left,
        };
        Self::new(cell_text(cell), align)
    }
}

/// A run of adjacent footer cells with equal text, drawn as one span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// First column covered
    pub start: usize,
    /// Number of columns covered
    pub len: usize,
    /// Content of the span
    pub cell: TableCell,
}

/// Table-ready result data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTable {
    /// Column count, fixed by the result set
    pub column_count: usize,
    /// Column headers, absent when the header is suppressed
    pub headers: Option<Vec<String>>,
    /// Data rows
    pub rows: Vec<Vec<TableCell>>,
    /// Summary footer, one logical cell per column
    pub footer: Option<Vec<TableCell>>,
}

impl TextTable {
    /// Create a TextTable from a result set, without a footer.
    pub fn from_result_set(rs: &ResultSet, include_header: bool) -> Self {
        let headers = include_header.then(|| {
            rs.column_names()
                .into_iter()
                .map(str::to_string)
                .collect()
        });
        let rows = rs
            .rows()
            .iter()
            .map(|row| {
                project(row, rs.columns())
                    .into_iter()
                    .map(TableCell::from_cell)
                    .collect()
            })
            .collect();

        TextTable {
            column_count: rs.columns().len(),
            headers,
            rows,
            footer: None,
        }
    }

    /// Append the row-count footer when the table is long enough.
    pub fn with_summary_footer(mut self) -> Self {
        if self.rows.len() > FOOTER_THRESHOLD && self.column_count > 0 {
            self.footer = Some(build_footer(self.column_count, self.rows.len()));
        }
        self
    }

    /// Header and row cells as plain strings, header first.
    pub fn records(&self) -> Vec<Vec<&str>> {
        let mut records = Vec::with_capacity(self.rows.len() + 1);
        if let Some(headers) = &self.headers {
            records.push(headers.iter().map(String::as_str).collect());
        }
        for row in &self.rows {
            records.push(row.iter().map(|c| c.text.as_str()).collect());
        }
        records
    }

    /// Footer cells grouped into visual spans; adjacent equal cells merge.
    pub fn footer_spans(&self) -> Vec<Span> {
        let Some(footer) = &self.footer else {
            return Vec::new();
        };

        let mut spans: Vec<Span> = Vec::new();
        for (i, cell) in footer.iter().enumerate() {
            match spans.last_mut() {
                Some(span) if span.cell.text == cell.text => {
                    span.len += 1;
                    span.cell.align = Align::Center;
                }
                _ => spans.push(Span {
                    start: i,
                    len: 1,
                    cell: cell.clone(),
                }),
            }
        }
        spans
    }

    /// Draw the table as an ASCII grid.
    ///
    /// ```text
    /// +----+-------+
    /// | id | name  |
    /// +----+-------+
    /// |  1 | alpha |
    /// +----+-------+
    /// ```
    pub fn render_grid(&self) -> String {
        if self.column_count == 0 || (self.headers.is_none() && self.rows.is_empty()) {
            return String::new();
        }

        let spans = self.footer_spans();
        let widths = self.column_widths(&spans);

        let mut out = String::new();
        draw_border(&mut out, &widths);

        let mut started = false;
        if let Some(headers) = &self.headers {
            let segments: Vec<(usize, &str, Align)> = widths
                .iter()
                .zip(headers)
                .map(|(w, h)| (*w, h.as_str(), Align::Left))
                .collect();
            draw_row(&mut out, &segments);
            started = true;
        }

        if !self.rows.is_empty() {
            if started {
                draw_border(&mut out, &widths);
            }
            for row in &self.rows {
                let segments: Vec<(usize, &str, Align)> = widths
                    .iter()
                    .zip(row)
                    .map(|(w, c)| (*w, c.text.as_str(), c.align))
                    .collect();
                draw_row(&mut out, &segments);
            }
        }

        draw_border(&mut out, &widths);
        if !spans.is_empty() {
            let span_widths: Vec<usize> = spans
                .iter()
                .map(|s| span_width(&widths, s.start, s.len))
                .collect();
            let segments: Vec<(usize, &str, Align)> = span_widths
                .iter()
                .zip(&spans)
                .map(|(w, s)| (*w, s.cell.text.as_str(), s.cell.align))
                .collect();
            draw_row(&mut out, &segments);
            draw_border(&mut out, &span_widths);
        }

        out
    }

    /// Content width of every column. A footer span wider than the columns
    /// it covers widens the last of them.
    fn column_widths(&self, spans: &[Span]) -> Vec<usize> {
        let mut widths = vec![0; self.column_count];

        if let Some(headers) = &self.headers {
            for (w, h) in widths.iter_mut().zip(headers) {
                *w = (*w).max(text_width(h));
            }
        }
        for row in &self.rows {
            for (w, c) in widths.iter_mut().zip(row) {
                *w = (*w).max(text_width(&c.text));
            }
        }
        for span in spans {
            let available = span_width(&widths, span.start, span.len);
            let needed = text_width(&span.cell.text);
            if needed > available {
                widths[span.start + span.len - 1] += needed - available;
            }
        }

        widths
    }
}

/// Build the summary footer for a table of `row_count` rows.
fn build_footer(column_count: usize, row_count: usize) -> Vec<TableCell> {
    if column_count > 1 {
        let mut footer = vec![TableCell::new("Total", Align::Left)];
        footer.extend(
            std::iter::repeat(TableCell::new(row_count.to_string(), Align::Right))
                .take(column_count - 1),
        );
        footer
    } else {
        vec![TableCell::new(format!("Total {}", row_count), Align::Left)]
    }
}

/// Display width of the widest line of `text`.
fn text_width(text: &str) -> usize {
    text.lines().map(measure_text_width).max().unwrap_or(0)
}

/// Width of `len` columns starting at `start`, including inner separators.
fn span_width(widths: &[usize], start: usize, len: usize) -> usize {
    widths[start..start + len].iter().sum::<usize>() + 3 * (len - 1)
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = width.saturating_sub(measure_text_width(text));
    match align {
        Align::Left => format!("{}{}", text, " ".repeat(fill)),
        Align::Right => format!("{}{}", " ".repeat(fill), text),
        Align::Center => {
            let left = fill / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(fill - left))
        }
    }
}

fn draw_border(out: &mut String, widths: &[usize]) {
    out.push('+');
    for w in widths {
        out.push_str(&"-".repeat(w + 2));
        out.push('+');
    }
    out.push('\n');
}

/// Draw one logical row; multi-line cells take several physical lines.
fn draw_row(out: &mut String, segments: &[(usize, &str, Align)]) {
    let height = segments
        .iter()
        .map(|(_, text, _)| text.lines().count())
        .max()
        .unwrap_or(0)
        .max(1);

    for line in 0..height {
        out.push('|');
        for (width, text, align) in segments {
            let part = text.lines().nth(line).unwrap_or("");
            out.push(' ');
            out.push_str(&pad(part, *width, *align));
            out.push_str(" |");
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Value;

    fn result_set(columns: &[&str], rows: Vec<Vec<Value>>) -> ResultSet {
        ResultSet::build(columns.iter().map(|c| c.to_string()).collect(), rows).unwrap()
    }

    fn counting_rows(n: i64, width: usize) -> Vec<Vec<Value>> {
        (0..n)
            .map(|i| {
                let mut row = vec![Value::from(i)];
                row.extend((1..width).map(|_| Value::from("x")));
                row
            })
            .collect()
    }

    #[test]
    fn test_render_grid_basic() {
        let rs = result_set(
            &["id", "name"],
            vec![
                vec![Value::from(1), Value::from("alpha")],
                vec![Value::from(2), Value::Null],
            ],
        );
        let table = TextTable::from_result_set(&rs, true).with_summary_footer();

        let expected = "\
+----+-------+
| id | name  |
+----+-------+
|  1 | alpha |
|  2 |       |
+----+-------+
";
        assert_eq!(table.render_grid(), expected);
    }

    #[test]
    fn test_render_grid_without_header() {
        let rs = result_set(&["id"], vec![vec![Value::from(7)]]);
        let table = TextTable::from_result_set(&rs, false);

        assert_eq!(table.render_grid(), "+---+\n| 7 |\n+---+\n");
    }

    #[test]
    fn test_render_grid_header_only() {
        let rs = result_set(&["a", "b"], vec![]);
        let table = TextTable::from_result_set(&rs, true);

        assert_eq!(table.render_grid(), "+---+---+\n| a | b |\n+---+---+\n");
    }

    #[test]
    fn test_render_grid_empty() {
        let rs = result_set(&["a"], vec![]);
        assert_eq!(TextTable::from_result_set(&rs, false).render_grid(), "");
        let rs = result_set(&[], vec![]);
        assert_eq!(TextTable::from_result_set(&rs, true).render_grid(), "");
    }

    #[test]
    fn test_multiline_cell() {
        let rs = result_set(&["v"], vec![vec![Value::from("ab\nc")]]);
        let table = TextTable::from_result_set(&rs, false);

        assert_eq!(table.render_grid(), "+----+\n| ab |\n| c  |\n+----+\n");
    }

    #[test]
    fn test_footer_many_columns() {
        let rs = result_set(&["a", "b", "c"], counting_rows(11, 3));
        let table = TextTable::from_result_set(&rs, true).with_summary_footer();

        let footer = table.footer.as_ref().unwrap();
        let texts: Vec<&str> = footer.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Total", "11", "11"]);

        let spans = table.footer_spans();
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[1].start, spans[1].len), (1, 2));
        assert_eq!(spans[1].cell.align, Align::Center);

        let rendered = table.render_grid();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[lines.len() - 2], "| Total |  11   |");
        assert_eq!(lines[lines.len() - 1], "+-------+-------+");
    }

    #[test]
    fn test_footer_single_column() {
        let rs = result_set(&["n"], counting_rows(11, 1));
        let table = TextTable::from_result_set(&rs, true).with_summary_footer();

        let footer = table.footer.as_ref().unwrap();
        assert_eq!(footer.len(), 1);
        assert_eq!(footer[0].text, "Total 11");

        let rendered = table.render_grid();
        assert!(rendered.starts_with("+----------+\n| n        |\n"));
        assert!(rendered.ends_with("+----------+\n| Total 11 |\n+----------+\n"));
    }

    #[test]
    fn test_no_footer_at_threshold() {
        let rs = result_set(&["a", "b"], counting_rows(10, 2));
        let table = TextTable::from_result_set(&rs, true).with_summary_footer();

        assert!(table.footer.is_none());
        assert!(!table.render_grid().contains("Total"));
    }

    #[test]
    fn test_two_column_footer_is_not_merged() {
        let rs = result_set(&["a", "b"], counting_rows(12, 2));
        let table = TextTable::from_result_set(&rs, true).with_summary_footer();

        let spans = table.footer_spans();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].cell.text, "12");
        assert_eq!(spans[1].cell.align, Align::Right);
    }

    #[test]
    fn test_records_header_first() {
        let rs = result_set(&["a"], vec![vec![Value::from("x")], vec![Value::Null]]);
        let table = TextTable::from_result_set(&rs, true);

        assert_eq!(table.records(), vec![vec!["a"], vec!["x"], vec![""]]);
    }
}
