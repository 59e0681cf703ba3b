//! Spreadsheet (xlsx) rendering

use rust_xlsxwriter::{
    DocProperties, ExcelDateTime, Format as CellFormat, Workbook, Worksheet, XlsxError,
};
use tracing::warn;

use crate::data::{project, Cell, Column, ResultSet, Value};
use crate::error::RenderError;
use crate::options::{ColumnAddressing, RenderOptions};
use crate::Result;

use super::Renderer;

/// Letters available to single-letter column addresses.
pub const SINGLE_LETTER_COLUMNS: usize = 26;

/// Widest sheet a workbook can hold (`XFD`).
pub const MAX_SHEET_COLUMNS: usize = 16_384;

const DATETIME_CELL_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Creation date stamped into every workbook so renders are byte-identical.
const CREATION_DATE: (u16, u8, u8) = (2000, 1, 1);

/// Zero-based sheet column for the result column at `position`, if it can
/// be addressed.
pub fn column_index(position: usize, addressing: ColumnAddressing) -> Option<u16> {
    let limit = match addressing {
        ColumnAddressing::SingleLetter => SINGLE_LETTER_COLUMNS,
        ColumnAddressing::Extended => MAX_SHEET_COLUMNS,
    };
    if position < limit {
        u16::try_from(position).ok()
    } else {
        None
    }
}

/// Letter address of the sheet column at `position` (`A`, ..., `Z`, `AA`, ...).
pub fn column_name(position: usize, addressing: ColumnAddressing) -> Option<String> {
    column_index(position, addressing)?;

    let mut letters = Vec::new();
    let mut n = position + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    Some(letters.into_iter().rev().collect())
}

/// Result columns that get a sheet column, with their sheet column index.
pub fn placed_columns(
    columns: &[Column],
    addressing: ColumnAddressing,
) -> Vec<(u16, &Column)> {
    columns
        .iter()
        .filter_map(|c| column_index(c.position, addressing).map(|idx| (idx, c)))
        .collect()
}

/// Excel workbook with one worksheet: header in row 1, data from row 2.
#[derive(Debug, Clone, Copy, Default)]
pub struct SheetRenderer;

impl Renderer for SheetRenderer {
    fn render(&self, rs: &ResultSet, options: &RenderOptions) -> Result<Vec<u8>> {
        let placed = placed_columns(rs.columns(), options.sheet_addressing);
        if placed.len() < rs.columns().len() {
            let first_dropped =
                column_name(placed.len(), ColumnAddressing::Extended).unwrap_or_default();
            warn!(
                columns = rs.columns().len(),
                written = placed.len(),
                first_dropped = %first_dropped,
                "result has more columns than the sheet can address, extra columns dropped"
            );
        }

        let datetime_format = CellFormat::new().set_num_format(DATETIME_CELL_FORMAT);
        let (year, month, day) = CREATION_DATE;
        let created = ExcelDateTime::from_ymd(year, month, day).map_err(sheet_error)?;
        let mut workbook = Workbook::new();
        workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(options.sheet_name.as_str())
            .map_err(sheet_error)?;

        for (col, column) in &placed {
            worksheet
                .write_string(0, *col, column.name.as_str())
                .map_err(sheet_error)?;
        }

        for (i, row) in rs.rows().iter().enumerate() {
            let sheet_row = u32::try_from(i + 1)
                .map_err(|_| RenderError::encoding("xlsx", "too many rows for a worksheet"))?;
            let cells = project(row, rs.columns());
            for (col, column) in &placed {
                write_cell(
                    worksheet,
                    sheet_row,
                    *col,
                    cells[column.position],
                    &datetime_format,
                )?;
            }
        }

        workbook.save_to_buffer().map_err(sheet_error)
    }
}

/// Write one cell using the closest native cell type. Missing cells stay
/// empty.
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: Cell<'_>,
    datetime_format: &CellFormat,
) -> Result<()> {
    let Some(value) = cell else {
        return Ok(());
    };

    let written = match value {
        Value::Null => return Ok(()),
        Value::Integer(v) => worksheet.write_number(row, col, *v as f64),
        Value::Float(v) if v.is_finite() => worksheet.write_number(row, col, *v),
        Value::Boolean(v) => worksheet.write_boolean(row, col, *v),
        Value::DateTime(dt) => worksheet.write_datetime_with_format(row, col, dt, datetime_format),
        Value::Float(_) | Value::Text(_) | Value::Bytes(_) => {
            worksheet.write_string(row, col, value.to_string())
        }
    };

    written.map(|_| ()).map_err(sheet_error)
}

fn sheet_error(e: XlsxError) -> RenderError {
    RenderError::encoding("xlsx", e)
}
