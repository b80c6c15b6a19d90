use std::io::Cursor;

use calamine::{Reader, Xlsx};
use chrono::NaiveDate;

use crate::error::KyozaiError;

/// One decoded spreadsheet cell, stripped of calamine specifics.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Empty,
}

/// A decoded worksheet: header row plus data rows, blank rows removed.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// Decode the first worksheet of an xlsx workbook into a `RawTable`.
///
/// The first row is the header row. Rows whose cells are all empty are
/// skipped before validation ever sees them.
pub fn load_workbook(bytes: &[u8]) -> Result<RawTable, KyozaiError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e: calamine::XlsxError| KyozaiError::WorkbookOpen(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(KyozaiError::EmptyWorkbook)?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| KyozaiError::WorkbookRead(e.to_string()))?;

    let mut rows_iter = range.rows();
    let header_row = rows_iter.next().ok_or(KyozaiError::EmptyWorkbook)?;
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for data_row in rows_iter {
        let cells: Vec<CellValue> = data_row.iter().map(cell_value).collect();
        if cells.iter().all(|c| matches!(c, CellValue::Empty)) {
            continue;
        }
        rows.push(cells);
    }

    Ok(RawTable { headers, rows })
}

fn cell_value(cell: &calamine::Data) -> CellValue {
    match cell {
        calamine::Data::Empty => CellValue::Empty,
        calamine::Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(trimmed.to_string())
            }
        }
        calamine::Data::Float(f) => CellValue::Number(*f),
        calamine::Data::Int(i) => CellValue::Number(*i as f64),
        calamine::Data::DateTime(dt) => match dt.as_datetime() {
            Some(d) => CellValue::Date(d.date()),
            None => CellValue::Empty,
        },
        calamine::Data::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(format!("{other}")),
    }
}
