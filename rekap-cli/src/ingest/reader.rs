//! Read time-clock workbooks (.xlsx / .xls)

use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};

use super::{Cell, RawRow, RawSheet, cols};

/// Read every sheet of a workbook, in workbook order
///
/// The first used row of each sheet is its header and is skipped. Rows are
/// padded on the left when the used range does not start in column A, so
/// positional mapping always counts from column A.
pub fn read_workbook(path: &Path) -> Result<Vec<RawSheet>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let sheet_names = workbook.sheet_names();
    if sheet_names.is_empty() {
        bail!("Excel file has no sheets: {}", path.display());
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .with_context(|| format!("Failed to read sheet: {}", name))?;

        let (start_row, start_col) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let rows: Vec<RawRow> = range
            .rows()
            .enumerate()
            .skip(1)
            .map(|(idx, row)| RawRow::new(start_row + idx + 1, to_cells(row, start_col)))
            .collect();

        log::debug!("Sheet '{}': {} data rows", name, rows.len());
        sheets.push(RawSheet::new(name, rows));
    }

    Ok(sheets)
}

fn to_cells(row: &[Data], start_col: usize) -> Vec<Cell> {
    let mut cells = vec![Cell::Empty; start_col.min(cols::COUNT)];
    cells.extend(
        row.iter()
            .take(cols::COUNT.saturating_sub(start_col))
            .map(to_cell),
    );
    cells
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => Cell::DateTime(value),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}
