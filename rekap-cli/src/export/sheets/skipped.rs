//! Rows dropped during normalization, so nothing disappears silently

use anyhow::Result;
use rust_xlsxwriter::Workbook;

use super::super::formatting::*;
use super::super::sheet_names;
use crate::ingest::SkippedRow;

const HEADERS: [&str; 3] = ["Sheet", "Baris", "Alasan"];

pub fn create_skipped_sheet(workbook: &mut Workbook, rows: &[SkippedRow]) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_names::SKIPPED)?;
    write_header(sheet, &HEADERS)?;

    for (idx, skipped) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, &skipped.sheet)?;
        sheet.write_number(row, 1, skipped.row_number as f64)?;
        sheet.write_string(row, 2, skipped.reason.to_string())?;
    }

    finish_table(sheet, rows.len(), HEADERS.len())
}
