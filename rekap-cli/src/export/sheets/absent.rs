//! Absences sheet - one row per employee per missed work day

use anyhow::Result;
use rust_xlsxwriter::Workbook;

use super::super::formatting::*;
use super::super::sheet_names;
use crate::attendance::AbsenceRecord;

const HEADERS: [&str; 3] = ["ID", "Nama", "Tanggal Tidak Hadir"];

pub fn create_absent_sheet(workbook: &mut Workbook, records: &[AbsenceRecord]) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_names::ABSENT)?;
    write_header(sheet, &HEADERS)?;

    if records.is_empty() {
        write_no_data(sheet, "Tidak ada data karyawan tidak hadir")?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, &record.employee_id)?;
        sheet.write_string(row, 1, record.name.as_deref().unwrap_or(""))?;
        sheet.write_string(row, 2, record.date.format(DATE_FORMAT).to_string())?;
    }

    finish_table(sheet, records.len(), HEADERS.len())
}
