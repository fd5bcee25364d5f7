//! Per-employee totals, used for both the full summary and the warning list

use anyhow::Result;
use rust_xlsxwriter::Workbook;

use super::super::formatting::*;
use crate::attendance::AttendanceSummary;

const HEADERS: [&str; 5] = [
    "ID",
    "Nama",
    "Jumlah Absen Total",
    "Jumlah Telat",
    "Jumlah Tidak Hadir",
];

pub fn create_summary_sheet<'a, I>(workbook: &mut Workbook, name: &str, summaries: I) -> Result<()>
where
    I: IntoIterator<Item = &'a AttendanceSummary>,
{
    let sheet = workbook.add_worksheet();
    sheet.set_name(name)?;
    write_header(sheet, &HEADERS)?;

    let mut count = 0usize;
    for summary in summaries {
        count += 1;
        let row = count as u32;
        sheet.write_string(row, 0, &summary.employee_id)?;
        sheet.write_string(row, 1, summary.name.as_deref().unwrap_or(""))?;
        sheet.write_number(row, 2, summary.days_present as f64)?;
        sheet.write_number(row, 3, summary.days_late as f64)?;
        sheet.write_number(row, 4, summary.days_absent as f64)?;
    }

    finish_table(sheet, count, HEADERS.len())
}
