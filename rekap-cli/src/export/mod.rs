//! Excel export of the attendance recap

mod formatting;
pub mod sheets;

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::attendance::AttendanceReport;
use crate::ingest::SkippedRow;
use sheets::*;

pub mod sheet_names {
    pub const LATE: &str = "Karyawan Telat";
    pub const ABSENT: &str = "Karyawan Tidak Hadir";
    pub const SUMMARY: &str = "Jumlah Kehadiran";
    pub const CANDIDATES: &str = ">3 Hari Tidak Hadir";
    pub const SKIPPED: &str = "Baris Dilewati";
}

pub struct RecapExporter;

impl RecapExporter {
    /// Write the recap workbook
    ///
    /// Late and absent sheets are always present (with a "no data" line when
    /// empty); the warning list and skipped rows only when non-empty.
    pub fn export_to_excel(
        report: &AttendanceReport,
        skipped: &[SkippedRow],
        file_path: &Path,
    ) -> Result<()> {
        let mut workbook = Workbook::new();

        create_late_sheet(&mut workbook, &report.late)?;
        create_absent_sheet(&mut workbook, &report.absences)?;
        create_summary_sheet(&mut workbook, sheet_names::SUMMARY, &report.summaries)?;

        if !report.candidates.is_empty() {
            create_summary_sheet(
                &mut workbook,
                sheet_names::CANDIDATES,
                report.candidates.iter().map(|c| &c.summary),
            )?;
        }

        if !skipped.is_empty() {
            create_skipped_sheet(&mut workbook, skipped)?;
        }

        workbook
            .save(file_path)
            .with_context(|| format!("Failed to save Excel file: {}", file_path.display()))?;

        log::info!("Recap exported to: {}", file_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::{AttendanceRules, EmployeeRoster, PunchRecord, aggregate};
    use crate::ingest::SkipReason;
    use calamine::{Data, Reader, Xlsx, open_workbook};
    use chrono::NaiveDate;

    fn punch(id: &str, name: &str, day: u32, h: u32, m: u32) -> PunchRecord {
        let ts = NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap();
        PunchRecord::new(id, name, ts)
    }

    fn cell(range: &calamine::Range<Data>, row: u32, col: u32) -> String {
        range
            .get_value((row, col))
            .map(|d| d.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_full_recap_workbook() {
        let punches: Vec<PunchRecord> = (2..=6)
            .map(|d| punch("E1", "Budi", d, 7, 30))
            .chain([punch("E2", "Sari", 4, 8, 15)])
            .collect();
        let roster = EmployeeRoster::from_ids(["E1", "E2"]);
        let report = aggregate(&punches, &roster, &AttendanceRules::default());
        let skipped = vec![SkippedRow {
            sheet: "Sheet1".into(),
            row_number: 9,
            reason: SkipReason::InvalidTimestamp("??".into()),
        }];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hasil.xlsx");
        RecapExporter::export_to_excel(&report, &skipped, &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(
            workbook.sheet_names(),
            vec![
                sheet_names::LATE,
                sheet_names::ABSENT,
                sheet_names::SUMMARY,
                sheet_names::CANDIDATES,
                sheet_names::SKIPPED,
            ]
        );

        let late = workbook.worksheet_range(sheet_names::LATE).unwrap();
        assert_eq!(cell(&late, 1, 0), "E2");
        assert_eq!(cell(&late, 1, 2), "04-06-2025 08:15:00");

        let summary = workbook.worksheet_range(sheet_names::SUMMARY).unwrap();
        assert_eq!(cell(&summary, 0, 2), "Jumlah Absen Total");
        assert_eq!(cell(&summary, 2, 0), "E2");
        assert_eq!(cell(&summary, 2, 4), "4");

        let candidates = workbook.worksheet_range(sheet_names::CANDIDATES).unwrap();
        assert_eq!(candidates.height(), 2);
        assert_eq!(cell(&candidates, 1, 1), "Sari");
    }

    #[test]
    fn test_empty_tables_get_placeholders() {
        let punches: Vec<PunchRecord> = (2..=3).map(|d| punch("E1", "Budi", d, 7, 0)).collect();
        let roster = EmployeeRoster::from_ids(["E1"]);
        let report = aggregate(&punches, &roster, &AttendanceRules::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hasil.xlsx");
        RecapExporter::export_to_excel(&report, &[], &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(
            workbook.sheet_names(),
            vec![sheet_names::LATE, sheet_names::ABSENT, sheet_names::SUMMARY]
        );
        let late = workbook.worksheet_range(sheet_names::LATE).unwrap();
        assert_eq!(cell(&late, 1, 0), "Tidak ada data karyawan telat");
        let absent = workbook.worksheet_range(sheet_names::ABSENT).unwrap();
        assert_eq!(cell(&absent, 1, 0), "Tidak ada data karyawan tidak hadir");
    }
}
