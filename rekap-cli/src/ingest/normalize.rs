//! Row normalization: cleaning, parsing, filtering and deduplication

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::timestamp::parse_timestamp;
use super::{Cell, RawRow, RawSheet, cols};
use crate::attendance::{EmployeeRoster, PunchRecord};

/// Why a row did not become a punch record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SkipReason {
    MissingName,
    MissingId,
    MissingTimestamp,
    InvalidTimestamp(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingName => write!(f, "Nama kosong"),
            SkipReason::MissingId => write!(f, "ID kosong"),
            SkipReason::MissingTimestamp => write!(f, "Tgl/Waktu kosong"),
            SkipReason::InvalidTimestamp(raw) => write!(f, "Tgl/Waktu tidak valid: {}", raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub sheet: String,
    pub row_number: usize,
    pub reason: SkipReason,
}

/// Result of normalizing every sheet of a workbook
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestReport {
    pub sheets: Vec<String>,
    /// Non-blank data rows seen across all sheets
    pub rows_read: usize,
    pub punches: Vec<PunchRecord>,
    pub roster: EmployeeRoster,
    pub skipped: Vec<SkippedRow>,
    /// Later punches for an (id, date) already seen
    pub duplicates_removed: usize,
}

/// Clean an id cell: trim, and drop a trailing `.0` left by numeric storage
pub fn clean_id(cell: &Cell) -> String {
    let id = cell.display();
    let id = id.trim();
    id.strip_suffix(".0").unwrap_or(id).to_string()
}

fn clean_name(cell: &Cell) -> String {
    cell.display().trim().to_string()
}

/// Normalize raw sheets into punch records
///
/// Sheets are concatenated in order. The roster takes every non-empty id,
/// including ids on rows that are later skipped, so an employee whose
/// punches are all unreadable still shows up as absent.
pub fn normalize(sheets: &[RawSheet]) -> IngestReport {
    let mut report = IngestReport {
        sheets: sheets.iter().map(|s| s.name.clone()).collect(),
        ..Default::default()
    };
    let mut raw_ids: Vec<String> = Vec::new();
    let mut seen: HashSet<(String, NaiveDate)> = HashSet::new();

    for sheet in sheets {
        for row in sheet.rows.iter().filter(|r| !r.is_blank()) {
            report.rows_read += 1;

            let id = clean_id(row.get(cols::ID));
            if !id.is_empty() {
                raw_ids.push(id.clone());
            }

            let punch = match to_punch(row, id) {
                Ok(punch) => punch,
                Err(reason) => {
                    log::debug!(
                        "Skipping {} row {}: {}",
                        sheet.name,
                        row.row_number,
                        reason
                    );
                    report.skipped.push(SkippedRow {
                        sheet: sheet.name.clone(),
                        row_number: row.row_number,
                        reason,
                    });
                    continue;
                }
            };

            if seen.insert((punch.employee_id.clone(), punch.date())) {
                report.punches.push(punch);
            } else {
                report.duplicates_removed += 1;
            }
        }
    }

    report.roster = EmployeeRoster::from_ids(raw_ids);

    if !report.skipped.is_empty() {
        log::warn!(
            "{} of {} rows skipped during normalization",
            report.skipped.len(),
            report.rows_read
        );
    }
    log::info!(
        "Normalized {} punches for {} employees ({} duplicates removed)",
        report.punches.len(),
        report.roster.len(),
        report.duplicates_removed
    );

    report
}

fn to_punch(row: &RawRow, id: String) -> Result<PunchRecord, SkipReason> {
    let name = clean_name(row.get(cols::NAME));
    if name.is_empty() {
        return Err(SkipReason::MissingName);
    }
    if id.is_empty() {
        return Err(SkipReason::MissingId);
    }

    let cell = row.get(cols::TIMESTAMP);
    if cell.is_blank() {
        return Err(SkipReason::MissingTimestamp);
    }
    let timestamp =
        parse_timestamp(cell).ok_or_else(|| SkipReason::InvalidTimestamp(cell.display()))?;

    Ok(PunchRecord::new(id, name, timestamp))
}
