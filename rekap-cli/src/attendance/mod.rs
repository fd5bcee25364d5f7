//! Attendance aggregation
//!
//! Turns normalized punch records into the recap tables: late arrivals,
//! absences, per-employee totals and the list of employees who need a
//! warning letter. This is a pure function of its inputs; every table is
//! ordered by the roster so output does not depend on input row order.

pub mod calendar;
pub mod roster;
pub mod rules;

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

pub use calendar::{WorkCalendar, is_rest_day, weekday_name};
pub use roster::{EmployeeRoster, natural_cmp};
pub use rules::AttendanceRules;

/// A single clock event that survived normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PunchRecord {
    pub employee_id: String,
    pub employee_name: String,
    pub timestamp: NaiveDateTime,
}

impl PunchRecord {
    pub fn new(
        employee_id: impl Into<String>,
        employee_name: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            employee_name: employee_name.into(),
            timestamp,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LateRecord {
    pub employee_id: String,
    pub name: Option<String>,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbsenceRecord {
    pub employee_id: String,
    pub name: Option<String>,
    pub date: NaiveDate,
}

/// Totals for one employee over the work calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceSummary {
    pub employee_id: String,
    /// `None` when the id never appears on a surviving punch
    pub name: Option<String>,
    pub days_present: usize,
    pub days_late: usize,
    pub days_absent: usize,
}

/// An employee whose absences exceed the warning threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarningCandidate {
    #[serde(flatten)]
    pub summary: AttendanceSummary,
    pub absent_dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceStats {
    pub total_employees: usize,
    pub late_employees: usize,
    pub absent_employees: usize,
}

/// Everything derived from one input file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceReport {
    pub calendar: WorkCalendar,
    pub late: Vec<LateRecord>,
    pub absences: Vec<AbsenceRecord>,
    pub summaries: Vec<AttendanceSummary>,
    pub candidates: Vec<WarningCandidate>,
}

impl AttendanceReport {
    pub fn stats(&self) -> AttendanceStats {
        let late: HashSet<&str> = self.late.iter().map(|r| r.employee_id.as_str()).collect();
        let absent: HashSet<&str> = self
            .absences
            .iter()
            .map(|r| r.employee_id.as_str())
            .collect();

        AttendanceStats {
            total_employees: self.summaries.len(),
            late_employees: late.len(),
            absent_employees: absent.len(),
        }
    }

    pub fn summary_for(&self, employee_id: &str) -> Option<&AttendanceSummary> {
        self.summaries.iter().find(|s| s.employee_id == employee_id)
    }
}

/// Aggregate punches into recap tables
///
/// `punches` must already be deduplicated per (id, date). Every roster id
/// gets a summary, including ids without any punch; punches for ids outside
/// the roster are ignored.
pub fn aggregate(
    punches: &[PunchRecord],
    roster: &EmployeeRoster,
    rules: &AttendanceRules,
) -> AttendanceReport {
    let calendar = WorkCalendar::covering(punches.iter().map(PunchRecord::date));

    // Last name seen wins when an id is spelled differently across rows
    let mut names: HashMap<&str, &str> = HashMap::new();
    let mut by_employee: HashMap<&str, Vec<&PunchRecord>> = HashMap::new();
    for punch in punches {
        names.insert(&punch.employee_id, &punch.employee_name);
        by_employee
            .entry(&punch.employee_id)
            .or_default()
            .push(punch);
    }

    let mut report = AttendanceReport {
        calendar,
        ..Default::default()
    };

    for employee_id in roster.iter() {
        let name = names.get(employee_id).map(|n| n.to_string());
        let own = by_employee
            .get(employee_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let mut days_late = 0;
        for punch in own.iter().filter(|p| rules.is_late(p.timestamp)) {
            report.late.push(LateRecord {
                employee_id: employee_id.to_string(),
                name: name.clone(),
                timestamp: punch.timestamp,
            });
            days_late += 1;
        }

        let present: HashSet<NaiveDate> = own.iter().map(|p| p.date()).collect();
        let (attended, missed): (Vec<NaiveDate>, Vec<NaiveDate>) = report
            .calendar
            .dates()
            .iter()
            .copied()
            .partition(|d| present.contains(d));

        for date in &missed {
            report.absences.push(AbsenceRecord {
                employee_id: employee_id.to_string(),
                name: name.clone(),
                date: *date,
            });
        }

        let summary = AttendanceSummary {
            employee_id: employee_id.to_string(),
            name,
            days_present: attended.len(),
            days_late,
            days_absent: missed.len(),
        };

        if rules.needs_warning(summary.days_absent) {
            report.candidates.push(WarningCandidate {
                summary: summary.clone(),
                absent_dates: missed,
            });
        }
        report.summaries.push(summary);
    }

    log::debug!(
        "Aggregated {} punches for {} employees over {} work days",
        punches.len(),
        roster.len(),
        report.calendar.len()
    );

    report
}
