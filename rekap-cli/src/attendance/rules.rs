//! Lateness and warning thresholds

use anyhow::{Result, bail};
use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Thresholds applied during aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceRules {
    /// Morning punches strictly after this time are late
    pub late_cutoff: NaiveTime,
    /// First hour (inclusive) counted as a morning punch
    pub morning_start_hour: u32,
    /// Last hour (inclusive) counted as a morning punch
    pub morning_end_hour: u32,
    /// Employees absent more days than this get a warning letter
    pub absence_threshold: usize,
}

impl Default for AttendanceRules {
    fn default() -> Self {
        Self {
            late_cutoff: NaiveTime::from_hms_opt(7, 50, 0).expect("07:50:00 is a valid time"),
            morning_start_hour: 5,
            morning_end_hour: 9,
            absence_threshold: 3,
        }
    }
}

impl AttendanceRules {
    pub fn validate(&self) -> Result<()> {
        if self.morning_end_hour > 23 {
            bail!(
                "morning_end_hour must be between 0 and 23, got {}",
                self.morning_end_hour
            );
        }
        if self.morning_start_hour > self.morning_end_hour {
            bail!(
                "morning_start_hour ({}) is after morning_end_hour ({})",
                self.morning_start_hour,
                self.morning_end_hour
            );
        }
        Ok(())
    }

    pub fn is_morning(&self, timestamp: NaiveDateTime) -> bool {
        let hour = timestamp.hour();
        hour >= self.morning_start_hour && hour <= self.morning_end_hour
    }

    /// Only morning punches can be late
    pub fn is_late(&self, timestamp: NaiveDateTime) -> bool {
        self.is_morning(timestamp) && timestamp.time() > self.late_cutoff
    }

    pub fn needs_warning(&self, days_absent: usize) -> bool {
        days_absent > self.absence_threshold
    }
}
