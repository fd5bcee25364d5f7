//! Day-first timestamp parsing

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::Cell;

/// Text layouts tried in order; day-first wins over month-first
const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d", "%Y/%m/%d"];

/// Largest serial Excel can represent (9999-12-31)
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Parse a timestamp cell; `None` when the cell is empty or unreadable
pub fn parse_timestamp(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        Cell::Empty => None,
        Cell::DateTime(dt) => Some(*dt),
        Cell::Number(serial) => from_excel_serial(*serial),
        Cell::Text(s) => parse_timestamp_text(s),
    }
}

pub fn parse_timestamp_text(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    // ISO 8601, with or without fractional seconds
    if let Ok(dt) = s.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Convert an Excel serial date (1900 date system) to a timestamp
///
/// Serials below 61 fall in the range Excel miscounts around the fictional
/// 1900-02-29 and are rejected along with non-positive values.
pub fn from_excel_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 61.0 || serial >= MAX_EXCEL_SERIAL + 1.0 {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let days = serial.trunc() as i64;
    let seconds = (serial.fract() * 86_400.0).round() as i64;

    epoch.checked_add_signed(Duration::days(days) + Duration::seconds(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_day_first_text() {
        assert_eq!(
            parse_timestamp_text("03/06/2025 07:45:10"),
            Some(dt(2025, 6, 3, 7, 45, 10))
        );
        assert_eq!(
            parse_timestamp_text("03-06-2025 07:45"),
            Some(dt(2025, 6, 3, 7, 45, 0))
        );
        assert_eq!(
            parse_timestamp_text("3/6/2025 7:05"),
            Some(dt(2025, 6, 3, 7, 5, 0))
        );
    }

    #[test]
    fn test_iso_text() {
        assert_eq!(
            parse_timestamp_text("2025-06-03 16:02:00"),
            Some(dt(2025, 6, 3, 16, 2, 0))
        );
        assert_eq!(
            parse_timestamp_text("2025-06-03T16:02:00.250"),
            Some(dt(2025, 6, 3, 16, 2, 0) + Duration::milliseconds(250))
        );
    }

    #[test]
    fn test_date_only_is_midnight() {
        assert_eq!(
            parse_timestamp_text("13/06/2025"),
            Some(dt(2025, 6, 13, 0, 0, 0))
        );
    }

    #[test]
    fn test_unparseable_text() {
        assert_eq!(parse_timestamp_text(""), None);
        assert_eq!(parse_timestamp_text("kemarin pagi"), None);
        assert_eq!(parse_timestamp_text("31/02/2025 08:00"), None);
    }

    #[test]
    fn test_excel_serial() {
        // 45810 is 2025-06-02; .3125 is 07:30
        assert_eq!(from_excel_serial(45810.3125), Some(dt(2025, 6, 2, 7, 30, 0)));
        assert_eq!(from_excel_serial(45810.0), Some(dt(2025, 6, 2, 0, 0, 0)));
        assert_eq!(from_excel_serial(0.5), None);
        assert_eq!(from_excel_serial(f64::NAN), None);
        assert_eq!(from_excel_serial(1e12), None);
    }

    #[test]
    fn test_parse_cell_variants() {
        let value = dt(2025, 6, 2, 7, 30, 0);
        assert_eq!(parse_timestamp(&Cell::DateTime(value)), Some(value));
        assert_eq!(parse_timestamp(&Cell::Number(45810.3125)), Some(value));
        assert_eq!(parse_timestamp(&Cell::text("02/06/2025 07:30")), Some(value));
        assert_eq!(parse_timestamp(&Cell::Empty), None);
    }
}
