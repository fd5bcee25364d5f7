//! Business-day calendar and weekday names

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

/// Sunday is the only rest day; there is no holiday calendar.
pub fn is_rest_day(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

/// Indonesian day name, as printed on letters
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

/// Every working date between the first and last observed punch, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkCalendar {
    dates: Vec<NaiveDate>,
}

impl WorkCalendar {
    /// Calendar for the inclusive range `first..=last`, skipping rest days
    pub fn spanning(first: NaiveDate, last: NaiveDate) -> Self {
        let dates = first
            .iter_days()
            .take_while(|d| *d <= last)
            .filter(|d| !is_rest_day(*d))
            .collect();
        Self { dates }
    }

    /// Calendar covering the range of the given dates; empty if there are none
    pub fn covering<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        for date in dates {
            bounds = Some(match bounds {
                None => (date, date),
                Some((lo, hi)) => (lo.min(date), hi.max(date)),
            });
        }

        match bounds {
            Some((first, last)) => Self::spanning(first, last),
            None => Self::default(),
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}
