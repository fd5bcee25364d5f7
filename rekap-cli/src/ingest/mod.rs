//! Time-clock workbook ingest
//!
//! Sheets are read positionally: the first eight columns map to fixed
//! meanings whatever their header text says. Only name, id and timestamp
//! feed the aggregation.

mod normalize;
mod reader;
mod timestamp;

use chrono::NaiveDateTime;

pub use normalize::{IngestReport, SkipReason, SkippedRow, clean_id, normalize};
pub use reader::read_workbook;
pub use timestamp::{from_excel_serial, parse_timestamp, parse_timestamp_text};

/// Positional column layout of a time-clock sheet
///
/// Columns past `TIMESTAMP` (machine id, status, ...) are carried but
/// never read.
pub mod cols {
    pub const NAME: usize = 1;
    pub const ID: usize = 2;
    pub const TIMESTAMP: usize = 3;

    /// Number of columns kept per row
    pub const COUNT: usize = 8;
}

/// A spreadsheet cell reduced to what normalization cares about
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Render the cell the way it reads in the sheet
    ///
    /// Integral numbers lose their fractional part so an id stored as
    /// `1234.0` reads `1234`.
    pub fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(f) => {
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            Cell::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// One data row, already cut to the positional columns
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based row number as shown in the spreadsheet
    pub row_number: usize,
    pub cells: Vec<Cell>,
}

impl RawRow {
    pub fn new(row_number: usize, cells: Vec<Cell>) -> Self {
        Self { row_number, cells }
    }

    /// Cell at a positional column; missing columns read as empty
    pub fn get(&self, col: usize) -> &Cell {
        self.cells.get(col).unwrap_or(&Cell::Empty)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Cell::is_blank)
    }
}

/// Data rows of one sheet (header excluded)
#[derive(Debug, Clone, PartialEq)]
pub struct RawSheet {
    pub name: String,
    pub rows: Vec<RawRow>,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, rows: Vec<RawRow>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}
