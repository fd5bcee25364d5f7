//! Attendance recap from time-clock spreadsheets
//!
//! Reads every sheet of a workbook, works out lateness and absence per
//! employee over the Sunday-free calendar spanned by the data, writes a
//! recap workbook and renders warning letters for repeated absence.

pub mod attendance;
pub mod cli;
pub mod config;
pub mod export;
pub mod ingest;
pub mod letters;
pub mod upload;
