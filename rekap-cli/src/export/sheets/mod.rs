//! Excel sheet generators for the attendance recap

pub mod absent;
pub mod late;
pub mod skipped;
pub mod summary;

pub use absent::create_absent_sheet;
pub use late::create_late_sheet;
pub use skipped::create_skipped_sheet;
pub use summary::create_summary_sheet;
