//! `rekap process`

mod handler;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;

pub use handler::{ProcessOutcome, ProcessRequest, handle_process_command, process_upload};

#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Attendance workbook (.xlsx or .xls)
    pub file: PathBuf,

    /// Directory for the stored upload, recap and letters
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Letter template with ${KEY} placeholders
    #[arg(short, long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Date printed on the letters (YYYY-MM-DD), today by default
    #[arg(long, value_name = "DATE", conflicts_with = "no_letters")]
    pub letter_date: Option<NaiveDate>,

    /// Only write the recap workbook
    #[arg(long)]
    pub no_letters: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}
