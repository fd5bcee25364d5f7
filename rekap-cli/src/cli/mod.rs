//! Command line interface

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::config::{ConfigCommands, handle_config_command};
use commands::process::{ProcessArgs, handle_process_command};

#[derive(Parser, Debug)]
#[command(name = "rekap")]
#[command(version)]
#[command(
    about = "Attendance recap and warning letters from time-clock spreadsheets",
    long_about = None
)]
pub struct Cli {
    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process one attendance workbook
    Process(ProcessArgs),
    /// Inspect or create the config file
    #[command(subcommand)]
    Config(ConfigCommands),
}

impl Cli {
    /// Log filter used when RUST_LOG is not set
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Process(args) => handle_process_command(args, self.config.as_deref()),
            Commands::Config(command) => handle_config_command(command, self.config.as_deref()),
        }
    }
}
