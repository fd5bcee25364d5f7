use clap::Parser;
use colored::*;
use env_logger::Env;
use rekap_cli::cli::Cli;

fn main() {
    let cli = Cli::parse();
    env_logger::init_from_env(Env::default().default_filter_or(cli.default_log_filter()));

    if let Err(e) = cli.run() {
        eprintln!("{} {:#}", "error:".bright_red().bold(), e);
        std::process::exit(1);
    }
}
