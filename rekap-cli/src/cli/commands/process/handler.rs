//! Process command handler: upload gate, ingest, aggregate, export, letters

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use colored::*;
use serde::Serialize;

use super::ProcessArgs;
use crate::attendance::{AttendanceStats, WarningCandidate, aggregate};
use crate::config::Config;
use crate::export::RecapExporter;
use crate::ingest::{SkippedRow, normalize, read_workbook};
use crate::letters::{LetterRenderer, PlaceholderRenderer, WrittenLetter, write_warning_letters};
use crate::upload::{UploadName, validate_upload};

/// One run of the pipeline
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    pub input: PathBuf,
    pub received_at: NaiveDateTime,
    /// `None` skips letter rendering
    pub letter_date: Option<NaiveDate>,
}

/// What a run produced
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub input: PathBuf,
    pub stored_file: PathBuf,
    pub recap_file: PathBuf,
    pub sheets: Vec<String>,
    pub rows_read: usize,
    pub punches: usize,
    pub duplicates_removed: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub work_days: usize,
    pub stats: AttendanceStats,
    pub candidates: Vec<WarningCandidate>,
    pub skipped: Vec<SkippedRow>,
    pub letters: Vec<WrittenLetter>,
}

pub fn handle_process_command(args: ProcessArgs, config_path: Option<&Path>) -> Result<()> {
    let json = args.json;
    let (config, request) = prepare(args, config_path, Local::now().naive_local())?;
    let outcome = process_upload(&request, &config)?;

    if json {
        println!("{}", outcome_json(&outcome)?);
    } else {
        print_summary(&outcome, &config);
    }

    Ok(())
}

/// Merge CLI overrides into the loaded config and build the request
fn prepare(
    args: ProcessArgs,
    config_path: Option<&Path>,
    now: NaiveDateTime,
) -> Result<(Config, ProcessRequest)> {
    let mut config = Config::load(config_path)?;
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if let Some(template) = args.template {
        config.template_path = Some(template);
    }

    let letter_date = if args.no_letters {
        None
    } else {
        Some(args.letter_date.unwrap_or(now.date()))
    };

    let request = ProcessRequest {
        input: args.file,
        received_at: now,
        letter_date,
    };
    Ok((config, request))
}

fn outcome_json(outcome: &ProcessOutcome) -> Result<String> {
    serde_json::to_string_pretty(outcome).context("Failed to format JSON output")
}

/// Run the whole pipeline for one workbook
pub fn process_upload(request: &ProcessRequest, config: &Config) -> Result<ProcessOutcome> {
    validate_upload(&request.input, &config.allowed_extensions)?;

    // Fail on a broken template before anything is written
    let renderer = match request.letter_date {
        Some(_) => Some(load_renderer(config)?),
        None => None,
    };

    let original_name = request
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let upload = UploadName::new(&original_name, request.received_at);

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    let stored_file = config.output_dir.join(upload.stored_name());
    std::fs::copy(&request.input, &stored_file).with_context(|| {
        format!(
            "Failed to store upload {} as {}",
            request.input.display(),
            stored_file.display()
        )
    })?;
    log::info!("Upload stored as {}", stored_file.display());

    let sheets = read_workbook(&stored_file)?;
    let ingest = normalize(&sheets);
    let report = aggregate(&ingest.punches, &ingest.roster, &config.rules);

    let recap_file = config.output_dir.join(upload.recap_file_name());
    RecapExporter::export_to_excel(&report, &ingest.skipped, &recap_file)?;

    let letters = match (&renderer, request.letter_date) {
        (Some(renderer), Some(date)) => write_warning_letters(
            &report.candidates,
            renderer.as_ref(),
            &upload,
            &config.output_dir,
            date,
        )?,
        _ => Vec::new(),
    };

    Ok(ProcessOutcome {
        input: request.input.clone(),
        stored_file,
        recap_file,
        sheets: ingest.sheets,
        rows_read: ingest.rows_read,
        punches: ingest.punches.len(),
        duplicates_removed: ingest.duplicates_removed,
        first_date: report.calendar.first(),
        last_date: report.calendar.last(),
        work_days: report.calendar.len(),
        stats: report.stats(),
        candidates: report.candidates,
        skipped: ingest.skipped,
        letters,
    })
}

fn load_renderer(config: &Config) -> Result<Box<dyn LetterRenderer>> {
    let renderer = match &config.template_path {
        Some(path) => PlaceholderRenderer::from_path(path)?,
        None => PlaceholderRenderer::builtin()?,
    };
    Ok(Box::new(renderer))
}

fn print_summary(outcome: &ProcessOutcome, config: &Config) {
    println!("{}", "Rekap absensi selesai".bright_green().bold());
    println!();

    match (outcome.first_date, outcome.last_date) {
        (Some(first), Some(last)) => println!(
            "Periode        : {} s/d {} ({} hari kerja)",
            first.format("%d-%m-%Y"),
            last.format("%d-%m-%Y"),
            outcome.work_days
        ),
        _ => println!("Periode        : {}", "tidak ada data valid".yellow()),
    }
    println!(
        "Sheet dibaca   : {} ({} baris, {} absen valid, {} duplikat)",
        outcome.sheets.join(", "),
        outcome.rows_read,
        outcome.punches,
        outcome.duplicates_removed
    );
    println!("Total karyawan : {}", outcome.stats.total_employees);
    println!(
        "Karyawan telat : {}",
        outcome.stats.late_employees.to_string().yellow()
    );
    println!(
        "Tidak hadir    : {}",
        outcome.stats.absent_employees.to_string().yellow()
    );

    if !outcome.skipped.is_empty() {
        println!(
            "Baris dilewati : {}",
            outcome.skipped.len().to_string().bright_red()
        );
        for row in &outcome.skipped {
            println!("  {} baris {}: {}", row.sheet, row.row_number, row.reason);
        }
    }

    println!();
    println!(
        "Rekap          : {}",
        outcome.recap_file.display().to_string().cyan()
    );

    if !outcome.candidates.is_empty() {
        println!();
        println!(
            "{}",
            format!(
                "Tidak hadir lebih dari {} hari:",
                config.rules.absence_threshold
            )
            .bold()
        );
        for candidate in &outcome.candidates {
            println!(
                "  {} {} ({} hari)",
                candidate.summary.employee_id.bright_white(),
                candidate.summary.name.as_deref().unwrap_or("-"),
                candidate.summary.days_absent
            );
        }
    }

    if !outcome.letters.is_empty() {
        println!();
        println!("{}", "Surat panggilan:".bold());
        for letter in &outcome.letters {
            let path = config.output_dir.join(&letter.file_name);
            println!("  {}", path.display().to_string().cyan());
        }
    }
}
