//! Warning letters (surat panggilan) for employees with too many absences
//!
//! Letter content comes from a template filled with a flat key/value
//! context. Rendering sits behind [`LetterRenderer`] so other document
//! formats can be plugged in; [`PlaceholderRenderer`] fills `${KEY}`
//! placeholders in a text template.

pub mod template;

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::attendance::{WarningCandidate, weekday_name};
use crate::upload::UploadName;
use template::{LetterTemplate, evaluate, parse_template};

/// Template used when none is configured
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/surat_panggilan.txt");

/// Context keys available to letter templates
pub mod fields {
    pub const NAMA: &str = "NAMA";
    pub const ID: &str = "ID";
    pub const JUMLAH_HARI: &str = "JUMLAH_HARI";
    pub const TANGGAL_ABSEN: &str = "TANGGAL_ABSEN";
    pub const TANGGAL_SURAT: &str = "TANGGAL_SURAT";

    pub const ALL: [&str; 5] = [NAMA, ID, JUMLAH_HARI, TANGGAL_ABSEN, TANGGAL_SURAT];
}

const DATE_FORMAT: &str = "%d-%m-%Y";

/// Flat key/value context handed to a renderer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterContext {
    values: BTreeMap<String, String>,
}

impl LetterContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Turns a letter context into a document on disk
pub trait LetterRenderer {
    /// Extension of the documents this renderer writes
    fn extension(&self) -> &str;

    fn render(&self, context: &LetterContext, output: &Path) -> Result<()>;
}

/// Renders text templates with `${KEY}` placeholders
#[derive(Debug, Clone)]
pub struct PlaceholderRenderer {
    template: LetterTemplate,
    extension: String,
}

impl PlaceholderRenderer {
    /// Load a template file; rendered letters take its extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read letter template: {}", path.display()))?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("txt");

        Self::from_source(&source, extension)
            .with_context(|| format!("Invalid letter template: {}", path.display()))
    }

    /// Parse a template; placeholders may only name the letter fields
    pub fn from_source(source: &str, extension: &str) -> Result<Self> {
        let template = parse_template(source).map_err(|e| anyhow!("{}", e))?;
        if let Some(unknown) = template.keys().into_iter().find(|k| !fields::ALL.contains(k)) {
            bail!(
                "Unknown placeholder ${{{}}}, expected one of: {}",
                unknown,
                fields::ALL.join(", ")
            );
        }
        Ok(Self {
            template,
            extension: extension.to_string(),
        })
    }

    pub fn builtin() -> Result<Self> {
        Self::from_source(DEFAULT_TEMPLATE, "txt")
    }

    pub fn render_to_string(&self, context: &LetterContext) -> String {
        evaluate(&self.template, context)
    }
}

impl LetterRenderer for PlaceholderRenderer {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn render(&self, context: &LetterContext, output: &Path) -> Result<()> {
        let content = self.render_to_string(context);
        std::fs::write(output, content)
            .with_context(|| format!("Failed to write letter: {}", output.display()))
    }
}

/// Payload of one warning letter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarningLetter {
    pub employee_id: String,
    pub name: Option<String>,
    pub absent_dates: Vec<NaiveDate>,
    pub letter_date: NaiveDate,
}

impl WarningLetter {
    pub fn from_candidate(candidate: &WarningCandidate, letter_date: NaiveDate) -> Self {
        Self {
            employee_id: candidate.summary.employee_id.clone(),
            name: candidate.summary.name.clone(),
            absent_dates: candidate.absent_dates.clone(),
            letter_date,
        }
    }

    pub fn absence_count(&self) -> usize {
        self.absent_dates.len()
    }

    /// `02-06-2025, 03-06-2025, ...`
    pub fn absent_dates_text(&self) -> String {
        self.absent_dates
            .iter()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `Senin, 16-06-2025`
    pub fn letter_date_text(&self) -> String {
        format!(
            "{}, {}",
            weekday_name(self.letter_date.weekday()),
            self.letter_date.format(DATE_FORMAT)
        )
    }

    /// Template context; `NAMA` is left out when the name is unknown
    pub fn context(&self) -> LetterContext {
        let mut context = LetterContext::new();
        if let Some(name) = &self.name {
            context.insert(fields::NAMA, name.as_str());
        }
        context.insert(fields::ID, self.employee_id.as_str());
        context.insert(fields::JUMLAH_HARI, self.absence_count().to_string());
        context.insert(fields::TANGGAL_ABSEN, self.absent_dates_text());
        context.insert(fields::TANGGAL_SURAT, self.letter_date_text());
        context
    }
}

/// A letter written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenLetter {
    pub employee_id: String,
    pub name: Option<String>,
    pub absence_count: usize,
    pub file_name: String,
}

/// Render one letter per candidate into `output_dir`
///
/// Every candidate gets its own file: an id whose file name is already
/// taken in this run gets a `_2`, `_3`, ... suffix.
pub fn write_warning_letters(
    candidates: &[WarningCandidate],
    renderer: &dyn LetterRenderer,
    upload: &UploadName,
    output_dir: &Path,
    letter_date: NaiveDate,
) -> Result<Vec<WrittenLetter>> {
    let mut written = Vec::with_capacity(candidates.len());
    let mut taken: HashSet<String> = HashSet::new();

    for candidate in candidates {
        let letter = WarningLetter::from_candidate(candidate, letter_date);
        let file_name = claim_file_name(
            upload.letter_file_name(&letter.employee_id, renderer.extension()),
            &mut taken,
        );
        let path = output_dir.join(&file_name);

        renderer
            .render(&letter.context(), &path)
            .with_context(|| format!("Failed to render letter for {}", letter.employee_id))?;
        log::info!("Letter written: {}", path.display());

        written.push(WrittenLetter {
            employee_id: letter.employee_id.clone(),
            name: letter.name.clone(),
            absence_count: letter.absence_count(),
            file_name,
        });
    }

    Ok(written)
}

fn claim_file_name(file_name: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(file_name.clone()) {
        return file_name;
    }

    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, ext)) => (stem, format!(".{}", ext)),
        None => (file_name.as_str(), String::new()),
    };
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}{}", stem, n, extension);
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::AttendanceSummary;
    use std::cell::RefCell;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn candidate(id: &str, name: Option<&str>) -> WarningCandidate {
        let absent_dates = vec![date(6, 2), date(6, 3), date(6, 5), date(6, 6)];
        WarningCandidate {
            summary: AttendanceSummary {
                employee_id: id.to_string(),
                name: name.map(str::to_string),
                days_present: 1,
                days_late: 0,
                days_absent: absent_dates.len(),
            },
            absent_dates,
        }
    }

    fn upload() -> UploadName {
        let at = date(6, 16).and_hms_opt(10, 0, 0).unwrap();
        UploadName::new("absen.xlsx", at)
    }

    #[test]
    fn test_letter_context_fields() {
        // 2025-06-16 is a Monday
        let letter = WarningLetter::from_candidate(&candidate("1002", Some("Sari")), date(6, 16));
        let context = letter.context();

        assert_eq!(context.get(fields::NAMA), Some("Sari"));
        assert_eq!(context.get(fields::ID), Some("1002"));
        assert_eq!(context.get(fields::JUMLAH_HARI), Some("4"));
        assert_eq!(
            context.get(fields::TANGGAL_ABSEN),
            Some("02-06-2025, 03-06-2025, 05-06-2025, 06-06-2025")
        );
        assert_eq!(context.get(fields::TANGGAL_SURAT), Some("Senin, 16-06-2025"));
    }

    #[test]
    fn test_unknown_name_is_absent_from_context() {
        let letter = WarningLetter::from_candidate(&candidate("9", None), date(6, 16));
        assert_eq!(letter.context().get(fields::NAMA), None);
    }

    #[test]
    fn test_builtin_template_renders_all_fields() {
        let renderer = PlaceholderRenderer::builtin().unwrap();
        let letter = WarningLetter::from_candidate(&candidate("9", None), date(6, 20));
        let text = renderer.render_to_string(&letter.context());

        assert!(text.contains("Sdr/i -"));
        assert!(text.contains("ID Karyawan: 9"));
        assert!(text.contains("selama 4 hari kerja"));
        assert!(text.contains("Tanggal : Jumat, 20-06-2025"));
        assert!(!text.contains("${"));
    }

    #[test]
    fn test_template_file_sets_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("surat.md");
        std::fs::write(&path, "# Panggilan ${NAMA}\n").unwrap();

        let renderer = PlaceholderRenderer::from_path(&path).unwrap();
        assert_eq!(renderer.extension(), "md");

        std::fs::write(&path, "${NAMA").unwrap();
        assert!(PlaceholderRenderer::from_path(&path).is_err());
    }

    #[test]
    fn test_write_warning_letters() {
        let dir = tempfile::tempdir().unwrap();
        let renderer =
            PlaceholderRenderer::from_source("${NAMA ?? '?'}|${JUMLAH_HARI}", "txt").unwrap();
        let candidates = vec![candidate("1002", Some("Sari")), candidate("1003", None)];

        let written =
            write_warning_letters(&candidates, &renderer, &upload(), dir.path(), date(6, 16))
                .unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(
            written[0].file_name,
            "surat_panggilan_1002_20250616_100000_absen.txt"
        );
        let first = std::fs::read_to_string(dir.path().join(&written[0].file_name)).unwrap();
        assert_eq!(first, "Sari|4");
        let second = std::fs::read_to_string(dir.path().join(&written[1].file_name)).unwrap();
        assert_eq!(second, "?|4");
    }

    #[test]
    fn test_unknown_name_renders_empty_without_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = PlaceholderRenderer::from_source("Kepada ${NAMA}.", "txt").unwrap();
        let candidates = vec![candidate("1", Some("Budi")), candidate("3", None)];

        let written =
            write_warning_letters(&candidates, &renderer, &upload(), dir.path(), date(6, 16))
                .unwrap();

        assert_eq!(written.len(), 2);
        let second = std::fs::read_to_string(dir.path().join(&written[1].file_name)).unwrap();
        assert_eq!(second, "Kepada .");
    }

    #[test]
    fn test_unknown_placeholder_rejected_at_load() {
        let err = PlaceholderRenderer::from_source("${JABATAN}", "txt").unwrap_err();
        assert!(err.to_string().contains("JABATAN"));
        assert!(PlaceholderRenderer::from_source("${JABATAN ?? NAMA}", "txt").is_err());
    }

    #[test]
    fn test_colliding_ids_get_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = PlaceholderRenderer::from_source("${ID}", "txt").unwrap();
        let candidates = vec![
            candidate("001/HRD", None),
            candidate("002/HRD", None),
            candidate("Сергей", None),
            candidate("Анна", None),
        ];

        let written =
            write_warning_letters(&candidates, &renderer, &upload(), dir.path(), date(6, 16))
                .unwrap();

        let names: Vec<&str> = written.iter().map(|w| w.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "surat_panggilan_001_HRD_20250616_100000_absen.txt",
                "surat_panggilan_002_HRD_20250616_100000_absen.txt",
                "surat_panggilan_tanpa_id_20250616_100000_absen.txt",
                "surat_panggilan_tanpa_id_20250616_100000_absen_2.txt",
            ]
        );
        for (letter, candidate) in written.iter().zip(&candidates) {
            let text = std::fs::read_to_string(dir.path().join(&letter.file_name)).unwrap();
            assert_eq!(text, candidate.summary.employee_id);
        }
    }

    /// Collects contexts instead of writing documents
    struct RecordingRenderer {
        seen: RefCell<Vec<LetterContext>>,
    }

    impl LetterRenderer for RecordingRenderer {
        fn extension(&self) -> &str {
            "docx"
        }

        fn render(&self, context: &LetterContext, _output: &Path) -> Result<()> {
            self.seen.borrow_mut().push(context.clone());
            Ok(())
        }
    }

    #[test]
    fn test_custom_renderer_receives_flat_context() {
        let renderer = RecordingRenderer {
            seen: RefCell::new(Vec::new()),
        };
        let dir = tempfile::tempdir().unwrap();
        let written = write_warning_letters(
            &[candidate("7", Some("Budi"))],
            &renderer,
            &upload(),
            dir.path(),
            date(6, 16),
        )
        .unwrap();

        assert!(written[0].file_name.ends_with(".docx"));
        let seen = renderer.seen.borrow();
        let keys: Vec<&str> = seen[0].iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["ID", "JUMLAH_HARI", "NAMA", "TANGGAL_ABSEN", "TANGGAL_SURAT"]
        );
    }
}
