//! Upload validation and output naming

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// Reasons an upload is rejected before any processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    NotFound(PathBuf),
    Empty(PathBuf),
    UnsupportedExtension { allowed: Vec<String> },
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::NotFound(path) => write!(f, "File tidak ditemukan: {}", path.display()),
            UploadError::Empty(path) => write!(f, "File kosong: {}", path.display()),
            UploadError::UnsupportedExtension { allowed } => {
                let list: Vec<String> = allowed.iter().map(|e| format!(".{}", e)).collect();
                write!(f, "File harus {}", list.join(" atau "))
            }
        }
    }
}

impl std::error::Error for UploadError {}

/// Check that `path` is a non-empty file with an allowed extension
pub fn validate_upload(path: &Path, allowed: &[String]) -> Result<(), UploadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    let supported = extension
        .as_deref()
        .is_some_and(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)));
    if !supported {
        return Err(UploadError::UnsupportedExtension {
            allowed: allowed.to_vec(),
        });
    }

    let metadata = std::fs::metadata(path).map_err(|_| UploadError::NotFound(path.to_path_buf()))?;
    if !metadata.is_file() {
        return Err(UploadError::NotFound(path.to_path_buf()));
    }
    if metadata.len() == 0 {
        return Err(UploadError::Empty(path.to_path_buf()));
    }

    Ok(())
}

/// Reduce a user-supplied file name to a safe ASCII name
///
/// Directory parts are dropped, whitespace runs become `_`, and anything
/// outside `[A-Za-z0-9._-]` is removed.
pub fn secure_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let joined = base.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    cleaned.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Stored name of one upload and the names derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadName {
    stored: String,
}

impl UploadName {
    /// `YYYYmmdd_HHMMSS_<sanitized name>`
    pub fn new(original: &str, received_at: NaiveDateTime) -> Self {
        let safe = match secure_filename(original) {
            s if s.is_empty() => "upload.xlsx".to_string(),
            s => s,
        };
        Self {
            stored: format!("{}_{}", received_at.format("%Y%m%d_%H%M%S"), safe),
        }
    }

    pub fn stored_name(&self) -> &str {
        &self.stored
    }

    /// Stored name without its extension
    pub fn stem(&self) -> &str {
        match self.stored.rsplit_once('.') {
            Some((stem, _)) => stem,
            None => &self.stored,
        }
    }

    /// Recap workbooks are always written as .xlsx
    pub fn recap_file_name(&self) -> String {
        format!("hasil_rekap_{}.xlsx", self.stem())
    }

    /// Separators inside the id are kept as `_` so `001/HRD` and `002/HRD`
    /// stay distinct. Ids that still collide are told apart by the caller.
    pub fn letter_file_name(&self, employee_id: &str, extension: &str) -> String {
        let flattened = employee_id.replace(['/', '\\'], "_");
        let id = match secure_filename(&flattened) {
            s if s.is_empty() => "tanpa_id".to_string(),
            s => s,
        };
        format!("surat_panggilan_{}_{}.{}", id, self.stem(), extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn allowed() -> Vec<String> {
        vec!["xlsx".to_string(), "xls".to_string()]
    }

    fn received() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 14)
            .unwrap()
            .and_hms_opt(9, 3, 7)
            .unwrap()
    }

    #[test]
    fn test_rejects_wrong_extension_with_user_message() {
        let err = validate_upload(Path::new("absen.csv"), &allowed()).unwrap_err();
        assert_eq!(err.to_string(), "File harus .xlsx atau .xls");

        let err = validate_upload(Path::new("absen"), &allowed()).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedExtension { .. }));
    }

    #[test]
    fn test_rejects_missing_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("absen.xlsx");
        assert_eq!(
            validate_upload(&missing, &allowed()),
            Err(UploadError::NotFound(missing.clone()))
        );

        std::fs::File::create(&missing).unwrap();
        assert_eq!(
            validate_upload(&missing, &allowed()),
            Err(UploadError::Empty(missing.clone()))
        );
    }

    #[test]
    fn test_accepts_uppercase_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ABSEN.XLSX");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"PK").unwrap();
        assert_eq!(validate_upload(&path, &allowed()), Ok(()));
    }

    #[test]
    fn test_secure_filename() {
        assert_eq!(secure_filename("My Absen Juni.xlsx"), "My_Absen_Juni.xlsx");
        assert_eq!(secure_filename("../../etc/passwd"), "passwd");
        assert_eq!(secure_filename("C:\\data\\rekap (1).xls"), "rekap_1.xls");
        assert_eq!(secure_filename(".hidden"), "hidden");
        assert_eq!(secure_filename("äöü"), "");
    }

    #[test]
    fn test_upload_name_derivations() {
        let name = UploadName::new("Absen Juni.xls", received());
        assert_eq!(name.stored_name(), "20250614_090307_Absen_Juni.xls");
        assert_eq!(name.stem(), "20250614_090307_Absen_Juni");
        assert_eq!(
            name.recap_file_name(),
            "hasil_rekap_20250614_090307_Absen_Juni.xlsx"
        );
        assert_eq!(
            name.letter_file_name("1024", "txt"),
            "surat_panggilan_1024_20250614_090307_Absen_Juni.txt"
        );
    }

    #[test]
    fn test_upload_name_falls_back_when_nothing_survives() {
        let name = UploadName::new("???", received());
        assert_eq!(name.stored_name(), "20250614_090307_upload.xlsx");
        assert_eq!(
            name.letter_file_name("/", "txt"),
            "surat_panggilan_tanpa_id_20250614_090307_upload.txt"
        );
    }

    #[test]
    fn test_letter_name_keeps_id_path_parts() {
        let name = UploadName::new("absen.xlsx", received());
        assert_eq!(
            name.letter_file_name("001/HRD", "txt"),
            "surat_panggilan_001_HRD_20250614_090307_absen.txt"
        );
        assert_eq!(
            name.letter_file_name("002\\HRD", "txt"),
            "surat_panggilan_002_HRD_20250614_090307_absen.txt"
        );
    }
}
