//! Patient roster ingestion.
//!
//! # Responsibility
//! - Read patient identifiers from a plain text roster file, one per line.
//!
//! # Invariants
//! - Blank lines and `#` comments are ignored.
//! - Identifiers must be usable as path segments; separators and
//!   whitespace inside an identifier are rejected.
//! - Duplicates are dropped, preserving first occurrence order.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

pub type RosterResult<T> = Result<T, RosterError>;

/// Roster loading error.
#[derive(Debug)]
pub enum RosterError {
    /// The roster file could not be read.
    Read { path: PathBuf, source: std::io::Error },
    /// A line held an identifier that cannot be a path segment.
    InvalidPatientId { line: usize, id: String },
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read roster `{}`: {source}", path.display())
            }
            Self::InvalidPatientId { line, id } => {
                write!(f, "invalid patient identifier `{id}` on roster line {line}")
            }
        }
    }
}

impl Error for RosterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::InvalidPatientId { .. } => None,
        }
    }
}

/// Loads and validates the patient roster.
pub fn load_roster(path: &Path) -> RosterResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| RosterError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut patients: Vec<String> = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if !is_valid_patient_id(trimmed) {
            return Err(RosterError::InvalidPatientId {
                line: index + 1,
                id: trimmed.to_string(),
            });
        }
        if !patients.iter().any(|existing| existing == trimmed) {
            patients.push(trimmed.to_string());
        }
    }

    Ok(patients)
}

/// Whether an identifier is safe to use as an output path segment.
pub fn is_valid_patient_id(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_whitespace() || c == '\0')
}

#[cfg(test)]
mod tests {
    use super::{is_valid_patient_id, load_roster, RosterError};
    use std::fs;

    #[test]
    fn loads_ids_skipping_comments_and_blanks() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let roster = tmp.path().join("roster.txt");
        fs::write(&roster, "# cohort A\n4ZHY\n\n  9QQA  \n4ZHY\n").expect("write roster");

        let patients = load_roster(&roster).expect("roster should load");
        assert_eq!(patients, vec!["4ZHY".to_string(), "9QQA".to_string()]);
    }

    #[test]
    fn rejects_path_separator_in_id() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let roster = tmp.path().join("roster.txt");
        fs::write(&roster, "ok\nbad/id\n").expect("write roster");

        let err = load_roster(&roster).expect_err("separator must be rejected");
        assert!(matches!(err, RosterError::InvalidPatientId { line: 2, .. }));
    }

    #[test]
    fn missing_roster_is_a_read_error() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let err = load_roster(&tmp.path().join("absent.txt")).expect_err("must fail");
        assert!(matches!(err, RosterError::Read { .. }));
    }

    #[test]
    fn patient_id_validity_rules() {
        assert!(is_valid_patient_id("4ZHY"));
        assert!(is_valid_patient_id("p-01_x"));
        assert!(!is_valid_patient_id(""));
        assert!(!is_valid_patient_id("."));
        assert!(!is_valid_patient_id("a b"));
        assert!(!is_valid_patient_id("a\\b"));
    }
}
