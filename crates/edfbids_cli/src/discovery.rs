//! Input file discovery for one patient.
//!
//! # Responsibility
//! - Walk the unstructured input directory and collect candidate files
//!   belonging to a patient.
//! - Extract the raw age segment from the filename; validation stays in
//!   core so a bad token degrades to a warning there.
//!
//! # Invariants
//! - A candidate matches only when its stem is `<patient_id>_<age>` with a
//!   case-sensitive patient prefix.
//! - `.edf` files are signals, `.xml` files are annotations; extension
//!   matching is case-insensitive, everything else is ignored.
//! - Results are sorted by path so downstream tie-breaks are stable across
//!   runs and platforms.

use edfbids_core::{FileDescriptor, FileKind};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Discovery failure for the input root itself.
#[derive(Debug)]
pub struct DiscoveryError {
    pub root: PathBuf,
    pub source: walkdir::Error,
}

impl Display for DiscoveryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to scan input directory `{}`: {}",
            self.root.display(),
            self.source
        )
    }
}

impl Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Scans the input directory for one patient's candidate files.
///
/// Unreadable entries below the root are skipped with a log warning;
/// a root that cannot be walked at all is an error.
pub fn discover_patient_files(
    input_dir: &Path,
    patient_id: &str,
) -> Result<Vec<FileDescriptor>, DiscoveryError> {
    let prefix = format!("{patient_id}_");
    let mut descriptors = Vec::new();

    for entry in WalkDir::new(input_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if err.path().is_none() || err.path() == Some(input_dir) {
                    return Err(DiscoveryError {
                        root: input_dir.to_path_buf(),
                        source: err,
                    });
                }
                log::warn!(
                    "event=scan_entry_skipped module=discovery status=skipped detail={err}"
                );
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(kind) = kind_from_extension(path) else {
            continue;
        };
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let Some(age_raw) = stem.strip_prefix(&prefix) else {
            continue;
        };
        if age_raw.is_empty() {
            continue;
        }

        descriptors.push(FileDescriptor {
            path: path.to_path_buf(),
            kind,
            age_raw: age_raw.to_string(),
        });
    }

    log::info!(
        "event=discovery_done module=discovery status=ok patient={patient_id} candidates={}",
        descriptors.len()
    );
    Ok(descriptors)
}

fn kind_from_extension(path: &Path) -> Option<FileKind> {
    let ext = path.extension()?.to_str()?;
    if ext.eq_ignore_ascii_case("edf") {
        Some(FileKind::Signal)
    } else if ext.eq_ignore_ascii_case("xml") {
        Some(FileKind::Annotation)
    } else {
        None
    }
}
