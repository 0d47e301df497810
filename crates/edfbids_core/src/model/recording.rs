//! Recording descriptors and pipeline warnings.
//!
//! # Responsibility
//! - Describe candidate input files as handed over by discovery.
//! - Represent one session's paired signal/annotation capture.
//! - Enumerate the recoverable conditions a patient run can accumulate.
//!
//! # Invariants
//! - A `RecordingUnit` always has a signal path; units that would lack one
//!   are never constructed.
//! - Warnings are values attached to the patient outcome, never process
//!   aborts.

use crate::model::age::AgeToken;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Role of one candidate file within a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Primary recorded waveform data file.
    Signal,
    /// Companion marker/event file for a signal file.
    Annotation,
}

impl Display for FileKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Signal => write!(f, "signal"),
            Self::Annotation => write!(f, "annotation"),
        }
    }
}

/// One candidate file as supplied by the external discovery collaborator.
///
/// `age_raw` is the unparsed trailing filename segment; validation happens
/// inside the pairing stage so one malformed file never fails the patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Absolute or discovery-relative path to the candidate file.
    pub path: PathBuf,
    /// Whether this file is a signal or annotation capture.
    pub kind: FileKind,
    /// Raw age segment extracted from the filename, not yet validated.
    pub age_raw: String,
}

/// One patient-session's captured data after pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingUnit {
    /// Patient identifier this unit belongs to.
    pub patient_id: String,
    /// Validated age marker for the session.
    pub age: AgeToken,
    /// Primary waveform file. Always present.
    pub signal_path: PathBuf,
    /// Companion annotation file. Missing annotations degrade to a warning.
    pub annotation_path: Option<PathBuf>,
}

/// Recoverable condition recorded against a patient outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineWarning {
    /// A file carried an age segment that failed validation; file skipped.
    InvalidAgeToken { path: PathBuf, raw: String },
    /// A second file claimed an already-taken age+kind slot; first wins.
    DuplicateDescriptor {
        path: PathBuf,
        kind: FileKind,
        age_raw: String,
    },
    /// A signal file had no matching annotation file.
    MissingAnnotation { age_raw: String },
    /// Copying the optional annotation file failed; signal data is intact.
    AnnotationCopyFailed { source: PathBuf, detail: String },
}

impl Display for PipelineWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAgeToken { path, raw } => write!(
                f,
                "skipped `{}`: invalid age token `{raw}`",
                path.display()
            ),
            Self::DuplicateDescriptor { path, kind, age_raw } => write!(
                f,
                "ignored duplicate {kind} file `{}` for age `{age_raw}`",
                path.display()
            ),
            Self::MissingAnnotation { age_raw } => {
                write!(f, "missing XML annotation for age `{age_raw}`")
            }
            Self::AnnotationCopyFailed { source, detail } => write!(
                f,
                "failed to copy annotation `{}`: {detail}",
                source.display()
            ),
        }
    }
}
