//! Per-patient processing pipeline.
//!
//! # Responsibility
//! - Sequence pairing, classification, layout and metadata emission for one
//!   patient and fold the result into an immutable outcome value.
//!
//! # Invariants
//! - `DatasetIdentity` and the assignment set are computed once and passed
//!   by value into both the layout and metadata stages.
//! - The pipeline never panics or aborts; every failure becomes a
//!   `PatientOutcome` the orchestrator can fold into run totals.
//! - Zero usable units fail the patient before any directory is created.
//! - On fatal errors the partial tree is left in place for inspection.

use crate::layout::apply::{apply, LayoutError, OverwritePolicy};
use crate::layout::paths::DatasetPaths;
use crate::layout::plan::{plan_tree, PlanError};
use crate::metadata::write::write_all;
use crate::metadata::MetadataError;
use crate::model::recording::{FileDescriptor, PipelineWarning};
use crate::model::session::DatasetIdentity;
use crate::resolve::classify::{classify, ClassifyError};
use crate::resolve::pairing::pair_descriptors;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use uuid::Uuid;

/// Options for one patient run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Root directory under which the patient's dataset root is created.
    pub output_root: PathBuf,
    /// Re-run policy for a pre-existing dataset root.
    pub overwrite: OverwritePolicy,
}

/// Final status for one patient run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// All required copies and metadata emitted, no warnings.
    Success,
    /// Processed, but at least one warning occurred.
    Partial,
    /// Nothing usable processed, or a fatal stage error occurred.
    Failed,
}

impl Display for OutcomeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Partial => write!(f, "partial"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Immutable result of one patient run.
///
/// The orchestrator folds these into aggregate totals; there is no shared
/// mutable counter state across patients.
#[derive(Debug)]
pub struct PatientOutcome {
    pub patient_id: String,
    pub status: OutcomeStatus,
    /// Number of recording units that reached the layout stage.
    pub unit_count: usize,
    pub warnings: Vec<PipelineWarning>,
    /// Human-readable fatal error, present exactly when `status` is Failed.
    pub error: Option<String>,
}

/// Fatal pipeline error for one patient.
#[derive(Debug)]
pub enum PipelineError {
    Classify(ClassifyError),
    Plan(PlanError),
    Layout(LayoutError),
    /// One or more required signal file copies failed.
    RequiredCopies(Vec<String>),
    Metadata(MetadataError),
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classify(err) => write!(f, "{err}"),
            Self::Plan(err) => write!(f, "{err}"),
            Self::Layout(err) => write!(f, "{err}"),
            Self::RequiredCopies(failures) => {
                write!(f, "required file copies failed: {}", failures.join("; "))
            }
            Self::Metadata(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Classify(err) => Some(err),
            Self::Plan(err) => Some(err),
            Self::Layout(err) => Some(err),
            Self::RequiredCopies(_) => None,
            Self::Metadata(err) => Some(err),
        }
    }
}

impl From<ClassifyError> for PipelineError {
    fn from(value: ClassifyError) -> Self {
        Self::Classify(value)
    }
}

impl From<PlanError> for PipelineError {
    fn from(value: PlanError) -> Self {
        Self::Plan(value)
    }
}

impl From<LayoutError> for PipelineError {
    fn from(value: LayoutError) -> Self {
        Self::Layout(value)
    }
}

impl From<MetadataError> for PipelineError {
    fn from(value: MetadataError) -> Self {
        Self::Metadata(value)
    }
}

/// Runs the full pipeline for one patient.
///
/// # Sequencing
/// 1. Derive identity (once).
/// 2. Pair descriptors into recording units.
/// 3. Classify sessions; zero units fail fast, before any directory exists.
/// 4. Plan and apply the output tree.
/// 5. Emit metadata using the identical identity/assignment values.
pub fn run(patient_id: &str, descriptors: &[FileDescriptor], options: &RunOptions) -> PatientOutcome {
    let run_id = Uuid::new_v4();
    log::info!(
        "event=patient_start module=pipeline status=ok run_id={run_id} patient={patient_id} candidates={}",
        descriptors.len()
    );

    let mut warnings = Vec::new();
    let (unit_count, result) = process(patient_id, descriptors, options, &mut warnings);

    let outcome = match result {
        Ok(()) => PatientOutcome {
            patient_id: patient_id.to_string(),
            status: if warnings.is_empty() {
                OutcomeStatus::Success
            } else {
                OutcomeStatus::Partial
            },
            unit_count,
            warnings,
            error: None,
        },
        Err(err) => {
            log::error!(
                "event=patient_failed module=pipeline status=error run_id={run_id} patient={patient_id} detail={err}"
            );
            PatientOutcome {
                patient_id: patient_id.to_string(),
                status: OutcomeStatus::Failed,
                unit_count,
                warnings,
                error: Some(err.to_string()),
            }
        }
    };

    log::info!(
        "event=patient_done module=pipeline status={} run_id={run_id} patient={patient_id} units={} warnings={}",
        outcome.status,
        outcome.unit_count,
        outcome.warnings.len()
    );
    outcome
}

fn process(
    patient_id: &str,
    descriptors: &[FileDescriptor],
    options: &RunOptions,
    warnings: &mut Vec<PipelineWarning>,
) -> (usize, Result<(), PipelineError>) {
    let identity = DatasetIdentity::derive(patient_id);

    let (units, pairing_warnings) = pair_descriptors(patient_id, descriptors);
    warnings.extend(pairing_warnings);

    let assignments = match classify(&units) {
        Ok(assignments) => assignments,
        Err(err) => return (0, Err(err.into())),
    };
    let unit_count = units.len();

    let paths = DatasetPaths::new(&options.output_root, &identity);
    let plan = match plan_tree(&paths, &units, &assignments) {
        Ok(plan) => plan,
        Err(err) => return (unit_count, Err(err.into())),
    };

    let report = match apply(&plan, options.overwrite) {
        Ok(report) => report,
        Err(err) => return (unit_count, Err(err.into())),
    };
    warnings.extend(report.warnings);
    log::info!(
        "event=layout_applied module=pipeline status=ok patient={patient_id} dirs={} files={}",
        report.created_dirs,
        report.copied_files
    );
    if !report.required_failures.is_empty() {
        let failures = report
            .required_failures
            .iter()
            .map(|failure| failure.to_string())
            .collect();
        return (unit_count, Err(PipelineError::RequiredCopies(failures)));
    }

    if let Err(err) = write_all(&paths, &identity, &assignments) {
        return (unit_count, Err(err.into()));
    }

    (unit_count, Ok(()))
}
