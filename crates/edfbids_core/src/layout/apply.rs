//! Layout plan execution against the filesystem.
//!
//! # Responsibility
//! - Create planned directories and copy recording files with bounded
//!   retries on transient failures.
//! - Enforce the re-run policy for pre-existing dataset roots.
//!
//! # Invariants
//! - Directory creation is create-if-absent and safe against concurrent
//!   patients sharing ancestor paths.
//! - One file's copy failure never aborts the remaining copies; required
//!   failures are collected and fail the patient afterwards.
//! - On fatal errors the partial tree is left in place for inspection.

use crate::layout::plan::LayoutPlan;
use crate::model::recording::PipelineWarning;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const COPY_ATTEMPTS: u32 = 3;
const COPY_RETRY_BACKOFF: Duration = Duration::from_millis(25);

pub type LayoutResult<T> = Result<T, LayoutError>;

/// Re-run policy for a dataset root that already has content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Fail the patient instead of writing into a non-empty dataset root.
    Refuse,
    /// Overwrite deterministically named targets in place.
    Overwrite,
}

/// Fatal layout execution error for one patient.
#[derive(Debug)]
pub enum LayoutError {
    /// The dataset root already has content and overwrite was not forced.
    DatasetRootExists(PathBuf),
    /// A planned directory could not be created.
    DirectoryCreate { path: PathBuf, source: std::io::Error },
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatasetRootExists(path) => write!(
                f,
                "dataset root `{}` already has content; re-run with overwrite forced",
                path.display()
            ),
            Self::DirectoryCreate { path, source } => write!(
                f,
                "failed to create directory `{}`: {source}",
                path.display()
            ),
        }
    }
}

impl Error for LayoutError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DatasetRootExists(_) => None,
            Self::DirectoryCreate { source, .. } => Some(source),
        }
    }
}

/// One failed required copy, reported against the patient outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFailure {
    pub source: PathBuf,
    pub target: PathBuf,
    pub detail: String,
}

impl Display for CopyFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to copy `{}` to `{}`: {}",
            self.source.display(),
            self.target.display(),
            self.detail
        )
    }
}

/// Outcome of applying one layout plan.
#[derive(Debug, Default)]
pub struct ExecutionReport {
    pub created_dirs: usize,
    pub copied_files: usize,
    /// Failed signal copies; any entry fails the patient.
    pub required_failures: Vec<CopyFailure>,
    /// Failed annotation copies, degraded to warnings.
    pub warnings: Vec<PipelineWarning>,
}

/// Applies a layout plan to the filesystem.
///
/// # Contract
/// - With `OverwritePolicy::Refuse`, a non-empty pre-existing dataset root
///   aborts before any write.
/// - Directory creation failures are fatal; copy failures are collected
///   and the remaining copies still run.
pub fn apply(plan: &LayoutPlan, policy: OverwritePolicy) -> LayoutResult<ExecutionReport> {
    if policy == OverwritePolicy::Refuse && dir_has_content(&plan.dataset_root) {
        return Err(LayoutError::DatasetRootExists(plan.dataset_root.clone()));
    }

    let mut report = ExecutionReport::default();

    for dir in &plan.dirs {
        // Count only directories this run actually created, so overwrite
        // re-runs report the work done, not the plan size.
        let existed = dir.is_dir();
        fs::create_dir_all(dir).map_err(|source| LayoutError::DirectoryCreate {
            path: dir.clone(),
            source,
        })?;
        if !existed {
            report.created_dirs += 1;
        }
    }

    for copy in &plan.copies {
        match copy_with_retry(&copy.source, &copy.target) {
            Ok(()) => report.copied_files += 1,
            Err(err) => {
                let detail = err.to_string();
                log::error!(
                    "event=copy_failed module=layout status=error required={} source={} target={} detail={detail}",
                    copy.required,
                    copy.source.display(),
                    copy.target.display()
                );
                if copy.required {
                    report.required_failures.push(CopyFailure {
                        source: copy.source.clone(),
                        target: copy.target.clone(),
                        detail,
                    });
                } else {
                    report.warnings.push(PipelineWarning::AnnotationCopyFailed {
                        source: copy.source.clone(),
                        detail,
                    });
                }
            }
        }
    }

    Ok(report)
}

fn copy_with_retry(source: &Path, target: &Path) -> std::io::Result<()> {
    let mut attempt = 1;
    loop {
        match fs::copy(source, target) {
            Ok(_) => return Ok(()),
            Err(err) if attempt < COPY_ATTEMPTS && is_transient(&err) => {
                log::warn!(
                    "event=copy_retry module=layout status=retrying attempt={attempt} source={} detail={err}",
                    source.display()
                );
                std::thread::sleep(COPY_RETRY_BACKOFF);
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

fn is_transient(err: &std::io::Error) -> bool {
    use std::io::ErrorKind;
    // Missing sources and permission problems will not heal on retry.
    !matches!(
        err.kind(),
        ErrorKind::NotFound | ErrorKind::PermissionDenied | ErrorKind::InvalidInput
    )
}

fn dir_has_content(path: &Path) -> bool {
    match fs::read_dir(path) {
        Ok(mut entries) => entries.next().is_some(),
        Err(_) => false,
    }
}
