//! Pure layout planning.
//!
//! # Responsibility
//! - Enumerate every directory and file-copy operation for one patient
//!   dataset without touching the filesystem.
//!
//! # Invariants
//! - Planning never performs I/O; `apply` is the only effectful step.
//! - Every unit must have a matching session assignment; a gap is a
//!   programming error surfaced as `PlanError`, never a silent skip.

use crate::layout::paths::DatasetPaths;
use crate::model::recording::RecordingUnit;
use crate::model::session::SessionAssignment;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type PlanResult<T> = Result<T, PlanError>;

/// Planning error for one patient dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// A recording unit's age has no session assignment.
    UnassignedAge { age_raw: String },
}

impl Display for PlanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnassignedAge { age_raw } => {
                write!(f, "no session assignment for age `{age_raw}`")
            }
        }
    }
}

impl Error for PlanError {}

/// One planned file copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOp {
    pub source: PathBuf,
    pub target: PathBuf,
    /// Required copies (signal files) fail the patient when they cannot be
    /// completed; optional copies (annotations) degrade to warnings.
    pub required: bool,
}

/// Complete set of directories and copies for one patient dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub dataset_root: PathBuf,
    pub dirs: Vec<PathBuf>,
    pub copies: Vec<CopyOp>,
}

/// Plans the full output tree for one patient.
///
/// # Contract
/// - Pure function of its inputs; repeated calls yield identical plans.
/// - Directory order is parents-before-children so `apply` can create them
///   sequentially.
pub fn plan_tree(
    paths: &DatasetPaths,
    units: &[RecordingUnit],
    assignments: &[SessionAssignment],
) -> PlanResult<LayoutPlan> {
    let mut dirs = vec![
        paths.dataset_root().to_path_buf(),
        paths.derivatives_dir(),
        paths.derivative_placeholder_dir(),
        paths.subject_dir(),
    ];
    let mut copies = Vec::new();

    for unit in units {
        let assignment = assignments
            .iter()
            .find(|assignment| assignment.age.raw == unit.age.raw)
            .ok_or_else(|| PlanError::UnassignedAge {
                age_raw: unit.age.raw.clone(),
            })?;
        let session = assignment.session_name.as_str();

        dirs.push(paths.session_dir(session));
        dirs.push(paths.eeg_dir(session));
        dirs.push(paths.anat_dir(session));
        dirs.push(paths.phenotype_dir(session));

        copies.push(CopyOp {
            source: unit.signal_path.clone(),
            target: paths.recording_file(session, &unit.age.raw, &unit.signal_path),
            required: true,
        });
        if let Some(annotation) = &unit.annotation_path {
            copies.push(CopyOp {
                source: annotation.clone(),
                target: paths.recording_file(session, &unit.age.raw, annotation),
                required: false,
            });
        }
    }

    Ok(LayoutPlan {
        dataset_root: paths.dataset_root().to_path_buf(),
        dirs,
        copies,
    })
}

#[cfg(test)]
mod tests {
    use super::{plan_tree, PlanError};
    use crate::layout::paths::DatasetPaths;
    use crate::model::age::AgeToken;
    use crate::model::recording::RecordingUnit;
    use crate::model::session::{DatasetIdentity, SessionAssignment, SessionRole};
    use std::path::{Path, PathBuf};

    fn unit(age_raw: &str, with_annotation: bool) -> RecordingUnit {
        RecordingUnit {
            patient_id: "4ZHY".to_string(),
            age: AgeToken::parse(age_raw).expect("valid age in test"),
            signal_path: PathBuf::from(format!("/in/4ZHY_{age_raw}.edf")),
            annotation_path: with_annotation
                .then(|| PathBuf::from(format!("/in/4ZHY_{age_raw}.xml"))),
        }
    }

    fn assignment(age_raw: &str, role: SessionRole) -> SessionAssignment {
        SessionAssignment::new(AgeToken::parse(age_raw).expect("valid age in test"), role)
    }

    #[test]
    fn plan_enumerates_session_dirs_and_copies() {
        let identity = DatasetIdentity::derive("4ZHY");
        let paths = DatasetPaths::new(Path::new("/out"), &identity);
        let units = vec![unit("18", true)];
        let assignments = vec![assignment("18", SessionRole::Baseline)];

        let plan = plan_tree(&paths, &units, &assignments).expect("plan should succeed");

        assert!(plan
            .dirs
            .contains(&PathBuf::from("/out/PRV-4ZHY/primary/sub-PRV-4ZHY/ses-baseline-18/eeg")));
        assert!(plan
            .dirs
            .contains(&PathBuf::from("/out/PRV-4ZHY/primary/sub-PRV-4ZHY/ses-baseline-18/anat")));
        assert_eq!(plan.copies.len(), 2);
        assert!(plan.copies[0].required);
        assert!(!plan.copies[1].required);
        assert!(plan.copies[1]
            .target
            .ends_with("eeg/sub-PRV-4ZHY-18.xml"));
    }

    #[test]
    fn plan_without_annotation_copies_signal_only() {
        let identity = DatasetIdentity::derive("4ZHY");
        let paths = DatasetPaths::new(Path::new("/out"), &identity);
        let units = vec![unit("15", false)];
        let assignments = vec![assignment("15", SessionRole::Baseline)];

        let plan = plan_tree(&paths, &units, &assignments).expect("plan should succeed");
        assert_eq!(plan.copies.len(), 1);
        assert!(plan.copies[0].required);
    }

    #[test]
    fn unassigned_age_is_a_plan_error() {
        let identity = DatasetIdentity::derive("4ZHY");
        let paths = DatasetPaths::new(Path::new("/out"), &identity);
        let units = vec![unit("15", false)];

        let err = plan_tree(&paths, &units, &[]).expect_err("gap must be an error");
        assert_eq!(
            err,
            PlanError::UnassignedAge {
                age_raw: "15".to_string()
            }
        );
    }

    #[test]
    fn plan_is_deterministic() {
        let identity = DatasetIdentity::derive("4ZHY");
        let paths = DatasetPaths::new(Path::new("/out"), &identity);
        let units = vec![unit("24", true), unit("18", true)];
        let assignments = vec![
            assignment("24", SessionRole::Followup),
            assignment("18", SessionRole::Baseline),
        ];

        let first = plan_tree(&paths, &units, &assignments).expect("plan should succeed");
        let second = plan_tree(&paths, &units, &assignments).expect("plan should succeed");
        assert_eq!(first, second);
    }
}
