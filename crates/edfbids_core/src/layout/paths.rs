//! Output path grammar for one patient dataset.
//!
//! # Responsibility
//! - Derive every output directory and file name from `DatasetIdentity`
//!   and session names.
//!
//! # Invariants
//! - All names are pure functions of `(dataset_name, session_name, age)`;
//!   no hidden state, no filesystem access.
//! - Layout and metadata stages share one `DatasetPaths` value per patient.

use crate::model::session::DatasetIdentity;
use std::path::{Path, PathBuf};

/// Placeholder modality under `derivatives/preprocessed/`, created empty
/// and left pending for the downstream imaging-derivative pipeline.
pub const DERIVATIVE_MODALITY: &str = "eeg";

/// Path grammar for one patient's standardized output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    dataset_name: String,
    subject_id: String,
    dataset_root: PathBuf,
}

impl DatasetPaths {
    /// Binds the grammar to an output root and a derived identity.
    pub fn new(output_root: &Path, identity: &DatasetIdentity) -> Self {
        Self {
            dataset_name: identity.dataset_name.clone(),
            subject_id: identity.subject_id.clone(),
            dataset_root: output_root.join(&identity.dataset_name),
        }
    }

    /// `<root>/PRV-<id>`
    pub fn dataset_root(&self) -> &Path {
        &self.dataset_root
    }

    /// `<root>/PRV-<id>/dataset_description.json`
    pub fn dataset_description(&self) -> PathBuf {
        self.dataset_root.join("dataset_description.json")
    }

    /// `<root>/PRV-<id>/participants.json`
    pub fn participants_schema(&self) -> PathBuf {
        self.dataset_root.join("participants.json")
    }

    /// `<root>/PRV-<id>/participants.tsv`
    pub fn participants_table(&self) -> PathBuf {
        self.dataset_root.join("participants.tsv")
    }

    /// `<root>/PRV-<id>/derivatives/preprocessed`
    pub fn derivatives_dir(&self) -> PathBuf {
        self.dataset_root.join("derivatives").join("preprocessed")
    }

    /// `<root>/PRV-<id>/derivatives/preprocessed/<modality>` (empty, pending)
    pub fn derivative_placeholder_dir(&self) -> PathBuf {
        self.derivatives_dir().join(DERIVATIVE_MODALITY)
    }

    /// `<root>/PRV-<id>/primary/sub-PRV-<id>`
    pub fn subject_dir(&self) -> PathBuf {
        self.dataset_root.join("primary").join(&self.subject_id)
    }

    /// `<root>/PRV-<id>/primary/sub-PRV-<id>/sub-PRV-<id>_sessions.tsv`
    pub fn sessions_table(&self) -> PathBuf {
        self.subject_dir()
            .join(format!("{}_sessions.tsv", self.subject_id))
    }

    /// `<subject_dir>/<session_name>`
    pub fn session_dir(&self, session_name: &str) -> PathBuf {
        self.subject_dir().join(session_name)
    }

    /// `<session_dir>/eeg`
    pub fn eeg_dir(&self, session_name: &str) -> PathBuf {
        self.session_dir(session_name).join("eeg")
    }

    /// `<session_dir>/anat` (left empty)
    pub fn anat_dir(&self, session_name: &str) -> PathBuf {
        self.session_dir(session_name).join("anat")
    }

    /// `<session_dir>/phenotype`
    pub fn phenotype_dir(&self, session_name: &str) -> PathBuf {
        self.session_dir(session_name).join("phenotype")
    }

    /// `<session_dir>/phenotype/visit_description.json`
    pub fn visit_description(&self, session_name: &str) -> PathBuf {
        self.phenotype_dir(session_name).join("visit_description.json")
    }

    /// Renamed recording file: `sub-PRV-<id>-<age>.<ext>`.
    ///
    /// The extension is carried over from the source file; a source without
    /// an extension yields a bare `sub-PRV-<id>-<age>` name.
    pub fn recording_file(&self, session_name: &str, age_raw: &str, source: &Path) -> PathBuf {
        let stem = format!("sub-{}-{age_raw}", self.dataset_name);
        let name = match source.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => format!("{stem}.{ext}"),
            None => stem,
        };
        self.eeg_dir(session_name).join(name)
    }

    /// `sub-PRV-<id>-<age>_task-rest_eeg.json`
    pub fn eeg_sidecar(&self, session_name: &str, age_raw: &str) -> PathBuf {
        self.eeg_dir(session_name).join(format!(
            "sub-{}-{age_raw}_task-rest_eeg.json",
            self.dataset_name
        ))
    }

    /// `sub-PRV-<id>-<age>_task-rest_channels.tsv`
    pub fn channels_table(&self, session_name: &str, age_raw: &str) -> PathBuf {
        self.eeg_dir(session_name).join(format!(
            "sub-{}-{age_raw}_task-rest_channels.tsv",
            self.dataset_name
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::DatasetPaths;
    use crate::model::session::DatasetIdentity;
    use std::path::{Path, PathBuf};

    fn paths() -> DatasetPaths {
        DatasetPaths::new(Path::new("/out"), &DatasetIdentity::derive("4ZHY"))
    }

    #[test]
    fn dataset_level_names_follow_contract() {
        let paths = paths();
        assert_eq!(paths.dataset_root(), Path::new("/out/PRV-4ZHY"));
        assert_eq!(
            paths.sessions_table(),
            PathBuf::from("/out/PRV-4ZHY/primary/sub-PRV-4ZHY/sub-PRV-4ZHY_sessions.tsv")
        );
        assert_eq!(
            paths.derivative_placeholder_dir(),
            PathBuf::from("/out/PRV-4ZHY/derivatives/preprocessed/eeg")
        );
    }

    #[test]
    fn recording_names_keep_source_extension() {
        let paths = paths();
        let target = paths.recording_file(
            "ses-baseline-18",
            "18",
            Path::new("/in/4ZHY_18.edf"),
        );
        assert_eq!(
            target,
            PathBuf::from(
                "/out/PRV-4ZHY/primary/sub-PRV-4ZHY/ses-baseline-18/eeg/sub-PRV-4ZHY-18.edf"
            )
        );
    }

    #[test]
    fn sidecar_names_embed_task_segment() {
        let paths = paths();
        assert!(paths
            .eeg_sidecar("ses-followup-24A", "24A")
            .ends_with("eeg/sub-PRV-4ZHY-24A_task-rest_eeg.json"));
        assert!(paths
            .channels_table("ses-followup-24A", "24A")
            .ends_with("eeg/sub-PRV-4ZHY-24A_task-rest_channels.tsv"));
    }
}
