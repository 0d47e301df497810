//! Metadata placement.
//!
//! # Responsibility
//! - Write every rendered descriptor to its target path from the shared
//!   path grammar.
//!
//! # Invariants
//! - Consumes the same `DatasetPaths` and `SessionAssignment` values as the
//!   layout stage; names can never diverge.
//! - The first write failure aborts metadata emission for the patient;
//!   partial metadata is considered invalid downstream.

use crate::layout::paths::DatasetPaths;
use crate::metadata::render;
use crate::metadata::{MetadataError, MetadataResult};
use crate::model::session::{DatasetIdentity, SessionAssignment};
use std::fs;
use std::path::Path;

/// Writes all dataset-, subject- and session-level metadata files.
///
/// Assumes the directory tree already exists (layout `apply` runs first).
pub fn write_all(
    paths: &DatasetPaths,
    identity: &DatasetIdentity,
    assignments: &[SessionAssignment],
) -> MetadataResult<()> {
    write_file(
        &paths.dataset_description(),
        &render::render_dataset_description(identity)?,
    )?;
    write_file(
        &paths.participants_schema(),
        &render::render_participants_schema()?,
    )?;
    write_file(
        &paths.participants_table(),
        &render::render_participants_table(identity),
    )?;
    write_file(
        &paths.sessions_table(),
        &render::render_sessions_table(assignments),
    )?;

    for assignment in assignments {
        let session = assignment.session_name.as_str();
        write_file(
            &paths.visit_description(session),
            &render::render_visit_description(identity, assignment)?,
        )?;
        write_file(
            &paths.eeg_sidecar(session, &assignment.age.raw),
            &render::render_eeg_sidecar()?,
        )?;
        write_file(
            &paths.channels_table(session, &assignment.age.raw),
            &render::render_channels_table(),
        )?;
    }

    Ok(())
}

fn write_file(path: &Path, content: &str) -> MetadataResult<()> {
    fs::write(path, content).map_err(|source| MetadataError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::write_all;
    use crate::layout::paths::DatasetPaths;
    use crate::metadata::MetadataError;
    use crate::model::age::AgeToken;
    use crate::model::session::{DatasetIdentity, SessionAssignment, SessionRole};
    use std::fs;

    fn assignment(age_raw: &str, role: SessionRole) -> SessionAssignment {
        SessionAssignment::new(AgeToken::parse(age_raw).expect("valid age in test"), role)
    }

    #[test]
    fn writes_every_descriptor_for_each_session() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let identity = DatasetIdentity::derive("4ZHY");
        let paths = DatasetPaths::new(tmp.path(), &identity);
        let assignments = vec![
            assignment("18", SessionRole::Baseline),
            assignment("24", SessionRole::Followup),
        ];

        for assignment in &assignments {
            fs::create_dir_all(paths.eeg_dir(&assignment.session_name)).expect("eeg dir");
            fs::create_dir_all(paths.phenotype_dir(&assignment.session_name))
                .expect("phenotype dir");
        }

        write_all(&paths, &identity, &assignments).expect("metadata write should succeed");

        assert!(paths.dataset_description().is_file());
        assert!(paths.participants_schema().is_file());
        assert!(paths.participants_table().is_file());
        assert!(paths.sessions_table().is_file());
        for assignment in &assignments {
            let session = assignment.session_name.as_str();
            assert!(paths.visit_description(session).is_file());
            assert!(paths.eeg_sidecar(session, &assignment.age.raw).is_file());
            assert!(paths.channels_table(session, &assignment.age.raw).is_file());
        }
    }

    #[test]
    fn missing_target_directory_is_a_write_error() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let identity = DatasetIdentity::derive("4ZHY");
        let paths = DatasetPaths::new(tmp.path(), &identity);
        let assignments = vec![assignment("18", SessionRole::Baseline)];

        let err = write_all(&paths, &identity, &assignments)
            .expect_err("write into absent tree must fail");
        assert!(matches!(err, MetadataError::Write { .. }));
    }
}
