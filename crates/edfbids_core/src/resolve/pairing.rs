//! File pairing into per-age recording units.
//!
//! # Responsibility
//! - Group candidate files by validated age token.
//! - Pair at most one signal and one annotation file per age.
//! - Report skipped and duplicate files as warnings, never failures.
//!
//! # Invariants
//! - Every returned unit has a signal path.
//! - First-found file wins an age+kind slot; later claimants become
//!   `DuplicateDescriptor` warnings, never silent drops.
//! - Unit order follows first appearance of each age in the input, which
//!   keeps the classifier's tie-break deterministic.

use crate::model::age::AgeToken;
use crate::model::recording::{FileDescriptor, FileKind, PipelineWarning, RecordingUnit};
use std::path::PathBuf;

struct AgeGroup {
    age: AgeToken,
    signal_path: Option<PathBuf>,
    annotation_path: Option<PathBuf>,
}

/// Pairs candidate files into recording units keyed by age token.
///
/// # Contract
/// - Files with malformed age segments are skipped with a warning.
/// - Groups without a signal file are dropped entirely (not actionable).
/// - Groups without an annotation file are kept and flagged.
/// - An empty result is not an error here; the classifier decides whether
///   zero units fails the patient.
pub fn pair_descriptors(
    patient_id: &str,
    descriptors: &[FileDescriptor],
) -> (Vec<RecordingUnit>, Vec<PipelineWarning>) {
    let mut warnings = Vec::new();
    // Vec keyed by raw age keeps first-appearance order; patients have a
    // handful of sessions, so linear lookup is fine.
    let mut groups: Vec<AgeGroup> = Vec::new();

    for descriptor in descriptors {
        let age = match AgeToken::parse(&descriptor.age_raw) {
            Ok(age) => age,
            Err(err) => {
                log::warn!(
                    "event=age_token_rejected module=pairing status=skipped patient={patient_id} path={} detail={err}",
                    descriptor.path.display()
                );
                warnings.push(PipelineWarning::InvalidAgeToken {
                    path: descriptor.path.clone(),
                    raw: descriptor.age_raw.clone(),
                });
                continue;
            }
        };

        let index = match groups.iter().position(|group| group.age.raw == age.raw) {
            Some(index) => index,
            None => {
                groups.push(AgeGroup {
                    age,
                    signal_path: None,
                    annotation_path: None,
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[index];

        let slot = match descriptor.kind {
            FileKind::Signal => &mut group.signal_path,
            FileKind::Annotation => &mut group.annotation_path,
        };
        if slot.is_some() {
            log::warn!(
                "event=duplicate_descriptor module=pairing status=ignored patient={patient_id} kind={} age={} path={}",
                descriptor.kind,
                descriptor.age_raw,
                descriptor.path.display()
            );
            warnings.push(PipelineWarning::DuplicateDescriptor {
                path: descriptor.path.clone(),
                kind: descriptor.kind,
                age_raw: descriptor.age_raw.clone(),
            });
            continue;
        }
        *slot = Some(descriptor.path.clone());
    }

    let mut units = Vec::new();
    for group in groups {
        let Some(signal_path) = group.signal_path else {
            // Annotation without signal carries no usable data.
            log::warn!(
                "event=orphan_annotation module=pairing status=dropped patient={patient_id} age={}",
                group.age.raw
            );
            continue;
        };
        if group.annotation_path.is_none() {
            warnings.push(PipelineWarning::MissingAnnotation {
                age_raw: group.age.raw.clone(),
            });
        }
        units.push(RecordingUnit {
            patient_id: patient_id.to_string(),
            age: group.age,
            signal_path,
            annotation_path: group.annotation_path,
        });
    }

    (units, warnings)
}

#[cfg(test)]
mod tests {
    use super::pair_descriptors;
    use crate::model::recording::{FileDescriptor, FileKind, PipelineWarning};
    use std::path::PathBuf;

    fn descriptor(path: &str, kind: FileKind, age_raw: &str) -> FileDescriptor {
        FileDescriptor {
            path: PathBuf::from(path),
            kind,
            age_raw: age_raw.to_string(),
        }
    }

    #[test]
    fn pairs_signal_and_annotation_by_age() {
        let files = vec![
            descriptor("in/p_24.edf", FileKind::Signal, "24"),
            descriptor("in/p_24.xml", FileKind::Annotation, "24"),
        ];
        let (units, warnings) = pair_descriptors("p", &files);
        assert_eq!(units.len(), 1);
        assert!(warnings.is_empty());
        assert_eq!(units[0].age.raw, "24");
        assert_eq!(units[0].signal_path, PathBuf::from("in/p_24.edf"));
        assert_eq!(units[0].annotation_path, Some(PathBuf::from("in/p_24.xml")));
    }

    #[test]
    fn missing_annotation_keeps_unit_with_warning() {
        let files = vec![descriptor("in/p_15.edf", FileKind::Signal, "15")];
        let (units, warnings) = pair_descriptors("p", &files);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].annotation_path, None);
        assert_eq!(
            warnings,
            vec![PipelineWarning::MissingAnnotation {
                age_raw: "15".to_string()
            }]
        );
    }

    #[test]
    fn annotation_without_signal_is_dropped() {
        let files = vec![descriptor("in/p_9.xml", FileKind::Annotation, "9")];
        let (units, warnings) = pair_descriptors("p", &files);
        assert!(units.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn invalid_age_token_skips_file_and_keeps_rest() {
        let files = vec![
            descriptor("in/p_24B1.edf", FileKind::Signal, "24B1"),
            descriptor("in/p_18.edf", FileKind::Signal, "18"),
            descriptor("in/p_18.xml", FileKind::Annotation, "18"),
        ];
        let (units, warnings) = pair_descriptors("p", &files);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].age.raw, "18");
        assert!(matches!(
            warnings[0],
            PipelineWarning::InvalidAgeToken { ref raw, .. } if raw == "24B1"
        ));
    }

    #[test]
    fn duplicate_descriptor_first_found_wins() {
        let files = vec![
            descriptor("in/first_24.edf", FileKind::Signal, "24"),
            descriptor("in/second_24.edf", FileKind::Signal, "24"),
            descriptor("in/p_24.xml", FileKind::Annotation, "24"),
        ];
        let (units, warnings) = pair_descriptors("p", &files);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].signal_path, PathBuf::from("in/first_24.edf"));
        assert!(matches!(
            warnings[0],
            PipelineWarning::DuplicateDescriptor { ref path, .. }
                if path == &PathBuf::from("in/second_24.edf")
        ));
    }

    #[test]
    fn unit_order_follows_first_appearance_of_each_age() {
        let files = vec![
            descriptor("in/p_24.edf", FileKind::Signal, "24"),
            descriptor("in/p_18.edf", FileKind::Signal, "18"),
            descriptor("in/p_24A.edf", FileKind::Signal, "24A"),
        ];
        let (units, _) = pair_descriptors("p", &files);
        let ages: Vec<&str> = units.iter().map(|u| u.age.raw.as_str()).collect();
        assert_eq!(ages, vec!["24", "18", "24A"]);
    }
}
