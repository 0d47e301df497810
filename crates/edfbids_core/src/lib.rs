//! Core engine for reorganizing per-patient neurophysiology recordings
//! into a standardized dataset layout.
//! This crate is the single source of truth for session classification,
//! output naming and metadata consistency invariants.

pub mod layout;
pub mod logging;
pub mod metadata;
pub mod model;
pub mod pipeline;
pub mod resolve;

pub use layout::apply::{apply, ExecutionReport, LayoutError, OverwritePolicy};
pub use layout::paths::DatasetPaths;
pub use layout::plan::{plan_tree, CopyOp, LayoutPlan, PlanError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use metadata::{MetadataError, MetadataResult};
pub use model::age::{AgeParseError, AgeToken};
pub use model::recording::{FileDescriptor, FileKind, PipelineWarning, RecordingUnit};
pub use model::session::{DatasetIdentity, SessionAssignment, SessionRole};
pub use pipeline::{run, OutcomeStatus, PatientOutcome, PipelineError, RunOptions};
pub use resolve::classify::{classify, ClassifyError};
pub use resolve::pairing::pair_descriptors;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
