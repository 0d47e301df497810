//! Target directory layout planning and materialization.
//!
//! # Responsibility
//! - Hold the naming grammar for the standardized output tree in one place.
//! - Plan every directory and copy operation without I/O, then apply the
//!   plan with explicit partial-failure and overwrite policies.
//!
//! # Invariants
//! - `DatasetPaths` is the only source of output path names; the metadata
//!   stage uses the same value, so emitted manifests always agree with the
//!   directories actually created.
//! - Planning is pure; all filesystem effects live in `apply`.

pub mod apply;
pub mod paths;
pub mod plan;
