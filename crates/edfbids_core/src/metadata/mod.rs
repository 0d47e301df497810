//! Descriptor and manifest emission.
//!
//! # Responsibility
//! - Render every required metadata file as a deterministic byte string.
//! - Place rendered metadata next to the data via the shared path grammar.
//!
//! # Invariants
//! - Rendering is pure: identical inputs yield byte-identical output.
//! - Unknown acquisition values are the literal string `"n/a"`, never null
//!   and never omitted.
//! - Any metadata write failure is fatal for the patient; downstream
//!   consumers expect complete metadata.

pub mod render;
pub mod write;

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type MetadataResult<T> = Result<T, MetadataError>;

/// Metadata emission error.
#[derive(Debug)]
pub enum MetadataError {
    /// A descriptor could not be serialized.
    Serialize(serde_json::Error),
    /// A rendered descriptor could not be written to its target path.
    Write { path: PathBuf, source: std::io::Error },
}

impl Display for MetadataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize descriptor: {err}"),
            Self::Write { path, source } => write!(
                f,
                "failed to write metadata file `{}`: {source}",
                path.display()
            ),
        }
    }
}

impl Error for MetadataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Write { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for MetadataError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}
