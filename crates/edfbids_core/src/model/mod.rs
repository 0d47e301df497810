//! Domain model for per-patient recording reorganization.
//!
//! # Responsibility
//! - Define the canonical value types shared by pairing, classification,
//!   layout and metadata stages.
//! - Keep identity derivation in one place so no stage recomputes it.
//!
//! # Invariants
//! - Every `RecordingUnit` carries a signal file path.
//! - `DatasetIdentity` is derived exactly once per patient run and passed
//!   by value to every consuming stage.

pub mod age;
pub mod recording;
pub mod session;
