//! Resolution of raw file listings into classified sessions.
//!
//! # Responsibility
//! - Pair discovered signal/annotation files into recording units per age.
//! - Decide the baseline/followup role for every observed age.
//!
//! # Invariants
//! - Pairing never aborts a patient for one bad file; problems degrade to
//!   warnings.
//! - Classification produces exactly one baseline for a non-empty unit set.

pub mod classify;
pub mod pairing;
