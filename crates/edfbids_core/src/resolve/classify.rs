//! Session classification into baseline and followups.
//!
//! # Responsibility
//! - Pick the single baseline session (lowest numeric age) and label every
//!   other session as followup.
//!
//! # Invariants
//! - Exactly one baseline per non-empty unit set.
//! - Ties on numeric age are broken by input order: first occurrence wins,
//!   and a qualifier-less age never outranks a qualified one.
//! - Pure and deterministic; output order is not part of the contract,
//!   consumers index by age token.

use crate::model::recording::RecordingUnit;
use crate::model::session::{SessionAssignment, SessionRole};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ClassifyResult<T> = Result<T, ClassifyError>;

/// Classification error for a patient's recording set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// No usable signal recordings were found for the patient.
    NoRecordings,
}

impl Display for ClassifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRecordings => write!(f, "no usable recordings found for patient"),
        }
    }
}

impl Error for ClassifyError {}

/// Assigns baseline/followup roles to every recording unit.
///
/// # Contract
/// - Requires a non-empty unit sequence; returns `NoRecordings` otherwise.
/// - The baseline is the unit with the minimum numeric age; on ties the
///   earliest unit in input order wins.
pub fn classify(units: &[RecordingUnit]) -> ClassifyResult<Vec<SessionAssignment>> {
    let baseline_index = units
        .iter()
        .enumerate()
        .min_by_key(|(index, unit)| (unit.age.numeric, *index))
        .map(|(index, _)| index)
        .ok_or(ClassifyError::NoRecordings)?;

    let assignments = units
        .iter()
        .enumerate()
        .map(|(index, unit)| {
            let role = if index == baseline_index {
                SessionRole::Baseline
            } else {
                SessionRole::Followup
            };
            SessionAssignment::new(unit.age.clone(), role)
        })
        .collect();

    Ok(assignments)
}
