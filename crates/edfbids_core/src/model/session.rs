//! Dataset identity and session role assignment.
//!
//! # Responsibility
//! - Derive the dataset/subject naming for one patient in a single place.
//! - Represent the baseline/followup decision for each observed age.
//!
//! # Invariants
//! - `DatasetIdentity::derive` is the only source of dataset and subject
//!   names; layout and metadata consume the same value, never re-derive.
//! - `session_name` is a pure function of role and age token.

use crate::model::age::AgeToken;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Naming identity for one patient's dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetIdentity {
    /// Patient identifier as supplied by the roster, e.g. `4ZHY`.
    pub patient_id: String,
    /// Dataset root directory name, `PRV-<patient_id>`.
    pub dataset_name: String,
    /// BIDS subject label, `sub-<dataset_name>`.
    pub subject_id: String,
}

impl DatasetIdentity {
    /// Derives the dataset naming for a patient.
    ///
    /// # Contract
    /// - Called exactly once per patient run; downstream stages receive the
    ///   resulting value and must not recompute any of its fields.
    pub fn derive(patient_id: &str) -> Self {
        let dataset_name = format!("PRV-{patient_id}");
        let subject_id = format!("sub-{dataset_name}");
        Self {
            patient_id: patient_id.to_string(),
            dataset_name,
            subject_id,
        }
    }
}

/// Classification of one session relative to the patient's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionRole {
    /// Session at the patient's earliest captured age.
    Baseline,
    /// Any session other than baseline.
    Followup,
}

impl Display for SessionRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Baseline => write!(f, "baseline"),
            Self::Followup => write!(f, "followup"),
        }
    }
}

/// Immutable role decision for one observed age.
///
/// Computed once by the classifier and consumed by both the layout builder
/// and the metadata emitter, so directory names and manifest rows can never
/// disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionAssignment {
    /// Age marker this assignment covers.
    pub age: AgeToken,
    /// Baseline or followup.
    pub role: SessionRole,
    /// Session directory name, `ses-<role>-<age.raw>`.
    pub session_name: String,
}

impl SessionAssignment {
    /// Builds the assignment for one age, deriving the session name.
    pub fn new(age: AgeToken, role: SessionRole) -> Self {
        let session_name = format!("ses-{role}-{}", age.raw);
        Self {
            age,
            role,
            session_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DatasetIdentity, SessionAssignment, SessionRole};
    use crate::model::age::AgeToken;

    #[test]
    fn identity_derivation_is_prefix_stable() {
        let identity = DatasetIdentity::derive("4ZHY");
        assert_eq!(identity.dataset_name, "PRV-4ZHY");
        assert_eq!(identity.subject_id, "sub-PRV-4ZHY");
    }

    #[test]
    fn session_name_uses_role_and_raw_age() {
        let age = AgeToken::parse("24A").expect("valid token");
        let assignment = SessionAssignment::new(age, SessionRole::Followup);
        assert_eq!(assignment.session_name, "ses-followup-24A");

        let age = AgeToken::parse("18").expect("valid token");
        let assignment = SessionAssignment::new(age, SessionRole::Baseline);
        assert_eq!(assignment.session_name, "ses-baseline-18");
    }
}
