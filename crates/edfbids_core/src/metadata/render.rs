//! Pure descriptor rendering.
//!
//! # Responsibility
//! - Produce the exact byte content of every metadata file from identity
//!   and session assignments alone.
//!
//! # Invariants
//! - No filesystem access; every function is a pure render.
//! - `sessions.tsv` rows are sorted ascending by numeric age (raw token as
//!   secondary key), independent of discovery order.
//! - Acquisition parameters that are not extracted at this stage are the
//!   literal string `"n/a"`; the key set is fixed.

use crate::metadata::MetadataResult;
use crate::model::session::{DatasetIdentity, SessionAssignment};
use serde::Serialize;

/// Site constant: recordings come from 50 Hz mains territory.
const POWER_LINE_FREQUENCY_HZ: u32 = 50;
const NOT_AVAILABLE: &str = "n/a";

#[derive(Debug, Serialize)]
struct DatasetDescription<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "BIDSVersion")]
    bids_version: &'static str,
    #[serde(rename = "DatasetType")]
    dataset_type: &'static str,
    #[serde(rename = "Authors")]
    authors: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct ColumnDescription {
    #[serde(rename = "Description")]
    description: &'static str,
}

#[derive(Debug, Serialize)]
struct ParticipantsSchema {
    participant_id: ColumnDescription,
    age: ColumnDescription,
    sex: ColumnDescription,
}

#[derive(Debug, Serialize)]
struct VisitDescription<'a> {
    session_id: &'a str,
    age_at_visit: u32,
    visit_type: String,
    description: String,
}

#[derive(Debug, Serialize)]
struct EegSidecar {
    #[serde(rename = "TaskName")]
    task_name: &'static str,
    #[serde(rename = "SamplingFrequency")]
    sampling_frequency: &'static str,
    #[serde(rename = "PowerLineFrequency")]
    power_line_frequency: u32,
    #[serde(rename = "SoftwareFilters")]
    software_filters: &'static str,
    #[serde(rename = "RecordingDuration")]
    recording_duration: &'static str,
    #[serde(rename = "RecordingType")]
    recording_type: &'static str,
    #[serde(rename = "EEGReference")]
    eeg_reference: &'static str,
    #[serde(rename = "EEGGround")]
    eeg_ground: &'static str,
    #[serde(rename = "EEGChannelCount")]
    eeg_channel_count: &'static str,
    #[serde(rename = "InstitutionName")]
    institution_name: &'static str,
    #[serde(rename = "InstitutionAddress")]
    institution_address: &'static str,
    #[serde(rename = "Manufacturer")]
    manufacturer: &'static str,
    #[serde(rename = "ManufacturersModelName")]
    manufacturers_model_name: &'static str,
    #[serde(rename = "SoftwareVersions")]
    software_versions: &'static str,
    #[serde(rename = "SubjectArtefactDescription")]
    subject_artefact_description: &'static str,
    #[serde(rename = "HowManyBadChannels")]
    how_many_bad_channels: &'static str,
}

fn to_json(value: &impl Serialize) -> MetadataResult<String> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Renders `dataset_description.json`.
pub fn render_dataset_description(identity: &DatasetIdentity) -> MetadataResult<String> {
    to_json(&DatasetDescription {
        name: &identity.dataset_name,
        bids_version: "1.8.0",
        dataset_type: "raw",
        authors: vec![NOT_AVAILABLE],
    })
}

/// Renders `participants.json` (column schema).
pub fn render_participants_schema() -> MetadataResult<String> {
    to_json(&ParticipantsSchema {
        participant_id: ColumnDescription {
            description: "Unique participant identifier",
        },
        age: ColumnDescription {
            description: "Age of participant; n/a until demographics are sourced",
        },
        sex: ColumnDescription {
            description: "Sex of participant; n/a until demographics are sourced",
        },
    })
}

/// Renders `participants.tsv` with placeholder demographics.
pub fn render_participants_table(identity: &DatasetIdentity) -> String {
    format!(
        "participant_id\tage\tsex\n{}\t{NOT_AVAILABLE}\t{NOT_AVAILABLE}\n",
        identity.subject_id
    )
}

/// Renders `<subject>_sessions.tsv`, sorted ascending by numeric age.
///
/// Raw token is the secondary sort key so repeated runs over differently
/// ordered discovery results produce identical bytes.
pub fn render_sessions_table(assignments: &[SessionAssignment]) -> String {
    let mut rows: Vec<&SessionAssignment> = assignments.iter().collect();
    rows.sort_by(|a, b| {
        a.age
            .numeric
            .cmp(&b.age.numeric)
            .then_with(|| a.age.raw.cmp(&b.age.raw))
    });

    let mut table = String::from("session_id\tage\n");
    for assignment in rows {
        table.push_str(&assignment.session_name);
        table.push('\t');
        table.push_str(&assignment.age.raw);
        table.push('\n');
    }
    table
}

/// Renders the per-session `phenotype/visit_description.json`.
pub fn render_visit_description(
    identity: &DatasetIdentity,
    assignment: &SessionAssignment,
) -> MetadataResult<String> {
    to_json(&VisitDescription {
        session_id: &assignment.session_name,
        age_at_visit: assignment.age.numeric,
        visit_type: assignment.role.to_string(),
        description: format!(
            "{} visit of {} captured at age {}",
            assignment.role, identity.subject_id, assignment.age.raw
        ),
    })
}

/// Renders the per-recording `*_task-rest_eeg.json` sidecar.
///
/// All acquisition parameters except the power-line constant are `"n/a"`;
/// downstream consumers rely on the keys being present even when
/// unpopulated.
pub fn render_eeg_sidecar() -> MetadataResult<String> {
    to_json(&EegSidecar {
        task_name: "rest",
        sampling_frequency: NOT_AVAILABLE,
        power_line_frequency: POWER_LINE_FREQUENCY_HZ,
        software_filters: NOT_AVAILABLE,
        recording_duration: NOT_AVAILABLE,
        recording_type: NOT_AVAILABLE,
        eeg_reference: NOT_AVAILABLE,
        eeg_ground: NOT_AVAILABLE,
        eeg_channel_count: NOT_AVAILABLE,
        institution_name: NOT_AVAILABLE,
        institution_address: NOT_AVAILABLE,
        manufacturer: NOT_AVAILABLE,
        manufacturers_model_name: NOT_AVAILABLE,
        software_versions: NOT_AVAILABLE,
        subject_artefact_description: NOT_AVAILABLE,
        how_many_bad_channels: NOT_AVAILABLE,
    })
}

/// Renders the per-recording `*_task-rest_channels.tsv` placeholder.
pub fn render_channels_table() -> String {
    format!("name\ttype\tunits\n{NOT_AVAILABLE}\t{NOT_AVAILABLE}\t{NOT_AVAILABLE}\n")
}
