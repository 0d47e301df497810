//! CLI entry point for the dataset reorganizer.
//!
//! # Responsibility
//! - Parse the command surface, load the roster, and fan independent
//!   patients out over a worker pool.
//! - Fold per-patient outcome values into an aggregate run summary.
//!
//! # Invariants
//! - One patient's failure never terminates processing of the rest.
//! - Patients own disjoint output subtrees, so the pool needs no locking.
//! - Run totals come from folding immutable outcomes, not shared counters.

mod args;
mod discovery;
mod roster;

use args::Cli;
use clap::Parser;
use edfbids_core::{run, OutcomeStatus, OverwritePolicy, PatientOutcome, RunOptions};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Default)]
struct RunSummary {
    success: usize,
    partial: usize,
    failed: usize,
}

impl RunSummary {
    fn fold(mut self, outcome: &PatientOutcome) -> Self {
        match outcome.status {
            OutcomeStatus::Success => self.success += 1,
            OutcomeStatus::Partial => self.partial += 1,
            OutcomeStatus::Failed => self.failed += 1,
        }
        self
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(message) = setup_logging(&cli) {
        eprintln!("error: {message}");
        return ExitCode::from(2);
    }

    let patients = match resolve_patients(&cli) {
        Ok(patients) => patients,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::from(2);
        }
    };

    let options = RunOptions {
        output_root: cli.output_root.clone(),
        overwrite: if cli.force {
            OverwritePolicy::Overwrite
        } else {
            OverwritePolicy::Refuse
        },
    };

    let outcomes = match run_all(&cli, &patients, &options) {
        Ok(outcomes) => outcomes,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::from(2);
        }
    };

    let mut summary = RunSummary::default();
    for outcome in &outcomes {
        report_outcome(outcome);
        summary = summary.fold(outcome);
    }

    println!(
        "done: {} success, {} partial, {} failed ({} patients)",
        summary.success,
        summary.partial,
        summary.failed,
        outcomes.len()
    );
    log::info!(
        "event=run_done module=cli status=ok success={} partial={} failed={}",
        summary.success,
        summary.partial,
        summary.failed
    );

    if summary.failed > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn setup_logging(cli: &Cli) -> Result<(), String> {
    let log_dir = absolutize(&cli.log_dir)?;
    let level = cli
        .log_level
        .as_deref()
        .unwrap_or_else(|| edfbids_core::default_log_level());
    let log_dir = log_dir
        .to_str()
        .ok_or_else(|| format!("log directory `{}` is not valid UTF-8", log_dir.display()))?
        .to_string();
    edfbids_core::init_logging(level, &log_dir)
}

fn absolutize(path: &Path) -> Result<PathBuf, String> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|err| format!("cannot resolve working directory: {err}"))?;
    Ok(cwd.join(path))
}

fn resolve_patients(cli: &Cli) -> Result<Vec<String>, String> {
    let mut patients = match &cli.roster {
        Some(path) => roster::load_roster(path).map_err(|err| err.to_string())?,
        None => Vec::new(),
    };

    for id in &cli.patients {
        if !roster::is_valid_patient_id(id) {
            return Err(format!("invalid patient identifier `{id}`"));
        }
        if !patients.iter().any(|existing| existing == id) {
            patients.push(id.clone());
        }
    }

    if patients.is_empty() {
        return Err("no patients given; use --roster and/or --patient".to_string());
    }
    Ok(patients)
}

fn run_all(
    cli: &Cli,
    patients: &[String],
    options: &RunOptions,
) -> Result<Vec<PatientOutcome>, String> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = cli.jobs {
        builder = builder.num_threads(jobs);
    }
    let pool = builder
        .build()
        .map_err(|err| format!("failed to build worker pool: {err}"))?;

    log::info!(
        "event=run_start module=cli status=ok patients={} input_dir={} output_root={}",
        patients.len(),
        cli.input_dir.display(),
        cli.output_root.display()
    );

    let outcomes = pool.install(|| {
        patients
            .par_iter()
            .map(|patient| process_patient(patient, &cli.input_dir, options))
            .collect()
    });
    Ok(outcomes)
}

fn process_patient(patient_id: &str, input_dir: &Path, options: &RunOptions) -> PatientOutcome {
    match discovery::discover_patient_files(input_dir, patient_id) {
        Ok(descriptors) => run(patient_id, &descriptors, options),
        Err(err) => {
            log::error!(
                "event=discovery_failed module=cli status=error patient={patient_id} detail={err}"
            );
            PatientOutcome {
                patient_id: patient_id.to_string(),
                status: OutcomeStatus::Failed,
                unit_count: 0,
                warnings: Vec::new(),
                error: Some(err.to_string()),
            }
        }
    }
}

fn report_outcome(outcome: &PatientOutcome) {
    println!(
        "{}: {} ({} units, {} warnings)",
        outcome.patient_id,
        outcome.status,
        outcome.unit_count,
        outcome.warnings.len()
    );
    for warning in &outcome.warnings {
        println!("  warning: {warning}");
    }
    if let Some(error) = &outcome.error {
        println!("  error: {error}");
    }
}
