//! Per-run processing: read, clean and (in alarm mode) merge.

use std::collections::BTreeSet;

use anyhow::{Result, bail};
use tracing::{debug, error, info, info_span};

use tabfix_ingest::{DiscoveredFile, Discovery, RejectedInput, read_grid};
use tabfix_model::{ProcessingMode, RunConfig, Table};
use tabfix_transform::{aggregate, clean_alarm_grid, filter_columns, reconcile};

use crate::types::{CleanedOutput, FileReport, FileStatus, RunResult};

/// Name of the merged alarm output.
pub const ALARM_OUTPUT_NAME: &str = "alarm_combined.csv";

/// Output name for a cleaned device file: `<file name>_out.csv`.
///
/// The full file name is kept so `unit.csv` and `unit.tsv` do not collide.
pub fn device_output_name(file_name: &str) -> String {
    format!("{file_name}_out.csv")
}

/// Processes the selected files.
///
/// A file that fails to read or clean, or an input that was rejected during
/// discovery, is recorded in the result and the run continues with the next
/// one.
///
/// # Errors
///
/// Fails only when no input is left after applying the selection.
pub fn run(discovery: &Discovery, config: &RunConfig) -> Result<RunResult> {
    let span = info_span!("run", mode = %config.mode);
    let _guard = span.enter();

    let selected: Vec<&DiscoveredFile> = discovery
        .files
        .iter()
        .filter(|file| {
            let included = config.selection.includes(&file.name);
            if !included {
                debug!(file = %file.name, "not selected");
            }
            included
        })
        .collect();
    let rejected: Vec<&RejectedInput> = discovery
        .rejected
        .iter()
        .filter(|input| config.selection.includes(&input.name))
        .collect();
    if selected.is_empty() && rejected.is_empty() {
        bail!("no input files selected");
    }
    info!(files = selected.len(), rejected = rejected.len(), "processing");

    let mut result = match config.mode {
        ProcessingMode::Device => run_device(&selected, config),
        ProcessingMode::Alarm => run_alarm(&selected, config)?,
    };
    for input in rejected {
        error!(path = %input.path.display(), error = %input.error, "input rejected");
        result.errors.push(format!("{}: {}", input.name, input.error));
        result.files.push(FileReport {
            name: input.name.clone(),
            path: input.path.clone(),
            status: FileStatus::Failed(input.error.to_string()),
            rows: 0,
            columns: 0,
            date_report: None,
            diagnostics: None,
        });
    }
    result.has_errors = result.files.iter().any(FileReport::failed);
    Ok(result)
}

fn run_device(files: &[&DiscoveredFile], config: &RunConfig) -> RunResult {
    let mut reports = Vec::new();
    let mut outputs = Vec::new();
    let mut errors = Vec::new();
    let mut output_names = BTreeSet::new();

    for file in files {
        let span = info_span!("file", name = %file.name);
        let _guard = span.enter();

        let file_name = device_output_name(&file.name);
        if output_names.contains(&file_name) {
            let message = format!("output {file_name} already produced by another input");
            error!(path = %file.path.display(), "{message}");
            errors.push(format!("{}: {message}", file.name));
            reports.push(failed_report(file, message));
            continue;
        }

        let cleaned = read_grid(&file.path)
            .map_err(anyhow::Error::from)
            .and_then(|grid| Ok(reconcile(&grid, config.device_drop_phrases.as_slice())?))
            .map(|table| filter_columns(table, config.device_excluded_columns.as_slice()));

        match cleaned {
            Ok(table) => {
                info!(rows = table.height(), columns = table.width(), "cleaned");
                reports.push(cleaned_report(file, &table));
                output_names.insert(file_name.clone());
                outputs.push(CleanedOutput { file_name, table });
            }
            Err(err) => {
                error!(error = %err, "file failed");
                errors.push(format!("{}: {err}", file.name));
                reports.push(failed_report(file, err.to_string()));
            }
        }
    }

    RunResult {
        mode: ProcessingMode::Device,
        files: reports,
        outputs,
        written: Vec::new(),
        errors,
        has_errors: false,
    }
}

fn run_alarm(files: &[&DiscoveredFile], config: &RunConfig) -> Result<RunResult> {
    let mut reports = Vec::new();
    let mut tables = Vec::new();
    let mut errors = Vec::new();

    for file in files {
        let span = info_span!("file", name = %file.name);
        let _guard = span.enter();

        let cleaned = read_grid(&file.path)
            .map_err(anyhow::Error::from)
            .and_then(|grid| Ok(clean_alarm_grid(&grid, config)?));

        match cleaned {
            Ok(cleaning) => {
                info!(rows = cleaning.table.height(), "cleaned");
                let mut report = cleaned_report(file, &cleaning.table);
                report.date_report = cleaning.date_report;
                report.diagnostics = cleaning.diagnostics;
                reports.push(report);
                tables.push(cleaning.table);
            }
            Err(err) => {
                error!(error = %err, "file failed");
                errors.push(format!("{}: {err}", file.name));
                reports.push(failed_report(file, err.to_string()));
            }
        }
    }

    let outputs = if tables.is_empty() {
        Vec::new()
    } else {
        let combined = aggregate(tables)?;
        info!(
            rows = combined.height(),
            columns = combined.width(),
            "merged alarm tables"
        );
        vec![CleanedOutput {
            file_name: ALARM_OUTPUT_NAME.to_string(),
            table: combined,
        }]
    };

    Ok(RunResult {
        mode: ProcessingMode::Alarm,
        files: reports,
        outputs,
        written: Vec::new(),
        errors,
        has_errors: false,
    })
}

fn cleaned_report(file: &DiscoveredFile, table: &Table) -> FileReport {
    FileReport {
        name: file.name.clone(),
        path: file.path.clone(),
        status: FileStatus::Cleaned,
        rows: table.height(),
        columns: table.width(),
        date_report: None,
        diagnostics: None,
    }
}

fn failed_report(file: &DiscoveredFile, message: String) -> FileReport {
    FileReport {
        name: file.name.clone(),
        path: file.path.clone(),
        status: FileStatus::Failed(message),
        rows: 0,
        columns: 0,
        date_report: None,
        diagnostics: None,
    }
}
