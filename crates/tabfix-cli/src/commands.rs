use anyhow::{Result, bail};
use tracing::info;

use tabfix_cli::config::{FileConfig, load_config};
use tabfix_cli::output::{write_diagnostics_json, write_outputs};
use tabfix_cli::pipeline;
use tabfix_cli::types::RunResult;
use tabfix_ingest::discover_files;
use tabfix_model::{ExpectedMonth, FileSelection, RunConfig};

use crate::cli::Cli;

/// Resolves the run configuration: defaults, then the config file, then flags.
pub fn build_run_config(cli: &Cli) -> Result<RunConfig> {
    let file_config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FileConfig::default(),
    };
    let mut config = file_config.into_run_config(cli.mode.map(Into::into))?;
    if let Some(value) = cli.expected_month {
        config.expected_month = ExpectedMonth::from_option_value(value)?;
    }
    let diagnostics = cli.diagnostics || cli.diagnostics_json.is_some();
    Ok(config
        .with_selection(FileSelection::from_names(cli.select.iter().cloned()))
        .with_diagnostics(diagnostics))
}

pub fn run_files(cli: &Cli) -> Result<RunResult> {
    let config = build_run_config(cli)?;
    let discovery = discover_files(&cli.inputs);
    if discovery.is_empty() {
        bail!("no supported input files found");
    }

    let mut result = pipeline::run(&discovery, &config)?;

    if cli.dry_run {
        info!("dry run, skipping output");
    } else if !result.outputs.is_empty() {
        result.written = write_outputs(&result.outputs, &cli.output_dir)?;
    }
    if let Some(path) = &cli.diagnostics_json {
        write_diagnostics_json(&result.files, path)?;
        info!(path = %path.display(), "wrote diagnostics");
    }
    Ok(result)
}
