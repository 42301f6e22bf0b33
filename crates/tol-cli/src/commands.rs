use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use tol_ingest::{IngestError, IngestionPipeline, WorkbookParser, check_payload_size};
use tol_model::IngestionOutcome;

use crate::logging::redact_value;
use crate::settings::{OutputFormat, Settings};
use crate::summary::{render_outcome, render_results};

/// Pipeline type used by every command.
pub type Pipeline = IngestionPipeline<WorkbookParser>;

/// Build a pipeline configured from `settings`.
pub fn build_pipeline(settings: &Settings) -> Pipeline {
    IngestionPipeline::new(WorkbookParser).with_max_payload_size(settings.ingest.max_file_size)
}

/// Select `path` as the next upload, read it, and complete the upload.
///
/// Read errors and oversize files complete the upload as a parse failure.
pub fn load_file(pipeline: &mut Pipeline, path: &Path) -> IngestionOutcome {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    let ticket = match pipeline.select_file(file_name.as_deref()) {
        Ok(ticket) => ticket,
        Err(failure) => return IngestionOutcome::failure(failure),
    };

    let span = info_span!("load", path = %path.display());
    let _guard = span.enter();
    match read_payload(path, ticket.file_name(), pipeline.max_payload_size()) {
        Ok(bytes) => {
            debug!(bytes = bytes.len(), "file read");
            pipeline.complete(ticket, Ok(&bytes))
        }
        Err(error) => pipeline.complete(ticket, Err(error)),
    }
}

fn read_payload(path: &Path, file_name: &str, max_size: u64) -> tol_ingest::Result<Vec<u8>> {
    let read_error = |error: std::io::Error| IngestError::Read {
        file: file_name.to_string(),
        message: error.to_string(),
    };
    let metadata = fs::metadata(path).map_err(read_error)?;
    check_payload_size(metadata.len(), max_size)?;
    fs::read(path).map_err(read_error)
}

/// Load `file`, run one query, and write the results to `out`.
///
/// Returns whether the file loaded.
pub fn run_lookup<W: Write>(
    settings: &Settings,
    file: &Path,
    query: &str,
    out: &mut W,
) -> Result<bool> {
    let format = settings.output.format;
    let mut pipeline = build_pipeline(settings);
    let outcome = load_file(&mut pipeline, file);
    if !outcome.is_success() {
        write_failure(&pipeline, file, &outcome, format, out)?;
        return Ok(false);
    }

    pipeline.set_query(query);
    let results = pipeline.results();
    info!(
        query = redact_value(query),
        results = results.len(),
        "lookup complete"
    );
    writeln!(out, "{}", render_results(query, &results, format)).context("write results")?;
    Ok(true)
}

/// Load `file` and write what was recognised in it to `out`.
///
/// Returns whether the file loaded.
pub fn run_inspect<W: Write>(settings: &Settings, file: &Path, out: &mut W) -> Result<bool> {
    let mut pipeline = build_pipeline(settings);
    let outcome = load_file(&mut pipeline, file);
    let rendered = render_load(&pipeline, file, &outcome, settings.output.format);
    writeln!(out, "{rendered}").context("write inspection")?;
    Ok(outcome.is_success())
}

fn write_failure<W: Write>(
    pipeline: &Pipeline,
    file: &Path,
    outcome: &IngestionOutcome,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    warn!(file = %file.display(), "file did not load");
    let rendered = render_load(pipeline, file, outcome, format);
    writeln!(out, "{rendered}").context("write failure")
}

/// Render the outcome of loading `file` with what the pipeline now holds.
pub fn render_load(
    pipeline: &Pipeline,
    file: &Path,
    outcome: &IngestionOutcome,
    format: OutputFormat,
) -> String {
    let index = pipeline.index();
    let passthrough = pipeline.records().passthrough_keys();
    render_outcome(
        &display_name(file),
        outcome,
        index.distinct_keys(),
        pipeline.stats(),
        &passthrough,
        format,
    )
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
