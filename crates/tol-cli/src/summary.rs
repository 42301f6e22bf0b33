//! Rendering of ingestion outcomes and query results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use tol_ingest::ProjectionStats;
use tol_model::{IngestFailure, IngestionOutcome, QueryResult};

use crate::settings::OutputFormat;

/// User-facing message category, one per failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    NoFile,
    NotReady,
    Unreadable,
    NoData,
}

impl FailureCategory {
    pub fn of(failure: &IngestFailure) -> Self {
        match failure {
            IngestFailure::NoFileSelected => Self::NoFile,
            IngestFailure::ParserNotReady => Self::NotReady,
            IngestFailure::ParseError { .. } => Self::Unreadable,
            IngestFailure::NoValidRows => Self::NoData,
        }
    }
}

/// Human-readable message for a failed upload.
pub fn failure_message(failure: &IngestFailure) -> String {
    match failure {
        IngestFailure::NoFileSelected => "No file selected.".to_string(),
        IngestFailure::ParserNotReady => {
            "The file parser is not ready yet. Try the upload again in a moment.".to_string()
        }
        IngestFailure::ParseError { message } => {
            format!("Could not read the file: {message}")
        }
        IngestFailure::NoValidRows => "No usable rows found. The file needs a column whose \
             header contains \"Sales Level 6\" and one whose header contains \"SDR\"."
            .to_string(),
    }
}

/// Message shown instead of results while the query is empty.
pub const EMPTY_QUERY_PROMPT: &str = "Type part of a territory to search.";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutcomeReport<'a> {
    file: &'a str,
    status: &'static str,
    record_count: usize,
    distinct_territories: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a ProjectionStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<FailureReport<'a>>,
}

#[derive(Serialize)]
struct FailureReport<'a> {
    category: FailureCategory,
    #[serde(flatten)]
    reason: &'a IngestFailure,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryReport<'a> {
    query: &'a str,
    count: usize,
    results: &'a [QueryResult],
}

/// Renders the outcome of an upload.
pub fn render_outcome(
    file: &str,
    outcome: &IngestionOutcome,
    distinct_territories: usize,
    stats: Option<&ProjectionStats>,
    passthrough_fields: &[&str],
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Json => {
            let report = OutcomeReport {
                file,
                status: if outcome.is_success() {
                    "loaded"
                } else {
                    "failed"
                },
                record_count: outcome.record_count(),
                distinct_territories,
                stats,
                failure: outcome.failure_reason().map(|reason| FailureReport {
                    category: FailureCategory::of(reason),
                    reason,
                }),
            };
            to_json(&report)
        }
        OutputFormat::Table => {
            if let Some(reason) = outcome.failure_reason() {
                return format!("{file}: {}", failure_message(reason));
            }
            let mut table = Table::new();
            apply_table_style(&mut table);
            table.set_header(vec![header_cell("File"), header_cell(file)]);
            table.add_row(vec![
                Cell::new("Records"),
                Cell::new(outcome.record_count()),
            ]);
            table.add_row(vec![
                Cell::new("Territories"),
                Cell::new(distinct_territories),
            ]);
            if let Some(stats) = stats {
                table.add_row(vec![Cell::new("Rows read"), Cell::new(stats.rows_seen)]);
                table.add_row(vec![
                    Cell::new("Rows dropped"),
                    Cell::new(stats.rows_dropped),
                ]);
                table.add_row(vec![
                    Cell::new("Territory column"),
                    Cell::new(join_or_dash(stats.territory_headers.iter().map(String::as_str))),
                ]);
                table.add_row(vec![
                    Cell::new("Owner column"),
                    Cell::new(join_or_dash(stats.owner_headers.iter().map(String::as_str))),
                ]);
            }
            table.add_row(vec![
                Cell::new("Other columns"),
                Cell::new(join_or_dash(passthrough_fields.iter().copied())),
            ]);
            align_column(&mut table, 1, CellAlignment::Left);
            table.to_string()
        }
    }
}

/// Renders the results of one query.
pub fn render_results(query: &str, results: &[QueryResult], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(&QueryReport {
            query,
            count: results.len(),
            results,
        }),
        OutputFormat::Table => {
            if query.is_empty() {
                return EMPTY_QUERY_PROMPT.to_string();
            }
            if results.is_empty() {
                return format!("No territories match \"{query}\".");
            }
            let mut table = Table::new();
            apply_table_style(&mut table);
            table.set_header(vec![header_cell("Territory"), header_cell("SDR")]);
            for result in results {
                table.add_row(vec![
                    Cell::new(&result.territory_key),
                    Cell::new(&result.owner_name),
                ]);
            }
            table.to_string()
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|error| {
        tracing::error!(%error, "failed to serialize output");
        String::from("{}")
    })
}

fn join_or_dash<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let joined = values.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_failure_has_a_category() {
        assert_eq!(
            FailureCategory::of(&IngestFailure::NoFileSelected),
            FailureCategory::NoFile
        );
        assert_eq!(
            FailureCategory::of(&IngestFailure::ParserNotReady),
            FailureCategory::NotReady
        );
        assert_eq!(
            FailureCategory::of(&IngestFailure::parse("bad")),
            FailureCategory::Unreadable
        );
        assert_eq!(
            FailureCategory::of(&IngestFailure::NoValidRows),
            FailureCategory::NoData
        );
    }

    #[test]
    fn test_empty_query_prompts() {
        assert_eq!(render_results("", &[], OutputFormat::Table), EMPTY_QUERY_PROMPT);
    }

    #[test]
    fn test_no_match_message() {
        assert_eq!(
            render_results("zzz", &[], OutputFormat::Table),
            "No territories match \"zzz\"."
        );
    }

    #[test]
    fn test_table_lists_results() {
        let rendered = render_results(
            "west",
            &[QueryResult::new("West-1", "Alice")],
            OutputFormat::Table,
        );
        assert!(rendered.contains("Territory"));
        assert!(rendered.contains("West-1"));
        assert!(rendered.contains("Alice"));
    }

    #[test]
    fn test_failed_outcome_table() {
        let outcome = IngestionOutcome::failure(IngestFailure::NoValidRows);
        let rendered = render_outcome("owners.csv", &outcome, 0, None, &[], OutputFormat::Table);
        assert!(rendered.starts_with("owners.csv: No usable rows found."));
    }
}
