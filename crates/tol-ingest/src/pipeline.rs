//! Upload state machine owning the active record set.
//!
//! ```text
//! Idle ──select──▶ Parsing ──complete──▶ Loaded | Failed
//!  ▲                  ▲                     │
//!  └──────reset───────┴──────select─────────┘
//! ```
//!
//! Selecting a file and completing it are separate calls: the gap between
//! them is where the caller reads the file. Completion always replaces the
//! current state, even if another upload was selected or a reset happened in
//! between. There is no cancellation.

use tol_lookup::LookupIndex;
use tol_model::{CanonicalRecordSet, IngestFailure, IngestionOutcome, QueryResult};

use crate::error::Result;
use crate::parser::{
    MAX_PAYLOAD_SIZE, PayloadKind, TabularParser, check_payload_size, parse_payload,
};
use crate::projector::{ProjectionStats, project_rows};

/// Observable pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Parsing,
    Loaded,
    Failed,
}

/// Handle for an upload between selection and completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    file_name: String,
    kind: PayloadKind,
    attempt: u64,
}

impl UploadTicket {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn kind(&self) -> PayloadKind {
        self.kind
    }
}

/// Drives uploads through parsing and projection and answers queries.
///
/// The pipeline is the single owner of the record set. Queries run against
/// the most recently completed successful ingestion; while a new upload is
/// parsing, the previous records stay queryable.
#[derive(Debug)]
pub struct IngestionPipeline<P> {
    parser: P,
    max_payload_size: u64,
    state: PipelineState,
    selected_file: Option<String>,
    records: CanonicalRecordSet,
    failure: Option<IngestFailure>,
    stats: Option<ProjectionStats>,
    query: String,
    attempts: u64,
}

impl<P: TabularParser> IngestionPipeline<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            max_payload_size: MAX_PAYLOAD_SIZE,
            state: PipelineState::Idle,
            selected_file: None,
            records: CanonicalRecordSet::default(),
            failure: None,
            stats: None,
            query: String::new(),
            attempts: 0,
        }
    }

    /// Sets the payload size limit in bytes.
    #[must_use]
    pub fn with_max_payload_size(mut self, max_payload_size: u64) -> Self {
        self.max_payload_size = max_payload_size;
        self
    }

    pub fn max_payload_size(&self) -> u64 {
        self.max_payload_size
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Name of the file behind the current state, if any.
    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    pub fn records(&self) -> &CanonicalRecordSet {
        &self.records
    }

    /// Failure of the last completed attempt while in [`PipelineState::Failed`].
    pub fn failure(&self) -> Option<&IngestFailure> {
        self.failure.as_ref()
    }

    /// Projection statistics of the last completed attempt that parsed.
    pub fn stats(&self) -> Option<&ProjectionStats> {
        self.stats.as_ref()
    }

    /// Starts an upload.
    ///
    /// Fails without touching the state when no file is given or the parser
    /// is not ready yet.
    pub fn select_file(
        &mut self,
        file_name: Option<&str>,
    ) -> std::result::Result<UploadTicket, IngestFailure> {
        let Some(file_name) = file_name else {
            tracing::info!("upload triggered without a file");
            return Err(IngestFailure::NoFileSelected);
        };
        if !self.parser.is_ready() {
            tracing::warn!(file = file_name, "parser not ready, upload rejected");
            return Err(IngestFailure::ParserNotReady);
        }

        self.attempts += 1;
        let kind = PayloadKind::from_file_name(file_name);
        self.state = PipelineState::Parsing;
        self.selected_file = Some(file_name.to_string());
        tracing::debug!(
            file = file_name,
            kind = %kind,
            attempt = self.attempts,
            "upload selected"
        );
        Ok(UploadTicket {
            file_name: file_name.to_string(),
            kind,
            attempt: self.attempts,
        })
    }

    /// Finishes an upload once its payload (or read error) is available.
    pub fn complete(&mut self, ticket: UploadTicket, payload: Result<&[u8]>) -> IngestionOutcome {
        let span = tracing::info_span!("ingest", file = %ticket.file_name, kind = %ticket.kind);
        let _guard = span.enter();

        if ticket.attempt != self.attempts {
            tracing::debug!(
                attempt = ticket.attempt,
                latest = self.attempts,
                "completing an earlier upload, it replaces the current state"
            );
        }

        let parsed = payload.and_then(|bytes| {
            check_payload_size(bytes.len() as u64, self.max_payload_size)?;
            parse_payload(&self.parser, ticket.kind, bytes)
        });

        self.selected_file = Some(ticket.file_name);
        let rows = match parsed {
            Ok(rows) => rows,
            Err(error) => {
                tracing::warn!(%error, "parse failed");
                self.stats = None;
                return self.fail(IngestFailure::parse(error.to_string()));
            }
        };

        let report = project_rows(&rows);
        self.stats = Some(report.stats);
        if report.records.is_empty() {
            tracing::warn!(rows = rows.len(), "no rows with both a territory key and an owner");
            return self.fail(IngestFailure::NoValidRows);
        }

        tracing::info!(records = report.records.len(), "upload loaded");
        self.records = report.records;
        self.failure = None;
        self.state = PipelineState::Loaded;
        IngestionOutcome::success(self.records.clone())
    }

    /// Selects and completes an upload in one step.
    pub fn ingest(&mut self, file_name: Option<&str>, payload: Result<&[u8]>) -> IngestionOutcome {
        match self.select_file(file_name) {
            Ok(ticket) => self.complete(ticket, payload),
            Err(failure) => IngestionOutcome::failure(failure),
        }
    }

    /// Returns to [`PipelineState::Idle`], clearing records, query and file.
    pub fn reset(&mut self) {
        tracing::debug!("pipeline reset");
        self.state = PipelineState::Idle;
        self.selected_file = None;
        self.records = CanonicalRecordSet::default();
        self.failure = None;
        self.stats = None;
        self.query.clear();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the active query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Results for the active query against the current records.
    pub fn results(&self) -> Vec<QueryResult> {
        self.index().query(&self.query)
    }

    /// Read-only view over the current records.
    pub fn index(&self) -> LookupIndex<'_> {
        LookupIndex::new(&self.records)
    }

    fn fail(&mut self, failure: IngestFailure) -> IngestionOutcome {
        self.records = CanonicalRecordSet::default();
        self.failure = Some(failure.clone());
        self.state = PipelineState::Failed;
        IngestionOutcome::failure(failure)
    }
}
