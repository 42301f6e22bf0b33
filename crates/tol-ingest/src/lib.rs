//! Territory data ingestion.
//!
//! Turns an uploaded table with unknown column naming into a canonical record
//! set that the lookup engine can query.
//!
//! # Features
//!
//! - **Parsing**: Delimited text through Polars, workbooks through calamine,
//!   chosen by file extension
//! - **Header Normalization**: Substring matching of "Sales Level 6" and "SDR"
//!   headers onto canonical fields
//! - **Projection**: Required-field validation with passthrough of other columns
//! - **Pipeline**: Upload state machine that owns the active record set
//!
//! # Example
//!
//! ```ignore
//! use tol_ingest::{IngestionPipeline, WorkbookParser};
//!
//! let bytes = std::fs::read("owners.csv")?;
//! let mut pipeline = IngestionPipeline::new(WorkbookParser);
//! let outcome = pipeline.ingest(Some("owners.csv"), Ok(&bytes));
//!
//! pipeline.set_query("west");
//! for result in pipeline.results() {
//!     println!("{} -> {}", result.territory_key, result.owner_name);
//! }
//! ```

mod error;
mod header;
mod parser;
mod pipeline;
mod projector;

// === Error Types ===
pub use error::{IngestError, Result};

// === Header Normalization ===
pub use header::{HeaderMatch, OWNER_HEADER_PATTERN, TERRITORY_HEADER_PATTERN, normalize_header};

// === Projection ===
pub use projector::{ProjectionReport, ProjectionStats, project_records, project_rows};

// === Parsing ===
pub use parser::{
    MAX_PAYLOAD_SIZE, PayloadKind, TabularParser,
    WorkbookParser, any_to_cell, check_payload_size, data_to_cell, dataframe_rows, decode_text,
    parse_payload, range_rows, read_delimited, read_spreadsheet,
};

// === Pipeline ===
pub use pipeline::{IngestionPipeline, PipelineState, UploadTicket};
