//! Typed errors for the scrape pipeline.
//!
//! Fatal structure errors abort the run; `RowParseError` is a per-row
//! value carried alongside the good records so the batch can continue.

use thiserror::Error;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The summary page did not contain the expected table element.
    #[error("summary table not found (table index {index})")]
    TableMissing { index: usize },

    /// The month/year banner cell did not split into exactly two tokens.
    #[error("cannot split month/year header {header:?} into (month, year)")]
    HeaderFormat { header: String },

    /// The scraped table is too short to hold a banner plus data rows.
    #[error("scraped table has only {rows} rows, need at least 3")]
    TooFewRows { rows: usize },

    /// No single-cell row carrying the banner year was found after the
    /// data window start, so the end of the data cannot be located.
    #[error("no year marker row matching {year:?} found after row {start}")]
    YearMarkerMissing { year: String, start: usize },

    /// HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// CSV sink failure.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Relational sink failure.
    #[error("database error: {0}")]
    Db(#[from] duckdb::Error),

    /// Filesystem failure (output directory, config file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `db_config.json` is not valid JSON for the expected shape.
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// Requested database environment is not configured.
    #[error("unknown database environment {name:?}")]
    UnknownEnvironment { name: String },
}

/// A single row that failed normalization. Recorded and skipped; never
/// aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}: field `{field}`: {message}")]
pub struct RowParseError {
    /// Index of the row within the compact sequence.
    pub row: usize,
    /// Which field failed to parse.
    pub field: &'static str,
    pub message: String,
}
