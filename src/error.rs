use std::fmt;

use thiserror::Error;

/// Convenience result type for upload/ingestion operations.
pub type UploadResult<T> = Result<T, UploadError>;

/// Failure classification for one upload attempt.
///
/// The taxonomy is deliberately flat: every failure path in the pipeline maps
/// to exactly one of these three kinds, and downstream UIs pattern-match on
/// the kind plus the [`UploadError::message`] string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadErrorKind {
    /// The input could not be decoded as valid delimited text
    /// (malformed quoting, ragged rows, encoding failure).
    Parse,
    /// The input was decodable but failed a content/shape precondition
    /// (no file, wrong type, empty, missing required columns).
    Validation,
    /// The operation did not complete within the allowed time budget.
    Network,
}

/// Classified error emitted by the ingestion pipeline.
///
/// At most one `UploadError` is produced per upload attempt; a successful
/// [`crate::types::Batch`] and an `UploadError` are mutually exclusive
/// outcomes. The `message` strings are part of the external contract and are
/// matched verbatim by existing UIs, so they are built only through the
/// constructors below.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct UploadError {
    /// Which of the three failure kinds this is.
    pub kind: UploadErrorKind,
    /// Short human-readable summary (stable, matched verbatim by callers).
    pub message: String,
    /// Optional diagnostic elaboration (parser message, missing column list).
    pub details: Option<String>,
}

impl UploadError {
    fn new(kind: UploadErrorKind, message: &str, details: Option<String>) -> Self {
        Self {
            kind,
            message: message.to_string(),
            details,
        }
    }

    /// The upload contained no file at all.
    pub fn no_file_selected() -> Self {
        Self::new(
            UploadErrorKind::Validation,
            "No file selected",
            Some("Please select a CSV file to upload".to_string()),
        )
    }

    /// The upload contained more than one file. Single-file-only is the
    /// intended contract; extra files are rejected rather than silently
    /// taking the first.
    pub fn multiple_files_selected() -> Self {
        Self::new(
            UploadErrorKind::Validation,
            "Multiple files selected",
            Some("Please upload a single CSV file".to_string()),
        )
    }

    /// The file is neither declared as `text/csv` nor named `*.csv`.
    pub fn invalid_file_type() -> Self {
        Self::new(
            UploadErrorKind::Validation,
            "Invalid file type",
            Some("Please upload a CSV file".to_string()),
        )
    }

    /// Parsing did not finish within the configured time budget.
    pub fn request_timeout() -> Self {
        Self::new(
            UploadErrorKind::Network,
            "Request timeout",
            Some("The file processing took too long. Please try again.".to_string()),
        )
    }

    /// The underlying CSV parser reported an error; `detail` carries its
    /// first reported message.
    pub fn parse_failure(detail: impl fmt::Display) -> Self {
        Self::new(
            UploadErrorKind::Parse,
            "Error parsing the CSV file",
            Some(detail.to_string()),
        )
    }

    /// The file parsed but contained zero data rows.
    pub fn empty_file() -> Self {
        Self::new(
            UploadErrorKind::Validation,
            "Empty CSV file",
            Some("The uploaded file does not contain any data rows".to_string()),
        )
    }

    /// One or more required columns are absent from the header row.
    ///
    /// `missing` must be in required-set definition order; the detail string
    /// joins the names with `", "`.
    pub fn missing_columns(missing: &[&str]) -> Self {
        Self::new(
            UploadErrorKind::Validation,
            "Missing required columns",
            Some(missing.join(", ")),
        )
    }
}
