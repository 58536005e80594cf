//! Upload-level ingestion entrypoint.
//!
//! [`ingest`] wraps [`super::csv::parse_patient_csv`] with the checks that
//! apply before any content is read:
//!
//! - exactly one file must be supplied
//! - the file must be declared `text/csv` or named `*.csv`
//! - parsing must finish within [`IngestOptions::timeout`]
//!
//! Each upload attempt terminates in exactly one outcome: a
//! [`crate::types::Batch`] or an [`UploadError`]. When an observer is
//! configured, that outcome is reported to it once.

use std::fmt;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::error::{UploadError, UploadResult};
use crate::types::Batch;

use super::csv::parse_patient_csv;
use super::observability::{UploadContext, UploadObserver, UploadStats};

/// The declared media type accepted for CSV uploads.
pub const CSV_MEDIA_TYPE: &str = "text/csv";

/// The file extension accepted for CSV uploads. Case-sensitive.
pub const CSV_EXTENSION: &str = ".csv";

/// Default wall-clock budget for parsing one upload.
pub const DEFAULT_PARSE_TIMEOUT: Duration = Duration::from_secs(30);

/// A file-like upload input: a name, an optional declared media type, and
/// the file's bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// File name as supplied by the uploader.
    pub name: String,
    /// Declared media type, if the transport provided one.
    pub media_type: Option<String>,
    /// Raw file contents.
    pub contents: Vec<u8>,
}

impl UploadedFile {
    /// Create an upload with no declared media type.
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            media_type: None,
            contents: contents.into(),
        }
    }

    /// Set the declared media type.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Whether this file passes the CSV type check: declared media type is
    /// [`CSV_MEDIA_TYPE`], or the name ends in [`CSV_EXTENSION`]
    /// (case-sensitive).
    pub fn is_csv(&self) -> bool {
        self.media_type.as_deref() == Some(CSV_MEDIA_TYPE) || self.name.ends_with(CSV_EXTENSION)
    }
}

/// Options controlling upload ingestion.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestOptions {
    /// Wall-clock budget for the parse step.
    pub timeout: Duration,
    /// Optional observer for the attempt's outcome.
    pub observer: Option<Arc<dyn UploadObserver>>,
}

impl fmt::Debug for IngestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestOptions")
            .field("timeout", &self.timeout)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_PARSE_TIMEOUT,
            observer: None,
        }
    }
}

/// Ingest one uploaded CSV file into a [`Batch`].
///
/// `files` is the full set of files the upload surface received; anything
/// other than exactly one CSV file is rejected before content is read.
/// Validation short-circuits in this order: presence, single-file, type,
/// timeout-guarded parse, emptiness, required columns.
///
/// # Examples
///
/// ```
/// use patient_intake::ingestion::{ingest, IngestOptions, UploadedFile};
///
/// let csv = "EHR ID,Patient Name,Email,Phone,Referring Provider\n\
///            001,Jane Doe,jane@x.com,555-1212,Dr. Smith\n";
/// let file = UploadedFile::new("patients.csv", csv.as_bytes());
///
/// let batch = ingest(&[file], &IngestOptions::default()).unwrap();
/// assert_eq!(batch.row_count(), 1);
/// assert_eq!(batch.get(0).unwrap().email, "jane@x.com");
/// ```
pub fn ingest(files: &[UploadedFile], options: &IngestOptions) -> UploadResult<Batch> {
    let ctx = UploadContext {
        file_name: match files {
            [f] => Some(f.name.clone()),
            _ => None,
        },
    };

    let result = ingest_inner(files, options.timeout);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(batch) => obs.on_success(
                &ctx,
                UploadStats {
                    rows: batch.row_count(),
                },
            ),
            Err(e) => obs.on_failure(&ctx, e),
        }
    }

    result
}

fn ingest_inner(files: &[UploadedFile], timeout: Duration) -> UploadResult<Batch> {
    let file = match files {
        [] => return Err(UploadError::no_file_selected()),
        [f] => f,
        _ => return Err(UploadError::multiple_files_selected()),
    };

    if !file.is_csv() {
        return Err(UploadError::invalid_file_type());
    }

    parse_with_timeout(file.contents.clone(), timeout)
}

/// Run the parse on a worker thread and wait at most `timeout` for it.
///
/// The timeout and the parse completion are mutually exclusive terminal
/// events: whichever fires first wins. A parse result arriving after the
/// deadline hits a disconnected channel and is dropped, so it can never
/// surface as a second outcome. The channel is per-attempt; concurrent
/// attempts cannot cancel each other.
fn parse_with_timeout(contents: Vec<u8>, timeout: Duration) -> UploadResult<Batch> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(contents.as_slice());
        let _ = tx.send(parse_patient_csv(&mut rdr));
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => Err(UploadError::request_timeout()),
        Err(RecvTimeoutError::Disconnected) => Err(UploadError::parse_failure(
            "parser worker terminated before producing a result",
        )),
    }
}
