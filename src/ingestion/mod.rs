//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest`] (from [`upload`]) which:
//!
//! - validates file presence and type before touching content
//! - parses and validates the CSV within a wall-clock budget
//! - emits one [`crate::types::Batch`] or one [`crate::UploadError`] per
//!   attempt, optionally reporting the outcome to an [`UploadObserver`]
//!
//! The reader-level parse/validate step is also available directly via
//! [`csv::parse_patient_csv`].

pub mod csv;
pub mod observability;
pub mod upload;

pub use self::csv::parse_patient_csv;
pub use observability::{CompositeObserver, StdErrObserver, UploadContext, UploadObserver, UploadStats};
pub use upload::{
    ingest, IngestOptions, UploadedFile, CSV_EXTENSION, CSV_MEDIA_TYPE, DEFAULT_PARSE_TIMEOUT,
};
