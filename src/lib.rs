//! `patient-intake` is a small library for ingesting an uploaded CSV of
//! patient contact records into an in-memory, editable [`types::Batch`], and
//! staging that batch for a downstream CRM synchronization step.
//!
//! The primary entrypoint is [`ingestion::ingest`], which validates the
//! upload (file presence, type, time budget), parses the CSV, validates its
//! shape (non-empty, required columns present), and maps every data row into
//! a [`types::PatientRecord`].
//!
//! ## What ingestion accepts
//!
//! - Exactly one [`ingestion::UploadedFile`], declared `text/csv` or named
//!   `*.csv`.
//! - The first row is the header row; blank lines are skipped.
//! - Headers must include all five required columns:
//!   `EHR ID`, `Patient Name`, `Email`, `Phone`, `Referring Provider`.
//!   Any other columns pass through unchanged as extras (the record schema
//!   is open, not closed).
//!
//! Every failure is classified into an [`UploadError`] with one of three
//! kinds (parse, validation, network/timeout) and a stable message string;
//! no partial batch is ever emitted alongside an error.
//!
//! ## Quick example: ingest, edit, stage
//!
//! ```
//! use patient_intake::ingestion::{ingest, IngestOptions, UploadedFile};
//! use patient_intake::staging::prepare_sync_payload;
//! use patient_intake::store::RecordStore;
//! use patient_intake::types::RecordField;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let csv = "EHR ID,Patient Name,Email,Phone,Referring Provider\n\
//!            001,Jane Doe,jane@x.com,555-1212,Dr. Smith\n";
//! let file = UploadedFile::new("patients.csv", csv.as_bytes());
//!
//! let batch = ingest(&[file], &IngestOptions::default())?;
//! let mut store = RecordStore::new(batch);
//!
//! store.update_field(0, RecordField::Email, "jane@clinic.org")?;
//!
//! let payload = prepare_sync_payload(&store.snapshot())?;
//! assert_eq!(payload[0]["email"], "jane@clinic.org");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: upload validation, CSV parsing, and row mapping
//! - [`types`]: record, field, and batch types
//! - [`store`]: editable record store with change notification
//! - [`staging`]: CRM sync payload snapshot
//! - [`error`]: classified error type used across the pipeline
//!
//! ## Editing model
//!
//! [`store::RecordStore::update_field`] is the only way to modify a parsed
//! record: it replaces exactly one position in the batch with a new record
//! (all other fields preserved) and synchronously notifies a
//! [`store::BatchObserver`] with the full updated batch. Every other
//! position keeps its existing allocation, so unchanged records stay
//! pointer-equal across edits.

pub mod error;
pub mod ingestion;
pub mod staging;
pub mod store;
pub mod types;

pub use error::{UploadError, UploadErrorKind, UploadResult};
