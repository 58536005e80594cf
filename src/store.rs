//! Editable in-memory store for the current [`Batch`].
//!
//! The store is the only mutation path for parsed records: a cell-level
//! [`RecordStore::update_field`] that replaces exactly one position and
//! notifies an observer with the full updated batch, plus wholesale
//! [`RecordStore::replace_batch`] when a new file is ingested.
//!
//! Edits take `&mut self`, so exclusive access is enforced by the borrow
//! checker; interleaved edits cannot violate the replace-one-preserve-rest
//! guarantee.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::types::{Batch, PatientRecord, RecordField};

/// Error type for invalid store mutations.
///
/// A failed mutation leaves the batch completely unmodified and invokes no
/// observer callback.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The row index does not address an existing record.
    #[error("row index {row} out of range (batch has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },

    /// The field name is not one of the recognized record fields.
    #[error("unrecognized field name '{name}'")]
    UnknownField { name: String },
}

/// Observer for batch edits.
///
/// Invoked synchronously with the complete updated batch, exactly once per
/// successful [`RecordStore::update_field`] call.
pub trait BatchObserver: Send + Sync {
    /// Called after a field edit has been applied.
    fn on_batch_updated(&self, batch: &Batch);
}

/// Holds the current batch and applies field-level edits.
pub struct RecordStore {
    batch: Batch,
    observer: Option<Arc<dyn BatchObserver>>,
}

impl fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("rows", &self.batch.row_count())
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl RecordStore {
    /// Create a store holding `batch`, with no observer.
    pub fn new(batch: Batch) -> Self {
        Self {
            batch,
            observer: None,
        }
    }

    /// Create a store holding `batch` that notifies `observer` after every
    /// successful edit.
    pub fn with_observer(batch: Batch, observer: Arc<dyn BatchObserver>) -> Self {
        Self {
            batch,
            observer: Some(observer),
        }
    }

    /// The current batch.
    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    /// Read-only snapshot of the current batch for staging (cheap: clones
    /// the record pointers, not the records).
    pub fn snapshot(&self) -> Batch {
        self.batch.clone()
    }

    /// Replace the named field of the record at `row` with `value`.
    ///
    /// The record at `row` is replaced by a new allocation with only that
    /// field changed; all of its other fields, including extras, are
    /// preserved, and every other position keeps its existing record
    /// (pointer-equal). On success the observer, if any, receives the full
    /// updated batch.
    pub fn update_field(
        &mut self,
        row: usize,
        field: RecordField,
        value: impl Into<String>,
    ) -> Result<(), StoreError> {
        let updated = match self.batch.get(row) {
            Some(current) => {
                let mut record = PatientRecord::clone(current);
                record.set(field, value);
                record
            }
            None => {
                return Err(StoreError::RowOutOfRange {
                    row,
                    len: self.batch.row_count(),
                });
            }
        };

        self.batch.set_record(row, Arc::new(updated));
        if let Some(obs) = self.observer.as_ref() {
            obs.on_batch_updated(&self.batch);
        }
        Ok(())
    }

    /// [`Self::update_field`] with a string field name (record-key spelling,
    /// e.g. `"email"`). Unrecognized names are rejected without mutation.
    pub fn update_field_by_name(
        &mut self,
        row: usize,
        field: &str,
        value: impl Into<String>,
    ) -> Result<(), StoreError> {
        let field = RecordField::from_key(field).ok_or_else(|| StoreError::UnknownField {
            name: field.to_string(),
        })?;
        self.update_field(row, field, value)
    }

    /// Discard the current batch and hold `batch` instead.
    ///
    /// No observer callback is implied; the caller decides whether a
    /// replacement warrants notification.
    pub fn replace_batch(&mut self, batch: Batch) {
        self.batch = batch;
    }
}
