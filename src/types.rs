//! Core data model types for patient-record ingestion.
//!
//! The pipeline ingests a patient-contact CSV into an in-memory [`Batch`] of
//! [`PatientRecord`]s. The record schema is open: five recognized fields
//! (see [`RecordField`]) plus verbatim pass-through of any other source
//! columns.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One of the five recognized patient-record fields.
///
/// Each field knows its CSV header spelling (exact, case-sensitive) and its
/// record-key name used for programmatic lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    /// EHR identifier.
    EhrId,
    /// Patient full name.
    PatientName,
    /// Contact email.
    Email,
    /// Contact phone.
    Phone,
    /// Referring provider name.
    ReferringProvider,
}

impl RecordField {
    /// All recognized fields, in required-column definition order.
    pub const ALL: [RecordField; 5] = [
        RecordField::EhrId,
        RecordField::PatientName,
        RecordField::Email,
        RecordField::Phone,
        RecordField::ReferringProvider,
    ];

    /// The exact CSV header name for this field.
    pub fn header_name(self) -> &'static str {
        match self {
            RecordField::EhrId => "EHR ID",
            RecordField::PatientName => "Patient Name",
            RecordField::Email => "Email",
            RecordField::Phone => "Phone",
            RecordField::ReferringProvider => "Referring Provider",
        }
    }

    /// The record-key name for this field (used by
    /// [`crate::store::RecordStore::update_field_by_name`]).
    pub fn key(self) -> &'static str {
        match self {
            RecordField::EhrId => "ehr_id",
            RecordField::PatientName => "patient_name",
            RecordField::Email => "email",
            RecordField::Phone => "phone",
            RecordField::ReferringProvider => "referring_provider",
        }
    }

    /// Resolve a CSV header name to a recognized field. Exact match only.
    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.header_name() == header)
    }

    /// Resolve a record-key name to a recognized field. Exact match only.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// One structured patient contact entry.
///
/// The five recognized fields always exist (empty-string default when the
/// source cell is absent or empty); unrecognized source columns are carried
/// in [`extras`](Self::extras) unchanged.
///
/// Serialization uses the camelCase key spelling expected by the CRM sync
/// payload (`ehrId`, `patientName`, ...), with extras flattened alongside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    /// EHR identifier.
    pub ehr_id: String,
    /// Patient full name.
    pub patient_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Referring provider name.
    pub referring_provider: String,
    /// Unrecognized source columns, keyed by their original header name.
    #[serde(flatten)]
    pub extras: BTreeMap<String, String>,
}

impl PatientRecord {
    /// Read one recognized field.
    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::EhrId => &self.ehr_id,
            RecordField::PatientName => &self.patient_name,
            RecordField::Email => &self.email,
            RecordField::Phone => &self.phone,
            RecordField::ReferringProvider => &self.referring_provider,
        }
    }

    /// Overwrite one recognized field.
    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        let value = value.into();
        match field {
            RecordField::EhrId => self.ehr_id = value,
            RecordField::PatientName => self.patient_name = value,
            RecordField::Email => self.email = value,
            RecordField::Phone => self.phone = value,
            RecordField::ReferringProvider => self.referring_provider = value,
        }
    }

    /// Look up a pass-through column value by its original header name.
    pub fn extra(&self, column: &str) -> Option<&str> {
        self.extras.get(column).map(String::as_str)
    }
}

/// Ordered sequence of records produced by one successful ingestion.
///
/// Records are stored behind [`Arc`] so that a single-cell edit replaces one
/// position while every other position keeps its existing allocation
/// (pointer-equal before and after the edit).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    records: Vec<Arc<PatientRecord>>,
}

impl Batch {
    /// Create a batch from owned records, preserving order.
    pub fn new(records: Vec<PatientRecord>) -> Self {
        Self {
            records: records.into_iter().map(Arc::new).collect(),
        }
    }

    /// Number of records in the batch.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Whether the batch holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record at `row`, if in range.
    pub fn get(&self, row: usize) -> Option<&Arc<PatientRecord>> {
        self.records.get(row)
    }

    /// All records in source order.
    pub fn records(&self) -> &[Arc<PatientRecord>] {
        &self.records
    }

    /// Iterate records in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<PatientRecord>> {
        self.records.iter()
    }

    // Only the record store mutates a batch; everything else sees it as an
    // immutable sequence.
    pub(crate) fn set_record(&mut self, row: usize, record: Arc<PatientRecord>) {
        self.records[row] = record;
    }
}

impl FromIterator<PatientRecord> for Batch {
    fn from_iter<T: IntoIterator<Item = PatientRecord>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
