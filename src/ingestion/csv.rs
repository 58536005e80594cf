//! CSV parsing and validation (structure, emptiness, required columns,
//! row mapping).
//!
//! This is the content half of the pipeline; file presence/type checks and
//! the timeout guard live in [`super::upload`].

use crate::error::{UploadError, UploadResult};
use crate::types::{Batch, PatientRecord, RecordField};

/// Parse patient records from an existing CSV reader.
///
/// Rules:
///
/// - The first row is the header row; blank lines are skipped entirely.
/// - Any parser-level error (malformed quoting, ragged rows, invalid UTF-8)
///   classifies as a parse failure carrying the parser's first message.
/// - Zero data rows after parsing is rejected as an empty file.
/// - Headers must be a superset of the five required column names
///   ([`RecordField::ALL`]), compared exactly.
/// - Every data row maps to exactly one record; no row is ever dropped.
pub fn parse_patient_csv<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> UploadResult<Batch> {
    let headers = match rdr.headers() {
        Ok(h) => h.clone(),
        Err(e) => return Err(UploadError::parse_failure(e)),
    };

    let mut rows = Vec::new();
    for result in rdr.records() {
        match result {
            Ok(record) => rows.push(record),
            Err(e) => return Err(UploadError::parse_failure(e)),
        }
    }

    if rows.is_empty() {
        return Err(UploadError::empty_file());
    }

    let missing: Vec<&str> = RecordField::ALL
        .into_iter()
        .map(RecordField::header_name)
        .filter(|required| !headers.iter().any(|h| h == *required))
        .collect();
    if !missing.is_empty() {
        return Err(UploadError::missing_columns(&missing));
    }

    let records = rows
        .iter()
        .map(|row| map_row(&headers, row))
        .collect::<Vec<_>>();
    Ok(Batch::new(records))
}

/// Map one parsed row into a [`PatientRecord`].
///
/// Recognized columns fill the corresponding field (empty string when the
/// cell is absent or empty); every other column passes through into
/// `extras` unchanged.
fn map_row(headers: &csv::StringRecord, row: &csv::StringRecord) -> PatientRecord {
    let mut record = PatientRecord::default();
    for (idx, header) in headers.iter().enumerate() {
        let value = row.get(idx).unwrap_or("");
        match RecordField::from_header(header) {
            Some(field) => record.set(field, value),
            None => {
                record.extras.insert(header.to_string(), value.to_string());
            }
        }
    }
    record
}
