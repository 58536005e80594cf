//! Staging of the current batch for CRM synchronization.
//!
//! The sync transport itself is out of scope; this module produces the
//! hand-off artifact: a JSON array of records with camelCase keys and
//! pass-through columns flattened in, matching what the upload UI hands to
//! its downstream sync step.

use std::sync::Arc;

use crate::types::{Batch, PatientRecord};

/// Serialize a read-only snapshot of `batch` as the CRM sync payload.
///
/// Records appear in batch order as JSON objects (`ehrId`, `patientName`,
/// `email`, `phone`, `referringProvider`, plus any extras under their
/// original column names).
pub fn prepare_sync_payload(batch: &Batch) -> serde_json::Result<serde_json::Value> {
    let records: Vec<&PatientRecord> = batch.iter().map(Arc::as_ref).collect();
    serde_json::to_value(records)
}

#[cfg(test)]
mod tests {
    use super::prepare_sync_payload;
    use crate::types::{Batch, PatientRecord};

    #[test]
    fn payload_is_an_ordered_array_of_camel_case_objects() {
        let batch = Batch::new(vec![
            PatientRecord {
                ehr_id: "001".to_string(),
                patient_name: "Jane Doe".to_string(),
                email: "jane@x.com".to_string(),
                phone: "555-1212".to_string(),
                referring_provider: "Dr. Smith".to_string(),
                ..Default::default()
            },
            PatientRecord {
                ehr_id: "002".to_string(),
                ..Default::default()
            },
        ]);

        let payload = prepare_sync_payload(&batch).unwrap();
        let rows = payload.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["ehrId"], "001");
        assert_eq!(rows[0]["referringProvider"], "Dr. Smith");
        assert_eq!(rows[1]["ehrId"], "002");
        assert_eq!(rows[1]["email"], "");
    }

    #[test]
    fn extras_are_flattened_into_each_object() {
        let mut record = PatientRecord::default();
        record
            .extras
            .insert("Insurance".to_string(), "Acme Health".to_string());
        let batch = Batch::new(vec![record]);

        let payload = prepare_sync_payload(&batch).unwrap();
        assert_eq!(payload[0]["Insurance"], "Acme Health");
    }
}
