use std::sync::{Arc, Mutex};
use std::time::Duration;

use patient_intake::ingestion::{
    ingest, IngestOptions, UploadContext, UploadObserver, UploadStats, UploadedFile,
};
use patient_intake::{UploadError, UploadErrorKind};

const VALID_CSV: &str = "EHR ID,Patient Name,Email,Phone,Referring Provider\n\
                         001,Jane Doe,jane@x.com,555-1212,Dr. Smith\n";

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<(Option<String>, usize)>>,
    failures: Mutex<Vec<UploadError>>,
}

impl UploadObserver for RecordingObserver {
    fn on_success(&self, ctx: &UploadContext, stats: UploadStats) {
        self.successes
            .lock()
            .unwrap()
            .push((ctx.file_name.clone(), stats.rows));
    }

    fn on_failure(&self, _ctx: &UploadContext, error: &UploadError) {
        self.failures.lock().unwrap().push(error.clone());
    }
}

#[test]
fn ingest_happy_path_emits_one_record_per_data_row() {
    let file = UploadedFile::new("patients.csv", VALID_CSV.as_bytes());
    let batch = ingest(&[file], &IngestOptions::default()).unwrap();

    assert_eq!(batch.row_count(), 1);
    let record = batch.get(0).unwrap();
    assert_eq!(record.ehr_id, "001");
    assert_eq!(record.patient_name, "Jane Doe");
    assert_eq!(record.email, "jane@x.com");
    assert_eq!(record.phone, "555-1212");
    assert_eq!(record.referring_provider, "Dr. Smith");
}

#[test]
fn no_file_is_rejected_before_anything_else() {
    let err = ingest(&[], &IngestOptions::default()).unwrap_err();
    assert_eq!(err.kind, UploadErrorKind::Validation);
    assert_eq!(err.message, "No file selected");
}

#[test]
fn multiple_files_are_rejected_not_truncated() {
    let a = UploadedFile::new("a.csv", VALID_CSV.as_bytes());
    let b = UploadedFile::new("b.csv", VALID_CSV.as_bytes());
    let err = ingest(&[a, b], &IngestOptions::default()).unwrap_err();

    assert_eq!(err.kind, UploadErrorKind::Validation);
    assert_eq!(err.message, "Multiple files selected");
}

#[test]
fn wrong_name_and_type_is_invalid_without_parsing_content() {
    // Contents are valid CSV; the type check must fire first anyway.
    let file = UploadedFile::new("patients.txt", VALID_CSV.as_bytes())
        .with_media_type("text/plain");
    let err = ingest(&[file], &IngestOptions::default()).unwrap_err();

    assert_eq!(err.kind, UploadErrorKind::Validation);
    assert_eq!(err.message, "Invalid file type");
}

#[test]
fn declared_csv_media_type_is_enough_regardless_of_name() {
    let file = UploadedFile::new("export.dat", VALID_CSV.as_bytes())
        .with_media_type("text/csv");
    let batch = ingest(&[file], &IngestOptions::default()).unwrap();
    assert_eq!(batch.row_count(), 1);
}

#[test]
fn csv_extension_check_is_case_sensitive() {
    let file = UploadedFile::new("patients.CSV", VALID_CSV.as_bytes());
    let err = ingest(&[file], &IngestOptions::default()).unwrap_err();
    assert_eq!(err.message, "Invalid file type");
}

#[test]
fn zero_budget_times_out_with_network_kind() {
    // Whatever the parse would have produced is discarded once the
    // deadline has passed; the timeout is the attempt's only outcome.
    // A large input keeps the worker busy well past the zero deadline.
    let mut contents = String::from("EHR ID,Patient Name,Email,Phone,Referring Provider\n");
    for i in 0..100_000 {
        contents.push_str(&format!("{i:03},Jane Doe,jane@x.com,555-1212,Dr. Smith\n"));
    }
    let file = UploadedFile::new("patients.csv", contents.into_bytes());
    let opts = IngestOptions {
        timeout: Duration::ZERO,
        ..Default::default()
    };
    let err = ingest(&[file], &opts).unwrap_err();

    assert_eq!(err.kind, UploadErrorKind::Network);
    assert_eq!(err.message, "Request timeout");
}

#[test]
fn validation_failures_surface_through_ingest_unchanged() {
    let file = UploadedFile::new(
        "patients.csv",
        b"EHR ID,Patient Name\n001,Jane\n".to_vec(),
    );
    let err = ingest(&[file], &IngestOptions::default()).unwrap_err();

    assert_eq!(err.kind, UploadErrorKind::Validation);
    assert_eq!(err.message, "Missing required columns");
    assert_eq!(err.details.as_deref(), Some("Email, Phone, Referring Provider"));
}

#[test]
fn observer_sees_exactly_one_success_with_row_stats() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = IngestOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };

    let file = UploadedFile::new("patients.csv", VALID_CSV.as_bytes());
    let _ = ingest(&[file], &opts).unwrap();

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(successes, vec![(Some("patients.csv".to_string()), 1)]);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_sees_exactly_one_classified_failure() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = IngestOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };

    let _ = ingest(&[], &opts).unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].message, "No file selected");
    assert!(obs.successes.lock().unwrap().is_empty());
}
