use std::fmt;
use std::sync::Arc;

use crate::error::UploadError;

/// Context about an upload attempt.
#[derive(Debug, Clone, Default)]
pub struct UploadContext {
    /// Name of the uploaded file, when exactly one file was supplied.
    pub file_name: Option<String>,
}

/// Minimal stats reported on successful ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadStats {
    /// Number of ingested records.
    pub rows: usize,
}

/// Observer interface for upload outcomes.
///
/// Implementors can record metrics or logs. Each upload attempt produces
/// exactly one callback: `on_success` or `on_failure`, never both.
pub trait UploadObserver: Send + Sync {
    /// Called when ingestion succeeds.
    fn on_success(&self, _ctx: &UploadContext, _stats: UploadStats) {}

    /// Called when ingestion fails with a classified error.
    fn on_failure(&self, _ctx: &UploadContext, _error: &UploadError) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn UploadObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn UploadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl UploadObserver for CompositeObserver {
    fn on_success(&self, ctx: &UploadContext, stats: UploadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &UploadContext, error: &UploadError) {
        for o in &self.observers {
            o.on_failure(ctx, error);
        }
    }
}

/// Logs upload events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl UploadObserver for StdErrObserver {
    fn on_success(&self, ctx: &UploadContext, stats: UploadStats) {
        eprintln!(
            "[upload][ok] file={} rows={}",
            ctx.file_name.as_deref().unwrap_or("<none>"),
            stats.rows
        );
    }

    fn on_failure(&self, ctx: &UploadContext, error: &UploadError) {
        eprintln!(
            "[upload][{:?}] file={} err={} details={}",
            error.kind,
            ctx.file_name.as_deref().unwrap_or("<none>"),
            error.message,
            error.details.as_deref().unwrap_or("-")
        );
    }
}
