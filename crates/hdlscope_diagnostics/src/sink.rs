//! Finding accumulator used by the extractor and the lint engine.

use crate::finding::Finding;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// An append-only accumulator of findings.
///
/// Findings keep their emission order, which is source order within a
/// check and catalog order across rules. The sink is `Sync` so a host can
/// share one across threads, but the core never relies on that.
pub struct FindingSink {
    findings: Mutex<Vec<Finding>>,
    error_count: AtomicUsize,
}

impl FindingSink {
    /// Creates a new empty sink.
    pub fn new() -> Self {
        Self {
            findings: Mutex::new(Vec::new()),
            error_count: AtomicUsize::new(0),
        }
    }

    /// Publishes a finding into the sink.
    pub fn emit(&self, finding: Finding) {
        if finding.severity == Severity::Error {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        self.lock().push(finding);
    }

    /// Returns `true` if any error-severity findings have been emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count.load(Ordering::Relaxed) > 0
    }

    /// Returns the number of error-severity findings emitted so far.
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Returns the number of findings currently held.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if the sink holds no findings.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes all accumulated findings, leaving the sink empty.
    pub fn take_all(&self) -> Vec<Finding> {
        std::mem::take(&mut *self.lock())
    }

    /// Returns a snapshot of all accumulated findings without draining.
    pub fn findings(&self) -> Vec<Finding> {
        self.lock().clone()
    }

    // A panic while holding the lock cannot leave the Vec half-written.
    fn lock(&self) -> MutexGuard<'_, Vec<Finding>> {
        self.findings.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for FindingSink {
    fn default() -> Self {
        Self::new()
    }
}
