//! Test reporter that writes outcomes to the tracing log.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::ports::outbound::TestReporter;

/// Counts of reported outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub registered: usize,
    pub passed: usize,
    pub failed: usize,
}

#[derive(Debug, Default)]
pub struct TracingReporter {
    registered: AtomicUsize,
    passed: AtomicUsize,
    failed: AtomicUsize,
}

impl TracingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            registered: self.registered.load(Ordering::Relaxed),
            passed: self.passed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

impl TestReporter for TracingReporter {
    fn register(&self, name: &str) {
        self.registered.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(test = %name, "Registered test");
    }

    fn pass(&self, name: &str) {
        self.passed.fetch_add(1, Ordering::Relaxed);
        tracing::info!(test = %name, "PASS");
    }

    fn fail(&self, name: &str, error: &str) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        tracing::error!(test = %name, error = %error, "FAIL");
    }
}
