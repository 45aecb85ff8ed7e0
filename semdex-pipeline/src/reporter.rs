//! Diagnostics bridge from compilers and the indexer to `tracing`.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{error, info, warn};

use crate::pipeline::{Diagnostic, Severity};

/// A sink for diagnostics emitted by the toolchain and the indexer.
pub trait Reporter {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Forwards each diagnostic to the `tracing` subscriber at the matching level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        let origin = diagnostic.origin.as_str();
        match diagnostic.severity {
            Severity::Error => error!(target: "semdex::diagnostics", origin, "{}", diagnostic),
            Severity::Warning => warn!(target: "semdex::diagnostics", origin, "{}", diagnostic),
            Severity::Info => info!(target: "semdex::diagnostics", origin, "{}", diagnostic),
        }
    }
}

/// Wraps a reporter and counts the errors passing through it.
pub(crate) struct ErrorCounter<'a> {
    inner: &'a dyn Reporter,
    errors: AtomicUsize,
}

impl<'a> ErrorCounter<'a> {
    pub(crate) fn new(inner: &'a dyn Reporter) -> Self {
        Self {
            inner,
            errors: AtomicUsize::new(0),
        }
    }

    pub(crate) fn errors(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }
}

impl Reporter for ErrorCounter<'_> {
    fn report(&self, diagnostic: &Diagnostic) {
        if diagnostic.severity.is_error() {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.report(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CollectingReporter;

    #[test]
    fn test_error_counter_counts_only_errors() {
        let sink = CollectingReporter::default();
        let counter = ErrorCounter::new(&sink);

        counter.report(&Diagnostic::warning("core", "deprecated"));
        counter.report(&Diagnostic::error("core", "type mismatch"));
        counter.report(&Diagnostic::info("core", "compiling 3 files"));
        counter.report(&Diagnostic::error("core", "not found"));

        assert_eq!(counter.errors(), 2);
        assert_eq!(sink.diagnostics().len(), 4);
    }

    #[test]
    fn test_tracing_reporter_accepts_all_levels() {
        let reporter = TracingReporter;
        reporter.report(&Diagnostic::error("indexer", "boom").at("A.java", 1, None));
        reporter.report(&Diagnostic::warning("indexer", "careful"));
        reporter.report(&Diagnostic::info("indexer", "fine"));
    }
}
