//! Inspection session: serialized passes publishing into a sink

use crate::error::ReportError;
use crate::processor::{PassSummary, ReportProcessor};
use crate::sink::DiagnosticSink;
use crate::source::{FsReader, SourceReader};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Owns a processor and a sink for the lifetime of an editor session.
///
/// Passes never overlap: a second call waits until the running pass has
/// published. A pass that fails publishes nothing and leaves the sink as it
/// was.
pub struct InspectionSession<S, R = FsReader> {
    processor: ReportProcessor<R>,
    sink: S,
    pass: Mutex<()>,
}

impl<S: DiagnosticSink> InspectionSession<S, FsReader> {
    pub fn new(sink: S) -> Self {
        Self::with_processor(ReportProcessor::new(), sink)
    }
}

impl<S: DiagnosticSink, R: SourceReader> InspectionSession<S, R> {
    pub fn with_processor(processor: ReportProcessor<R>, sink: S) -> Self {
        Self {
            processor,
            sink,
            pass: Mutex::new(()),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn processor(&self) -> &ReportProcessor<R> {
        &self.processor
    }

    /// Process report XML and replace everything in the sink with the result
    pub fn publish_report(
        &self,
        xml: &str,
        solution_dir: &Path,
    ) -> Result<PassSummary, ReportError> {
        let _pass = self.lock();
        let processed = self.processor.process_report(xml, solution_dir)?;
        let summary = processed.summary();
        self.sink.replace_all(processed.files);

        tracing::info!(
            files = summary.files,
            diagnostics = summary.diagnostics,
            skipped = summary.skipped_total(),
            "published diagnostics"
        );
        Ok(summary)
    }

    /// Read a report file from disk and publish it
    pub fn publish_report_file(
        &self,
        report: &Path,
        solution_dir: &Path,
    ) -> Result<PassSummary, ReportError> {
        let xml = std::fs::read_to_string(report)?;
        self.publish_report(&xml, solution_dir)
    }

    pub fn clear_file(&self, file: &Path) {
        let _pass = self.lock();
        self.sink.clear_file(file);
    }

    pub fn clear_all(&self) {
        let _pass = self.lock();
        self.sink.clear_all();
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.pass.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SkipReason;
    use crate::sink::MemorySink;
    use crate::source::MemorySources;
    use crate::types::DiagnosticsResult;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn report(file: &str) -> String {
        format!(
            r#"<Report>
  <IssueTypes><IssueType Id="T" Severity="WARNING" /></IssueTypes>
  <Issues><Project Name="P">
    <Issue TypeId="T" File="{file}" Offset="0-3" Line="1" Message="m" />
  </Project></Issues>
</Report>"#
        )
    }

    fn session() -> InspectionSession<MemorySink, MemorySources> {
        let sources = MemorySources::new()
            .with("/sln/A.cs", "abc")
            .with("/sln/B.cs", "abc");
        InspectionSession::with_processor(ReportProcessor::with_reader(sources), MemorySink::new())
    }

    #[test]
    fn test_publish_replaces_previous_pass() {
        let session = session();
        session
            .publish_report(&report("A.cs"), Path::new("/sln"))
            .unwrap();
        session
            .publish_report(&report("B.cs"), Path::new("/sln"))
            .unwrap();

        assert_eq!(session.sink().files(), vec![PathBuf::from("/sln/B.cs")]);
    }

    #[test]
    fn test_failed_pass_publishes_nothing() {
        let session = session();
        session
            .publish_report(&report("A.cs"), Path::new("/sln"))
            .unwrap();

        let err = session
            .publish_report("<Report><Issues/></Report>", Path::new("/sln"))
            .unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(session.sink().files(), vec![PathBuf::from("/sln/A.cs")]);
    }

    #[test]
    fn test_summary_reports_skips() {
        let session = session();
        let summary = session
            .publish_report(&report("Gone.cs"), Path::new("/sln"))
            .unwrap();

        assert_eq!(summary.diagnostics, 0);
        assert_eq!(summary.skipped[&SkipReason::FileNotFound], 1);
        assert!(session.sink().is_empty());
    }

    #[test]
    fn test_clear_operations() {
        let session = session();
        session
            .publish_report(&report("A.cs"), Path::new("/sln"))
            .unwrap();
        session.clear_file(Path::new("/sln/A.cs"));
        assert!(session.sink().is_empty());

        session
            .publish_report(&report("B.cs"), Path::new("/sln"))
            .unwrap();
        session.clear_all();
        assert!(session.sink().is_empty());
    }

    /// Sink that fails the test if two publishes overlap
    #[derive(Default)]
    struct OverlapSink {
        busy: AtomicBool,
        overlaps: AtomicUsize,
        calls: AtomicUsize,
    }

    impl DiagnosticSink for OverlapSink {
        fn replace_all(&self, _results: Vec<DiagnosticsResult>) {
            if self.busy.swap(true, Ordering::SeqCst) {
                self.overlaps.fetch_add(1, Ordering::SeqCst);
            }
            thread::sleep(Duration::from_millis(5));
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.busy.store(false, Ordering::SeqCst);
        }

        fn clear_file(&self, _file: &Path) {}

        fn clear_all(&self) {}
    }

    #[test]
    fn test_concurrent_passes_are_serialized() {
        let sink = Arc::new(OverlapSink::default());
        let sources = MemorySources::new().with("/sln/A.cs", "abc");
        let session = Arc::new(InspectionSession::with_processor(
            ReportProcessor::with_reader(sources),
            Arc::clone(&sink),
        ));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let session = Arc::clone(&session);
                thread::spawn(move || {
                    session
                        .publish_report(&report("A.cs"), Path::new("/sln"))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(sink.calls.load(Ordering::SeqCst), 4);
        assert_eq!(sink.overlaps.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_publish_report_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("inspectcode.xml");
        std::fs::write(&path, report("A.cs")).unwrap();

        let session = session();
        let summary = session
            .publish_report_file(&path, Path::new("/sln"))
            .unwrap();
        assert_eq!(summary.diagnostics, 1);

        let err = session
            .publish_report_file(&temp.path().join("none.xml"), Path::new("/sln"))
            .unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }
}
