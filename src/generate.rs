//! Write entrypoint: records → file → sink

use crate::error::{TabularError, TabularResult};
use crate::format::FileFormat;
use crate::mapper::RecordSource;
use crate::sink::ResponseSink;
use tracing::{info, warn};

/// Map `source`, serialize it in the format named by `filename` and hand the result to `sink`.
///
/// The format is resolved before anything else, so an unsupported extension
/// leaves the sink untouched. A failing sink gets a single 500 through
/// `send_error` and the call returns [`TabularError::Sink`].
pub fn generate<S>(sink: &mut S, filename: &str, source: RecordSource<'_>) -> TabularResult<()>
where
    S: ResponseSink + ?Sized,
{
    let format = FileFormat::resolve(filename)?;
    let doc = source.into_document()?;
    let rendered = format.render(&doc)?;

    sink.set_content_type(rendered.content_type);
    sink.set_disposition(filename);
    if let Err(e) = sink.write(&rendered.bytes) {
        let message = match format {
            FileFormat::Xlsx => format!("Unable to generate excel file Error - {}", e),
            FileFormat::Csv => format!("Unable to generate file Error - {}", e),
        };
        warn!(filename, error = %e, "Failed to write generated file");
        return match sink.send_error(500, &message) {
            Ok(()) => Err(TabularError::Sink(e.to_string())),
            Err(report) => Err(TabularError::Sink(format!(
                "{} (error report also failed: {})",
                e, report
            ))),
        };
    }

    info!(
        filename,
        format = %format,
        rows = doc.len(),
        bytes = rendered.bytes.len(),
        "Generated file"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::Record;
    use crate::sink::MemorySink;
    use std::io;

    /// Sink whose transport always fails
    #[derive(Default)]
    struct BrokenSink {
        errors: Vec<(u16, String)>,
        fail_report: bool,
    }

    impl ResponseSink for BrokenSink {
        fn set_content_type(&mut self, _content_type: &str) {}

        fn set_disposition(&mut self, _filename: &str) {}

        fn write(&mut self, _bytes: &[u8]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "Test Exception"))
        }

        fn send_error(&mut self, status: u16, message: &str) -> io::Result<()> {
            self.errors.push((status, message.to_string()));
            if self.fail_report {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "Report Exception"));
            }
            Ok(())
        }
    }

    fn json_records() -> RecordSource<'static> {
        RecordSource::Sequence(vec![
            Record::from(r#"{"data":"Click Here","size":36,"hOffset":250}"#),
            Record::from(r#"{"data":"Back","size":12,"hOffset":10}"#),
        ])
    }

    #[test]
    fn test_generate_csv_into_sink() {
        let mut sink = MemorySink::new();
        generate(&mut sink, "widgets.csv", json_records()).unwrap();

        assert_eq!(sink.content_type.as_deref(), Some("text/csv"));
        assert_eq!(
            sink.disposition.as_deref(),
            Some("attachment; filename=widgets.csv")
        );
        assert_eq!(
            sink.body_text(),
            "DATA,SIZE,H OFFSET\r\nClick Here,36,250\r\nBack,12,10\r\n"
        );
    }

    #[test]
    fn test_generate_rejects_unsupported_extension() {
        let mut sink = MemorySink::new();
        let result = generate(&mut sink, "test.txt", json_records());

        assert!(matches!(result, Err(TabularError::Format { .. })));
        assert_eq!(sink, MemorySink::new());
    }

    #[test]
    fn test_generate_rejects_empty_records() {
        let mut sink = MemorySink::new();
        let result = generate(&mut sink, "test.xlsx", RecordSource::Sequence(Vec::new()));

        match result {
            Err(e @ TabularError::EmptyData) => {
                assert_eq!(e.to_string(), "Data cannot be null or empty")
            }
            other => panic!("Expected empty data error, got {:?}", other),
        }
        assert_eq!(sink, MemorySink::new());
    }

    #[test]
    fn test_generate_reports_sink_failure_once() {
        let mut sink = BrokenSink::default();
        let result = generate(&mut sink, "test.xlsx", json_records());

        assert!(matches!(result, Err(TabularError::Sink(_))));
        assert_eq!(sink.errors.len(), 1);
        assert_eq!(sink.errors[0].0, 500);
        assert!(sink.errors[0].1.starts_with("Unable to generate excel file"));
    }

    #[test]
    fn test_generate_failed_report_still_returns_sink_error() {
        let mut sink = BrokenSink {
            fail_report: true,
            ..Default::default()
        };
        let result = generate(&mut sink, "test.csv", json_records());

        match result {
            Err(TabularError::Sink(msg)) => assert!(msg.contains("Report Exception")),
            other => panic!("Expected sink error, got {:?}", other),
        }
    }
}
