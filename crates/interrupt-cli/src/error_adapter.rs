//! Error adapter for converting InterruptError to miette diagnostics.
//!
//! Decode failures carry spans into the decoded text and render as
//! annotated snippets; every other failure renders as a plain report with
//! an `interrupt::*` code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use interrupt::InterruptError;
use interrupt_parser::{Span, error::Diagnostic};

/// A decode diagnostic shown over the text it was decoded from.
pub struct DecodeReport<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl fmt::Debug for DecodeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeReport")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DecodeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.diag.message())
    }
}

impl std::error::Error for DecodeReport<'_> {}

impl MietteDiagnostic for DecodeReport<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(self.diag.labels().iter().map(|label| {
            let message = Some(label.message().to_string());
            let span = to_source_span(label.span());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Any other [`InterruptError`], reported without a snippet.
pub struct ErrorReport<'a>(&'a InterruptError);

impl fmt::Debug for ErrorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.0, f)
    }
}

impl fmt::Display for ErrorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

impl std::error::Error for ErrorReport<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorReport<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            InterruptError::Io(_) => "interrupt::io",
            InterruptError::Decode { .. } => "interrupt::decode",
            InterruptError::Record(_) => "interrupt::record",
            InterruptError::Json(_) => "interrupt::json",
            InterruptError::Config(_) => "interrupt::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            InterruptError::Record(_) => {
                "a record needs a `qualifier` of dotted identifiers and an identifier `label`"
            }
            InterruptError::Config(_) => "see `[encoder]` and `[output]` in config.toml",
            _ => return None,
        };
        Some(Box::new(help))
    }
}

fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert an [`InterruptError`] into the reports to render.
///
/// A decode error yields one report per diagnostic; anything else yields
/// a single report.
pub fn to_reports(err: &InterruptError) -> Vec<Box<dyn MietteDiagnostic + '_>> {
    match err {
        InterruptError::Decode { err: decode_err, src } => decode_err
            .diagnostics()
            .iter()
            .map(|diag| Box::new(DecodeReport { diag, src }) as Box<dyn MietteDiagnostic>)
            .collect(),
        _ => vec![Box::new(ErrorReport(err))],
    }
}

#[cfg(test)]
mod tests {
    use interrupt_parser::{DecodeError, error::ErrorCode};

    use super::*;

    fn context_error() -> Diagnostic {
        Diagnostic::error("malformed context dump: expected value")
            .with_code(ErrorCode::E001)
            .with_label(Span::new(5..6), "invalid JSON here")
            .with_secondary_label(Span::new(5..8), "while reading this block")
            .with_help("re-encode the record")
    }

    #[test]
    fn test_decode_error_reports_over_source() {
        let err = InterruptError::new_decode_error(DecodeError::from(context_error()), "q#l\n\n{,}\n\nstack:\n");

        let reports = to_reports(&err);
        assert_eq!(reports.len(), 1);

        let report = &reports[0];
        assert_eq!(report.to_string(), "malformed context dump: expected value");
        assert_eq!(report.code().unwrap().to_string(), "E001");
        assert_eq!(report.help().unwrap().to_string(), "re-encode the record");
        assert!(report.source_code().is_some());
    }

    #[test]
    fn test_decode_labels_keep_primary_flag() {
        let diag = context_error();
        let report = DecodeReport { diag: &diag, src: "q#l\n\n{,}\n\nstack:\n" };

        let labels: Vec<_> = report.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label(), Some("invalid JSON here"));
        assert_eq!(labels[0].offset(), 5);
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
    }

    #[test]
    fn test_record_error_has_code_and_help() {
        let err = InterruptError::Record("invalid label".to_string());

        let reports = to_reports(&err);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].to_string(), "Invalid record: invalid label");
        assert_eq!(reports[0].code().unwrap().to_string(), "interrupt::record");
        assert!(reports[0].help().is_some());
        assert!(reports[0].source_code().is_none());
    }

    #[test]
    fn test_io_error_has_no_help() {
        let err = InterruptError::Io(std::io::Error::other("disk on fire"));

        let reports = to_reports(&err);
        assert_eq!(reports[0].code().unwrap().to_string(), "interrupt::io");
        assert!(reports[0].help().is_none());
    }
}
