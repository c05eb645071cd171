//! Error adapter for converting ArchupError to miette diagnostics.
//!
//! Every [`ArchupError`] becomes one or more [`Reportable`] values. A parse
//! failure yields one per diagnostic so each is rendered with its own code,
//! severity and snippet; any other error yields a single one.

use std::{error::Error, fmt};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity, SourceCode, SourceSpan};

use archup::ArchupError;
use archup_parser::error::Diagnostic;

const INCLUDE_HELP: &str =
    "check `render.styling_include` in the configuration and any `!include` lines it pulls in";

/// A single error ready to be rendered by miette.
#[derive(Debug)]
pub struct Reportable<'a> {
    message: String,
    code: Option<String>,
    severity: Severity,
    help: Option<String>,
    /// Source text and the span to underline, for spanned diagnostics only.
    snippet: Option<(&'a str, SourceSpan)>,
    cause: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Reportable<'a> {
    /// Wrap a parser diagnostic raised while reading `src`.
    pub fn from_diagnostic(diag: &Diagnostic, src: &'a str) -> Self {
        let message = match diag.path() {
            Some(path) => format!("{} (at {path})", diag.message()),
            None => diag.message().to_string(),
        };
        let severity = if diag.severity().is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        };

        Self {
            message,
            code: diag.code().map(|code| code.to_string()),
            severity,
            help: diag.help().map(str::to_string),
            snippet: diag.span().map(|span| (src, span_to_miette(span))),
            cause: None,
        }
    }

    /// Wrap an error that carries no source location.
    pub fn from_error(err: &'a ArchupError) -> Self {
        let code = match err {
            ArchupError::Io(_) => Some("archup::io"),
            ArchupError::Parse { .. } => None,
            ArchupError::Include(_) => Some("archup::include"),
            ArchupError::Config(_) => Some("archup::config"),
        };
        let help = matches!(err, ArchupError::Include(_)).then(|| INCLUDE_HELP.to_string());

        Self {
            message: err.to_string(),
            code: code.map(str::to_string),
            severity: Severity::Error,
            help,
            snippet: None,
            cause: err.source(),
        }
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.code
            .as_ref()
            .map(|code| Box::new(code) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.snippet.as_ref().map(|(src, _)| src as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let (_, span) = self.snippet?;
        let label = LabeledSpan::new_primary_with_span(Some("here".to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Convert an archup [`Span`](archup_parser::Span) to a miette [`SourceSpan`].
fn span_to_miette(span: archup_parser::Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert an [`ArchupError`] into a list of reportable errors.
pub fn to_reportables(err: &ArchupError) -> Vec<Reportable<'_>> {
    match err {
        ArchupError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::from_diagnostic(d, src))
            .collect(),
        _ => vec![Reportable::from_error(err)],
    }
}

#[cfg(test)]
mod tests {
    use archup_parser::{
        Span,
        error::{ErrorCode, ParseError},
    };

    use super::*;

    #[test]
    fn test_single_diagnostic() {
        let diag = Diagnostic::error("test error")
            .with_code(ErrorCode::E100)
            .with_span(Span::new(0..5))
            .with_help("try this");
        let parse_err = ParseError::from(diag);
        let err = ArchupError::new_parse_error(parse_err, "hello");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        let report = &reportables[0];
        assert_eq!(report.to_string(), "test error");
        assert_eq!(report.severity(), Some(Severity::Error));
        assert_eq!(report.help().map(|h| h.to_string()).as_deref(), Some("try this"));
        assert!(report.source_code().is_some());
        let labels: Vec<_> = report.labels().expect("labels").collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert_eq!(labels[0].offset(), 0);
        assert_eq!(labels[0].len(), 5);
    }

    #[test]
    fn test_multiple_diagnostics() {
        let diags = vec![
            Diagnostic::error("first error").with_code(ErrorCode::E206),
            Diagnostic::error("second error")
                .with_code(ErrorCode::E206)
                .with_help("help for second"),
            Diagnostic::warning("third warning").with_code(ErrorCode::E200),
        ];
        let parse_err = ParseError::new(diags);
        let err = ArchupError::new_parse_error(parse_err, "source code here...");

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 3);
        assert_eq!(reportables[0].to_string(), "first error");
        assert_eq!(reportables[1].to_string(), "second error");
        assert_eq!(reportables[2].to_string(), "third warning");
        assert_eq!(reportables[2].severity(), Some(Severity::Warning));
    }

    #[test]
    fn test_unspanned_diagnostic_has_no_snippet() {
        let diag = Diagnostic::error("entity name is empty")
            .with_code(ErrorCode::E206)
            .with_path("datamodel.entities.A.name");
        let report = Reportable::from_diagnostic(&diag, "datamodel: {}");

        assert!(report.source_code().is_none());
        assert!(report.labels().is_none());
        assert_eq!(
            report.to_string(),
            "entity name is empty (at datamodel.entities.A.name)"
        );
        assert_eq!(report.code().map(|c| c.to_string()).as_deref(), Some("E206"));
    }

    #[test]
    fn test_non_parse_error() {
        let err = ArchupError::Config("bad config".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        let report = &reportables[0];
        assert_eq!(report.to_string(), "Configuration error: bad config");
        assert_eq!(
            report.code().map(|c| c.to_string()).as_deref(),
            Some("archup::config")
        );
        assert!(report.help().is_none());
        assert!(report.source_code().is_none());
    }
}
