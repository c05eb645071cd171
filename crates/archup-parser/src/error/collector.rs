//! Accumulates diagnostics so every problem in a document is reported at once.

use std::cmp::Reverse;

use crate::error::{Diagnostic, ParseError};

#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection.
    ///
    /// Returns the warnings when no error was emitted, otherwise a
    /// [`ParseError`] holding errors first and then warnings.
    pub fn finish(mut self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_errors {
            self.diagnostics
                .sort_by_key(|diag| Reverse(diag.severity().is_error()));
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}
