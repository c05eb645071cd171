//! # Archup Parser
//!
//! Loads a YAML workspace document into a validated
//! [`Workspace`](archup_core::workspace::Workspace).
//!
//! ## Usage
//!
//! ```
//! # use archup_parser::{parse, error::ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//! datamodel:
//!   description: Sales
//!   entities:
//!     order:
//!       name: Order
//!       relations:
//!         - to: customer
//!           description: placed by
//!     customer:
//!       name: Customer
//! diagrams:
//!   - name: Overview
//!     type: overview
//! "#;
//!
//!     let workspace = parse(source)?;
//!     assert_eq!(workspace.entities().count(), 2);
//!     Ok(())
//! }
//! ```

mod document;
mod elaborate;
pub mod error;
mod span;
mod validate;

pub use span::Span;

use log::{info, warn};

use archup_core::workspace::Workspace;

use elaborate::Builder;
use error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError};

/// Parse a workspace document.
///
/// Warnings are logged and otherwise discarded; use [`parse_with_warnings`]
/// to inspect them.
///
/// # Errors
///
/// Returns a [`ParseError`] if the document is empty, is not valid YAML, does
/// not have the workspace shape, or fails a content check of error severity.
pub fn parse(source: &str) -> Result<Workspace, ParseError> {
    let (workspace, warnings) = parse_with_warnings(source)?;
    for warning in &warnings {
        warn!(code:? = warning.code(), path:? = warning.path(); "{}", warning.message());
    }
    Ok(workspace)
}

/// Parse a workspace document and return it together with its warnings.
///
/// The loading pipeline is:
///
/// 1. **Deserialize** - read the YAML into the document shape, rejecting
///    unknown fields and missing required fields
/// 2. **Validate** - run content checks, collecting every finding
/// 3. **Elaborate** - convert to the workspace model, filling defaults
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with_warnings(source: &str) -> Result<(Workspace, Vec<Diagnostic>), ParseError> {
    if source.trim().is_empty() {
        return Err(Diagnostic::error("workspace document is empty")
            .with_code(ErrorCode::E101)
            .with_help("a document needs a `datamodel` and a `diagrams` section")
            .into());
    }

    let document: document::Document =
        serde_yaml::from_str(source).map_err(|err| malformed(source, &err))?;

    let mut collector = DiagnosticCollector::new();
    validate::validate_document(&document, &mut collector);
    let warnings = collector.finish()?;

    let workspace = Builder::build(document);
    info!(
        entities_len = workspace.entities().count(),
        warnings_len = warnings.len();
        "Workspace document loaded",
    );

    Ok((workspace, warnings))
}

fn malformed(source: &str, err: &serde_yaml::Error) -> ParseError {
    let mut diagnostic = Diagnostic::error(err.to_string()).with_code(ErrorCode::E100);
    if let Some(location) = err.location() {
        diagnostic = diagnostic.with_span(Span::at(source, location.index()));
    }
    diagnostic.into()
}
