//! Diagnostics reported while loading a workspace document.
//!
//! Loading either succeeds with a [`Workspace`](archup_core::workspace::Workspace)
//! and a possibly empty list of warnings, or fails with a [`ParseError`]
//! carrying every error found. Each [`Diagnostic`] has an [`ErrorCode`], a
//! message, and where possible a source [`Span`](crate::Span) and a dotted
//! document path such as `datamodel.entities.order.relations[0].to`.
//!
//! # Example
//!
//! ```
//! # use archup_parser::error::{Diagnostic, ErrorCode};
//! let diag = Diagnostic::warning("relation target `ghost` is not a known entity")
//!     .with_code(ErrorCode::E200)
//!     .with_path("datamodel.entities.order.relations[0].to")
//!     .with_help("the relation is left out of every diagram");
//!
//! assert!(diag.severity().is_warning());
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
pub use severity::Severity;
