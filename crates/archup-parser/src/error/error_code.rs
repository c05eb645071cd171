//! Error codes for document diagnostics.
//!
//! - `E1xx` - the document could not be read as a workspace at all
//! - `E2xx` - the document was read but its content is questionable

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Document Errors (E1xx)
    // =========================================================================
    /// Malformed document.
    ///
    /// The YAML is invalid, a required field is missing, a field has the
    /// wrong type, or an unknown field is present.
    E100,

    /// Empty document.
    E101,

    // =========================================================================
    // Content Checks (E2xx)
    // =========================================================================
    /// Relation target is not a known entity.
    ///
    /// The relation is dropped from every diagram it would appear in.
    E200,

    /// Unrecognized direction token.
    ///
    /// Only `L`, `R`, `U` and `D` are reversed; other tokens are passed to
    /// the renderer as written.
    E201,

    /// Unknown content toggle.
    E202,

    /// Tag reference matches no entity.
    E203,

    /// Layout key is not an `<from>-<to>` pair.
    E204,

    /// Layout scope names neither `overview` nor a known entity.
    E205,

    /// Entity id or name is empty.
    E206,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            ErrorCode::E206 => "E206",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "malformed document",
            ErrorCode::E101 => "empty document",
            ErrorCode::E200 => "unknown relation target",
            ErrorCode::E201 => "unrecognized direction",
            ErrorCode::E202 => "unknown content toggle",
            ErrorCode::E203 => "unmatched tag reference",
            ErrorCode::E204 => "malformed layout key",
            ErrorCode::E205 => "unknown layout scope",
            ErrorCode::E206 => "empty entity id or name",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E206.to_string(), "E206");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E101.description(), "empty document");
        assert_eq!(ErrorCode::E200.description(), "unknown relation target");
    }
}
