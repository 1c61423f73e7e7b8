//! Error types for the netlist parser.
//!
//! Two layers of failure exist. [`NetlistError`] is fatal: it covers the
//! inability to access the input (or a crashed worker) and aborts the whole
//! parse. [`StatementError`] and [`ValueError`] describe a single malformed
//! statement; they never abort anything and are turned into
//! [`Diagnostic`](crate::netlist::Diagnostic)s by the session.

use thiserror::Error;

/// Result type alias using [`NetlistError`].
pub type Result<T> = std::result::Result<T, NetlistError>;

/// Fatal errors that abort a parse.
#[derive(Error, Debug)]
pub enum NetlistError {
    // ============ I/O Errors ============
    /// Error opening the netlist file
    #[error("Failed to read netlist file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error reading a line from the source stream
    #[error("Failed to read line {line}: {source}")]
    ReadError {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    // ============ Concurrency Errors ============
    /// A worker or aggregation thread panicked
    #[error("{role} thread panicked")]
    WorkerPanicked { role: &'static str },

    // ============ Output Errors ============
    /// Error serializing the parse outcome
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NetlistError {
    /// Create a file read error
    pub fn file_read(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileReadError {
            path: path.into(),
            source,
        }
    }

    /// Create a worker panic error
    pub fn worker_panicked(role: &'static str) -> Self {
        Self::WorkerPanicked { role }
    }
}

/// Failure to decode a numeric literal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The numeric prefix is not a valid float
    #[error("invalid number: {0}")]
    InvalidNumber(String),

    /// The trailing character is not in the multiplier table
    #[error("unknown unit: {0}")]
    UnknownUnit(char),
}

/// Recoverable failure of a single statement.
///
/// The `Display` output is the diagnostic message reported for the line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatementError {
    /// Component line does not have the expected token shape
    #[error("invalid component syntax")]
    InvalidComponentSyntax,

    /// Designator letter does not name a supported component type
    #[error("unsupported component type: {0}")]
    UnsupportedComponentType(char),

    /// Model card does not match `.model <name> <type> [params]`
    #[error("invalid model syntax")]
    InvalidModelSyntax,

    /// Directive line with no keyword after the marker
    #[error("empty command")]
    EmptyCommand,

    /// Numeric value could not be decoded
    #[error(transparent)]
    Value(#[from] ValueError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_messages() {
        assert_eq!(
            StatementError::InvalidComponentSyntax.to_string(),
            "invalid component syntax"
        );
        assert_eq!(
            StatementError::UnsupportedComponentType('Q').to_string(),
            "unsupported component type: Q"
        );
        assert_eq!(
            StatementError::from(ValueError::UnknownUnit('x')).to_string(),
            "unknown unit: x"
        );
    }

    #[test]
    fn test_file_read_error_message() {
        let err = NetlistError::file_read(
            "missing.sp",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().starts_with("Failed to read netlist file 'missing.sp'"));
    }
}
