//! Error types for sector file parsing and serialization.

use std::fmt;

use travmap_core::CodecError;

/// Errors raised while reading or writing sector files.
#[derive(Debug)]
pub enum FormatError {
    /// The text does not have the structure the reader expects.
    InvalidFormat {
        /// 1-based line number, when the problem is tied to one line.
        line: Option<usize>,
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// A profile value failed to decode.
    Codec(CodecError),
    /// The header line mixes tab and space delimiting.
    AmbiguousDelimiter {
        /// 1-based line number of the header.
        line: usize,
    },
    /// No header (or no dash rule under the header) was found.
    MissingHeader {
        /// What was missing.
        detail: String,
    },
    /// No reader or writer exists for the requested format.
    Unsupported {
        /// The requested format or extension.
        format: String,
    },
    /// A JSON document could not be read or written.
    Json(serde_json::Error),
}

impl FormatError {
    pub(crate) fn invalid(line: usize, detail: impl Into<String>) -> Self {
        Self::InvalidFormat {
            line: Some(line),
            detail: detail.into(),
        }
    }

    pub(crate) fn invalid_document(detail: impl Into<String>) -> Self {
        Self::InvalidFormat {
            line: None,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat {
                line: Some(line),
                detail,
            } => write!(f, "invalid format at line {line}: {detail}"),
            Self::InvalidFormat { line: None, detail } => write!(f, "invalid format: {detail}"),
            Self::Codec(e) => write!(f, "{e}"),
            Self::AmbiguousDelimiter { line } => {
                write!(f, "line {line} mixes tab and space delimiters")
            }
            Self::MissingHeader { detail } => write!(f, "missing header: {detail}"),
            Self::Unsupported { format } => write!(f, "unsupported format {format:?}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Codec(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CodecError> for FormatError {
    fn from(e: CodecError) -> Self {
        Self::Codec(e)
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// A problem with one data row. Collected; never aborts the document.
#[derive(Debug)]
pub struct RowError {
    /// 1-based line number.
    pub line_number: usize,
    /// The raw line.
    pub line: String,
    /// What was wrong with it.
    pub error: FormatError,
}

impl RowError {
    pub(crate) fn new(line_number: usize, line: &str, error: FormatError) -> Self {
        Self {
            line_number,
            line: line.to_string(),
            error,
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({:?})", self.line_number, self.error, self.line)
    }
}

impl std::error::Error for RowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
