//! Shared primitives for annotation file formats
//!
//! - Field splitting and parsing helpers for tab-delimited lines
//! - [`Strand`]: DNA strand orientation
//!
//! # Example
//!
//! ```
//! use contig_sensors::formats::primitives::Strand;
//! use std::str::FromStr;
//!
//! let strand = Strand::from_str("-")?;
//! assert_eq!(strand, Strand::Reverse);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use thiserror::Error;

pub mod fields;
pub mod genomic;

pub use genomic::Strand;

/// Errors that can occur when parsing annotation formats
#[derive(Debug, Error)]
pub enum FormatError {
    /// Invalid number of tab-delimited fields
    #[error("Invalid number of fields: expected {expected}, got {actual} at line {line}")]
    FieldCount {
        /// Expected number of fields
        expected: usize,
        /// Actual number of fields found
        actual: usize,
        /// Line number where error occurred
        line: usize,
    },

    /// Invalid field value
    #[error("Invalid field '{field}' at line {line}: {reason}")]
    InvalidField {
        /// Field name
        field: String,
        /// Line number where error occurred
        line: usize,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid strand specification
    #[error("Invalid strand: {0} (expected '+', '-', or '.')")]
    InvalidStrand(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormatError {
    /// Attach a line number to an error raised while parsing a single line
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::FieldCount {
                expected, actual, ..
            } => Self::FieldCount {
                expected,
                actual,
                line,
            },
            Self::InvalidField { field, reason, .. } => Self::InvalidField {
                field,
                line,
                reason,
            },
            other => other,
        }
    }
}

/// Result type for format operations
pub type Result<T> = std::result::Result<T, FormatError>;
