//! Error types for contig-sensors

use crate::formats::primitives::FormatError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for contig-sensors operations
pub type Result<T> = std::result::Result<T, SensorError>;

/// Error types that can occur in contig-sensors
///
/// Configuration errors are raised by constructors, before any sequence is
/// scanned. Ambiguous nucleotides and invalid frames are never errors; they
/// are filtered out silently.
#[derive(Debug, Error)]
pub enum SensorError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid FASTA format
    #[error("Invalid FASTA format at line {line}: {msg}")]
    InvalidFastaFormat {
        /// Line number where error occurred
        line: usize,
        /// Error message
        msg: String,
    },

    /// Annotation file could not be parsed
    #[error("Annotation error: {0}")]
    Format(#[from] FormatError),

    /// Input file or directory does not exist
    #[error("Input not found: {}", path.display())]
    MissingInput {
        /// Offending path
        path: PathBuf,
    },

    /// Sensor widths incompatible with the chosen factory
    #[error("Invalid sensor widths left={left} right={right} for {kind}: {reason}")]
    InvalidWidths {
        /// Left width
        left: usize,
        /// Right width
        right: usize,
        /// Factory type tag
        kind: String,
        /// Why the combination was rejected
        reason: String,
    },

    /// Unknown sensor factory type tag
    #[error("Unknown sensor type '{0}' (expected direct, channel, codon-numeric, codon-string, one-hot or amino-acid)")]
    UnknownFactory(String),

    /// Unknown location classification scheme tag
    #[error("Unknown classification type '{0}' (expected phase, coding, edge, start or stop)")]
    UnknownScheme(String),

    /// Codon filter built from an empty or malformed codon set
    #[error("Invalid codon filter: {0}")]
    InvalidCodonFilter(String),

    /// Balance fuzz factor outside of 0 or [1.0, 2.0]
    #[error("Invalid balance fuzz factor {0} (must be 0 or between 1.0 and 2.0)")]
    InvalidFuzz(f64),

    /// Chunk size or run length of zero
    #[error("Invalid sampler configuration: {0}")]
    InvalidSampler(String),

    /// Row written to a balanced writer after it was closed
    #[error("Output writer already closed")]
    WriterClosed,
}

impl SensorError {
    /// True for errors detected while validating configuration
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::InvalidWidths { .. }
                | Self::UnknownFactory(_)
                | Self::UnknownScheme(_)
                | Self::InvalidCodonFilter(_)
                | Self::InvalidFuzz(_)
                | Self::InvalidSampler(_)
        )
    }
}
