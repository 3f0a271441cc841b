//! Output destinations for table writes
//!
//! `DataSink` is the write counterpart to `DataSource`: writers take a sink
//! and stay agnostic to where the rows end up.
//!
//! # Example
//!
//! ```no_run
//! use contig_sensors::io::DataSink;
//!
//! // Write to local file (gzip, from the extension)
//! let sink = DataSink::from_path("training.tsv.gz");
//!
//! // Write to stdout
//! let sink = DataSink::stdout();
//! ```

use std::path::{Path, PathBuf};

/// Output destination for table writes
#[derive(Debug, Clone)]
pub enum DataSink {
    /// Write to a local file path
    ///
    /// `.gz` or `.gzip` selects gzip compression, anything else is plain text.
    Local(PathBuf),

    /// Write to standard output
    Stdout,
}

impl DataSink {
    /// Create a sink from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::Local(path.as_ref().to_path_buf())
    }

    /// Create a sink for standard output
    pub fn stdout() -> Self {
        Self::Stdout
    }

    /// Sink for an optional output path; `None` or `-` means stdout
    pub fn from_option<P: AsRef<Path>>(path: Option<P>) -> Self {
        match path {
            Some(p) if p.as_ref() != Path::new("-") => Self::from_path(p),
            _ => Self::Stdout,
        }
    }

    /// Get the file extension if this is a local file sink
    pub(crate) fn extension(&self) -> Option<&str> {
        match self {
            Self::Local(path) => path.extension().and_then(|s| s.to_str()),
            Self::Stdout => None,
        }
    }

    /// Check if this sink represents a compressed output
    pub fn is_compressed(&self) -> bool {
        matches!(self.extension(), Some("gz") | Some("gzip"))
    }
}
