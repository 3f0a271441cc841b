//! Annotation file format parsers
//!
//! - [`primitives`]: field helpers, strand type and format errors
//! - [`gtf`]: streaming GTF reader used to place coding regions on contigs

pub mod gtf;
pub mod primitives;

pub use gtf::{GtfParser, GtfRecord};
pub use primitives::{FormatError, Strand};
