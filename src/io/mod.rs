//! I/O module: streaming FASTA input and compressed table output
//!
//! Inputs are read one record at a time through a buffered reader that
//! transparently decompresses gzip. Outputs go to stdout or to a file, gzip
//! compressed when the file name ends in `.gz`.

pub mod compression;
mod fasta;
pub mod sink;

pub use compression::{CompressedReader, CompressedWriter, DataSource};
pub use fasta::FastaStream;
pub use sink::DataSink;
