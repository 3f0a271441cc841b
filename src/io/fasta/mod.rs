//! FASTA format support: streaming parser for contigs and query sequences
//!
//! ```no_run
//! use contig_sensors::io::FastaStream;
//!
//! let stream = FastaStream::from_path("genome.fna")?;
//! for record in stream {
//!     let record = record?;
//!     println!("{}: {} bp", record.id, record.sequence.len());
//! }
//! # Ok::<(), contig_sensors::error::SensorError>(())
//! ```

mod parser;

pub use parser::FastaStream;
