//! contig-sensors: turn annotated genomes into tabular training examples
//!
//! # Overview
//!
//! contig-sensors converts raw contig sequence and its coding-region
//! annotation into tab-delimited rows for a downstream sequence classifier.
//! Each row is the encoded DNA window around one position (a *sensor*) plus,
//! for training and verification, a label derived from the position's
//! reading frame.
//!
//! ## Key Features
//!
//! - **Six encodings**: direct, channel, one-hot, codon-numeric, codon-string,
//!   amino-acid
//! - **Five label schemes**: phase, coding, edge, start, stop
//! - **Chunked random sampling**: decorrelated runs spread along each contig
//! - **Class balancing**: cap over-represented labels with a fuzz factor
//! - **Streaming input**: FASTA and GTF read one record at a time, gzip
//!   detected automatically
//!
//! ## Quick Start
//!
//! ```
//! use contig_sensors::annotation::{CodingRegion, LocationList};
//! use contig_sensors::classify::{ClassScheme, LocationClassifier};
//! use contig_sensors::sensor::{FactoryKind, SensorFactory, SensorWidths};
//!
//! # fn main() -> contig_sensors::Result<()> {
//! let sequence = b"CCATGAAATTTGGGTAACC";
//! let contig = LocationList::new("ctg1", sequence.len(), &[CodingRegion::forward(3, 14)]);
//!
//! let factory = SensorFactory::new(FactoryKind::Channel, SensorWidths::new(3, 5))?;
//! let classifier = LocationClassifier::new(ClassScheme::Edge, false);
//! let labels = classifier.bind(&contig);
//!
//! let sensor = factory.create("ctg1", 3, sequence);
//! assert_eq!(labels.class_of(3), Some("start"));
//! assert_eq!(sensor.values().to_string(), "-\tC\tC\tA\tT\tG\tA\tA\tA");
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`sensor`]: sensor factories, codon filter, genetic code
//! - [`annotation`]: frames and boundaries per contig position
//! - [`classify`]: location classifiers (labels)
//! - [`sampler`]: chunked random traversal
//! - [`output`]: class-balanced table writer
//! - [`pipeline`]: train / verify / encode drivers
//! - [`io`]: streaming FASTA, compression, output sinks
//! - [`formats`]: GTF parser

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod annotation;
pub mod classify;
pub mod error;
pub mod formats;
pub mod io;
pub mod operations;
pub mod output;
pub mod pipeline;
pub mod sampler;
pub mod sensor;
pub mod types;

// Re-export commonly used types
pub use annotation::{Boundary, CodingMap, Frame, FrameLookup, LocationList};
pub use classify::{ClassScheme, LocationClassifier};
pub use error::{Result, SensorError};
pub use io::FastaStream;
pub use output::BalancedWriter;
pub use sampler::{ChunkedSampler, SamplerConfig};
pub use sensor::{CodonFilter, FactoryKind, Sensor, SensorFactory, SensorWidths};
pub use types::FastaRecord;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
