//! Sequence primitives shared by the sensor encodings and codon filters

pub mod sequence;

pub use sequence::{base_at, base_index, codon_at, reverse_complement};
