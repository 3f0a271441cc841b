//! Codon filter: accept or reject a position by the codon that starts there
//!
//! Filtering runs before encoding and classification, so restricting output
//! to start or stop codons skips the expensive work for most positions.

use crate::error::{Result, SensorError};
use crate::operations::{codon_at, reverse_complement};
use std::collections::BTreeSet;

/// Forward-strand start codons (genetic code 11)
pub const START_CODONS: [&str; 3] = ["ATG", "GTG", "TTG"];

/// Forward-strand stop codons
pub const STOP_CODONS: [&str; 3] = ["TAA", "TAG", "TGA"];

/// Fixed set of accepted codons
///
/// # Examples
///
/// ```
/// use contig_sensors::sensor::CodonFilter;
///
/// let filter = CodonFilter::new(["atg", "AAT"])?;
/// assert!(filter.matches(1, b"AATGTG"));
/// assert!(filter.matches(2, b"AATGTG"));
/// assert!(!filter.matches(3, b"AATGTG"));
/// # Ok::<(), contig_sensors::error::SensorError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodonFilter {
    codons: BTreeSet<[u8; 3]>,
}

impl CodonFilter {
    /// Build a filter from one or more 3-letter codons (any case)
    pub fn new<I, S>(codons: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for codon in codons {
            let codon = codon.as_ref();
            let bytes: [u8; 3] = codon
                .as_bytes()
                .try_into()
                .ok()
                .filter(|b: &[u8; 3]| b.iter().all(u8::is_ascii_alphabetic))
                .ok_or_else(|| {
                    SensorError::InvalidCodonFilter(format!(
                        "'{}' is not a 3-letter codon",
                        codon
                    ))
                })?;
            set.insert(bytes.map(|b| b.to_ascii_uppercase()));
        }
        if set.is_empty() {
            return Err(SensorError::InvalidCodonFilter(
                "at least one codon is required".to_string(),
            ));
        }
        Ok(Self { codons: set })
    }

    /// Start codons, plus their reverse complements when `negative` is set
    pub fn starts(negative: bool) -> Self {
        Self::preset(&START_CODONS, negative)
    }

    /// Stop codons, plus their reverse complements when `negative` is set
    pub fn stops(negative: bool) -> Self {
        Self::preset(&STOP_CODONS, negative)
    }

    /// Start and stop codons, plus reverse complements when `negative` is set
    pub fn edges(negative: bool) -> Self {
        let mut filter = Self::starts(negative);
        filter.codons.extend(Self::stops(negative).codons);
        filter
    }

    fn preset(codons: &[&str], negative: bool) -> Self {
        let mut set = BTreeSet::new();
        for codon in codons {
            let forward: [u8; 3] = [codon.as_bytes()[0], codon.as_bytes()[1], codon.as_bytes()[2]];
            set.insert(forward);
            if negative {
                let rc = reverse_complement(&forward);
                set.insert([rc[0], rc[1], rc[2]]);
            }
        }
        Self { codons: set }
    }

    /// True if the three bases starting at `position` (1-based) are in the set
    ///
    /// A codon running off the end of the sequence never matches.
    pub fn matches(&self, position: usize, sequence: &[u8]) -> bool {
        match codon_at(sequence, position) {
            [b1, b2, b3] => self.codons.contains(&[
                b1.to_ascii_uppercase(),
                b2.to_ascii_uppercase(),
                b3.to_ascii_uppercase(),
            ]),
            _ => false,
        }
    }

    /// Accepted codons in sorted order
    pub fn codons(&self) -> impl Iterator<Item = &str> {
        // Entries were validated as ASCII letters at construction
        self.codons
            .iter()
            .map(|c| std::str::from_utf8(c).unwrap_or_default())
    }

    /// Number of accepted codons
    pub fn len(&self) -> usize {
        self.codons.len()
    }

    /// Always false: a filter holds at least one codon
    pub fn is_empty(&self) -> bool {
        self.codons.is_empty()
    }
}
