//! Nucleotide lookup tables and window access helpers
//!
//! Every sensor encoding funnels through [`base_index`], which maps the four
//! standard nucleotides (either case, `U` treated as `T`) to `0..4` and
//! everything else to `None`. Window access through [`base_at`] takes signed
//! 0-based offsets so callers never have to guard against running off either
//! end of a contig.
//!
//! # Examples
//!
//! ```
//! use contig_sensors::operations::{base_at, base_index, reverse_complement};
//!
//! assert_eq!(base_index(b'g'), Some(2));
//! assert_eq!(base_index(b'N'), None);
//! assert_eq!(base_at(b"ACGT", -1), None);
//! assert_eq!(reverse_complement(b"ATG"), b"CAT");
//! ```

/// Marker for bytes that are not a standard nucleotide
const INVALID: u8 = 0xFF;

/// Nucleotide index table: A=0, C=1, G=2, T/U=3
const BASE_INDEX_TABLE: [u8; 256] = {
    let mut table = [INVALID; 256];
    table[b'A' as usize] = 0;
    table[b'a' as usize] = 0;
    table[b'C' as usize] = 1;
    table[b'c' as usize] = 1;
    table[b'G' as usize] = 2;
    table[b'g' as usize] = 2;
    table[b'T' as usize] = 3;
    table[b't' as usize] = 3;
    table[b'U' as usize] = 3;
    table[b'u' as usize] = 3;
    table
};

/// Complement table; IUPAC ambiguity codes complement to their partner,
/// anything unrecognized is preserved
const COMPLEMENT_TABLE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = i as u8;
        i += 1;
    }

    table[b'A' as usize] = b'T';
    table[b'T' as usize] = b'A';
    table[b'U' as usize] = b'A';
    table[b'G' as usize] = b'C';
    table[b'C' as usize] = b'G';
    table[b'a' as usize] = b't';
    table[b't' as usize] = b'a';
    table[b'u' as usize] = b'a';
    table[b'g' as usize] = b'c';
    table[b'c' as usize] = b'g';

    table[b'R' as usize] = b'Y';
    table[b'Y' as usize] = b'R';
    table[b'K' as usize] = b'M';
    table[b'M' as usize] = b'K';
    table[b'r' as usize] = b'y';
    table[b'y' as usize] = b'r';
    table[b'k' as usize] = b'm';
    table[b'm' as usize] = b'k';

    table
};

/// Index of a nucleotide (A=0, C=1, G=2, T/U=3), or `None` for anything else
#[inline]
pub fn base_index(base: u8) -> Option<usize> {
    match BASE_INDEX_TABLE[base as usize] {
        INVALID => None,
        idx => Some(idx as usize),
    }
}

/// Byte at a signed 0-based offset, or `None` when the offset is off-contig
#[inline]
pub fn base_at(seq: &[u8], offset: isize) -> Option<u8> {
    if offset < 0 {
        None
    } else {
        seq.get(offset as usize).copied()
    }
}

/// Up to three bytes starting at a 1-based position
///
/// Returns a shorter (possibly empty) slice near or past the contig end.
///
/// ```
/// use contig_sensors::operations::codon_at;
///
/// assert_eq!(codon_at(b"AATGTG", 2), b"ATG");
/// assert_eq!(codon_at(b"AATGTG", 5), b"TG");
/// assert_eq!(codon_at(b"AATGTG", 9), b"");
/// ```
#[inline]
pub fn codon_at(seq: &[u8], position: usize) -> &[u8] {
    if position == 0 || position > seq.len() {
        return &[];
    }
    let start = position - 1;
    let end = (start + 3).min(seq.len());
    &seq[start..end]
}

/// Reverse complement a DNA/RNA sequence (RNA input yields DNA output)
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .rev()
        .map(|&base| COMPLEMENT_TABLE[base as usize])
        .collect()
}
