//! Per-kind window encoders
//!
//! Each encoder receives the 0-based offset of the first column and the
//! number of columns, and returns the values plus a suspicion flag. Offsets
//! that fall off the contig produce the kind's neutral symbol and never set
//! the flag; bytes that are not recognized nucleotides do.

use super::genetic_code::{translate, GeneticCode};
use super::SensorValues;
use crate::operations::{base_at, base_index};

/// Direct encoding values indexed by base (A, C, G, T)
const DIRECT_VALUES: [f64; 4] = [-0.3, -0.6, 0.6, 0.3];

/// Codon-numeric digit per base (A, C, G, T)
const CODON_DIGITS: [u32; 4] = [2, 6, 8, 4];

/// Codon-string letter per base (A, C, G, T)
const CODON_LETTERS: [u8; 4] = *b"acgt";

/// Letters the channel encoding copies through unchanged (either case)
const CHANNEL_LETTERS: &[u8] = b"ACGTU-XYRWSKM";

/// Neutral symbol for off-contig text columns
const OFF_CONTIG: &str = "-";

pub(super) fn direct(seq: &[u8], offset: isize, columns: usize) -> (SensorValues, bool) {
    let mut suspicious = false;
    let values = (0..columns as isize)
        .map(|i| match base_at(seq, offset + i) {
            None => 0.0,
            Some(b) => match base_index(b) {
                Some(idx) => DIRECT_VALUES[idx],
                None => {
                    suspicious = true;
                    0.0
                }
            },
        })
        .collect();
    (SensorValues::Numeric(values), suspicious)
}

pub(super) fn channel(seq: &[u8], offset: isize, columns: usize) -> (SensorValues, bool) {
    let mut suspicious = false;
    let values = (0..columns as isize)
        .map(|i| match base_at(seq, offset + i) {
            None => OFF_CONTIG.to_string(),
            Some(b) if CHANNEL_LETTERS.contains(&b.to_ascii_uppercase()) => {
                char::from(b).to_string()
            }
            Some(_) => {
                suspicious = true;
                "X".to_string()
            }
        })
        .collect();
    (SensorValues::Text(values), suspicious)
}

pub(super) fn one_hot(seq: &[u8], offset: isize, columns: usize) -> (SensorValues, bool) {
    let mut suspicious = false;
    let mut values = vec![0.0; columns * 4];
    for (i, slot) in values.chunks_exact_mut(4).enumerate() {
        if let Some(b) = base_at(seq, offset + i as isize) {
            match base_index(b) {
                Some(idx) => slot[idx] = 1.0,
                None => suspicious = true,
            }
        }
    }
    (SensorValues::Numeric(values), suspicious)
}

pub(super) fn codon_numeric(seq: &[u8], offset: isize, columns: usize) -> (SensorValues, bool) {
    let mut suspicious = false;
    let values = (0..columns as isize)
        .map(|i| {
            let start = offset + i;
            let code = (0..3).fold(0u32, |acc, j| {
                let digit = match base_at(seq, start + j) {
                    None => 0,
                    Some(b) => match base_index(b) {
                        Some(idx) => CODON_DIGITS[idx],
                        None => {
                            suspicious = true;
                            0
                        }
                    },
                };
                acc * 10 + digit
            });
            // 0.d1d2d3, correctly rounded like parsing the decimal text
            f64::from(code) / 1000.0
        })
        .collect();
    (SensorValues::Numeric(values), suspicious)
}

pub(super) fn codon_string(
    seq: &[u8],
    offset: isize,
    columns: usize,
    stride: usize,
) -> (SensorValues, bool) {
    let mut suspicious = false;
    let values = (0..columns)
        .map(|i| {
            let start = offset + (i * stride) as isize;
            (0..3)
                .map(|j| match base_at(seq, start + j) {
                    None => '-',
                    Some(b) => match base_index(b) {
                        Some(idx) => char::from(CODON_LETTERS[idx]),
                        None => {
                            suspicious = true;
                            'n'
                        }
                    },
                })
                .collect::<String>()
        })
        .collect();
    (SensorValues::Text(values), suspicious)
}

pub(super) fn amino_acid(
    seq: &[u8],
    offset: isize,
    columns: usize,
    stride: usize,
) -> (SensorValues, bool) {
    let mut suspicious = false;
    let values = (0..columns)
        .map(|i| {
            let start = offset + (i * stride) as isize;
            if start < 0 || start as usize + 3 > seq.len() {
                return OFF_CONTIG.to_string();
            }
            let start = start as usize;
            match translate(&seq[start..start + 3], GeneticCode::Bacterial) {
                Some(aa) => char::from(aa).to_string(),
                None => {
                    suspicious = true;
                    "X".to_string()
                }
            }
        })
        .collect();
    (SensorValues::Text(values), suspicious)
}
