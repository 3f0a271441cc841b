//! Codon translation tables
//!
//! Tables are indexed by `16 * b1 + 4 * b2 + b3` where each base index comes
//! from [`base_index`] (A=0, C=1, G=2, T/U=3). Adding a genetic code means
//! adding a variant and its 64-letter table; call sites go through
//! [`translate`] and never see the table.

use crate::operations::base_index;

/// Supported NCBI genetic codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneticCode {
    /// Translation table 11: bacterial, archaeal and plant plastid code
    #[default]
    Bacterial,
}

impl GeneticCode {
    fn table(self) -> &'static [u8; 64] {
        match self {
            GeneticCode::Bacterial => &GENETIC_CODE_11,
        }
    }
}

/// Amino acids for genetic code 11, in AAA, AAC, AAG, AAT, ACA, ... order
const GENETIC_CODE_11: [u8; 64] =
    *b"KNKNTTTTRSRSIIMIQHQHPPPPRRRRLLLLEDEDAAAAGGGGVVVV*Y*YSSSS*CWCLFLF";

/// Translate one codon into its amino acid letter (`*` for stop)
///
/// Input case does not matter. Returns `None` if the slice is not exactly
/// three bases long or contains anything other than A, C, G, T or U.
///
/// # Examples
///
/// ```
/// use contig_sensors::sensor::genetic_code::{translate, GeneticCode};
///
/// assert_eq!(translate(b"atg", GeneticCode::Bacterial), Some(b'M'));
/// assert_eq!(translate(b"TGA", GeneticCode::Bacterial), Some(b'*'));
/// assert_eq!(translate(b"ANG", GeneticCode::Bacterial), None);
/// ```
pub fn translate(codon: &[u8], code: GeneticCode) -> Option<u8> {
    let [b1, b2, b3] = codon else {
        return None;
    };
    let idx = base_index(*b1)? * 16 + base_index(*b2)? * 4 + base_index(*b3)?;
    Some(code.table()[idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_11_spot_checks() {
        let code = GeneticCode::Bacterial;
        let expected: &[(&[u8], u8)] = &[
            (b"AAA", b'K'),
            (b"AAC", b'N'),
            (b"ATA", b'I'),
            (b"ATG", b'M'),
            (b"CAT", b'H'),
            (b"CTG", b'L'),
            (b"GAC", b'D'),
            (b"GGT", b'G'),
            (b"TAA", b'*'),
            (b"TAG", b'*'),
            (b"TGA", b'*'),
            (b"TGG", b'W'),
            (b"TGT", b'C'),
            (b"TTC", b'F'),
            (b"TTG", b'L'),
        ];
        for (codon, aa) in expected {
            assert_eq!(
                translate(codon, code),
                Some(*aa),
                "codon {}",
                String::from_utf8_lossy(codon)
            );
        }
    }

    #[test]
    fn test_rna_and_lowercase() {
        assert_eq!(translate(b"aug", GeneticCode::Bacterial), Some(b'M'));
        assert_eq!(translate(b"UAA", GeneticCode::Bacterial), Some(b'*'));
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(translate(b"AT", GeneticCode::Bacterial), None);
        assert_eq!(translate(b"ATGA", GeneticCode::Bacterial), None);
    }

    #[test]
    fn test_three_stops_only() {
        let stops = GENETIC_CODE_11.iter().filter(|&&aa| aa == b'*').count();
        assert_eq!(stops, 3);
    }
}
