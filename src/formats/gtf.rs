//! GTF (Gene Transfer Format) reader for coding-region annotations
//!
//! Only the columns needed to place coding regions on a contig are kept:
//!
//! 1. **seqname**: Contig name (must match the FASTA record ID)
//! 3. **feature**: Feature type; `CDS` rows define coding regions
//! 4. **start**: Start position (1-based, inclusive)
//! 5. **end**: End position (1-based, inclusive)
//! 7. **strand**: `+` or `-`
//! 8. **frame**: CDS phase (0, 1, 2, or `.`)
//!
//! The source and attribute columns are not interpreted, so GTF
//! (`gene_id "g1";`) and GFF3-style (`ID=cds1;partial=00`) attributes are
//! both accepted.
//!
//! # Example
//!
//! ```
//! use contig_sensors::formats::gtf::GtfRecord;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let line = "ctg1\tprodigal\tCDS\t10\t309\t.\t+\t0\tgene_id \"peg.1\";";
//! let record = GtfRecord::from_line(line)?;
//!
//! assert!(record.is_cds());
//! assert_eq!(record.start, 10);
//! assert_eq!(record.frame, Some(0));
//! # Ok(())
//! # }
//! ```

use crate::formats::primitives::{
    fields::{parse_optional, parse_required, split_fields},
    FormatError, Result, Strand,
};
use std::io::BufRead;
use std::str::FromStr;

/// GTF feature record
#[derive(Debug, Clone, PartialEq)]
pub struct GtfRecord {
    /// Contig name
    pub seqname: String,
    /// Feature type (gene, CDS, exon, ...)
    pub feature: String,
    /// Start position (1-based, inclusive)
    pub start: u64,
    /// End position (1-based, inclusive)
    pub end: u64,
    /// Strand (+, -)
    pub strand: Strand,
    /// CDS phase: bases to skip from the 5' end before the first full codon
    pub frame: Option<u8>,
}

impl GtfRecord {
    /// Parse a record from one tab-delimited GTF line
    pub fn from_line(line: &str) -> Result<Self> {
        let fields = split_fields(line, Some(9), 0)?;

        let start: u64 = parse_required(fields[3], "start", 0)?;
        let end: u64 = parse_required(fields[4], "end", 0)?;
        if start == 0 || end < start {
            return Err(FormatError::InvalidField {
                field: "end".to_string(),
                line: 0,
                reason: format!("invalid coordinates {}..{}", start, end),
            });
        }

        let frame: Option<u8> = parse_optional(fields[7], "frame", 0)?;
        if matches!(frame, Some(f) if f > 2) {
            return Err(FormatError::InvalidField {
                field: "frame".to_string(),
                line: 0,
                reason: "phase must be 0, 1 or 2".to_string(),
            });
        }

        Ok(GtfRecord {
            seqname: fields[0].to_string(),
            feature: fields[2].to_string(),
            start,
            end,
            strand: Strand::from_str(fields[6])?,
            frame,
        })
    }

    /// True for coding-sequence rows
    pub fn is_cds(&self) -> bool {
        self.feature.eq_ignore_ascii_case("CDS")
    }
}

/// Streaming GTF parser
///
/// Skips blank lines and `#` comments; errors carry the 1-based line number.
pub struct GtfParser<R: BufRead> {
    reader: R,
    line_buffer: String,
    line_number: usize,
}

impl<R: BufRead> GtfParser<R> {
    /// Create a new GTF parser over any buffered reader
    pub fn new(reader: R) -> Self {
        GtfParser {
            reader,
            line_buffer: String::new(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for GtfParser<R> {
    type Item = Result<GtfRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line_buffer.clear();
            match self.reader.read_line(&mut self.line_buffer) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_number += 1;
                    let line = self.line_buffer.trim_end_matches(['\n', '\r']);
                    if line.trim().is_empty() || line.starts_with('#') {
                        continue;
                    }
                    let line_number = self.line_number;
                    return Some(GtfRecord::from_line(line).map_err(|e| e.at_line(line_number)));
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_gff_style_attributes_accepted() {
        let line = "ctg1\tprodigal\tCDS\t3\t14\t.\t+\t0\tID=cds1;partial=00";
        let record = GtfRecord::from_line(line).unwrap();
        assert!(record.is_cds());
        assert_eq!((record.start, record.end), (3, 14));
        assert_eq!(record.frame, Some(0));

        let bare = "ctg1\t.\tCDS\t3\t14\t.\t+\t0\tnote;;odd value";
        assert!(GtfRecord::from_line(bare).is_ok());
    }

    #[test]
    fn test_gtf_cds_record() {
        let line = "ctg1\t.\tCDS\t100\t399\t.\t-\t2\tgene_id \"g1\";";
        let record = GtfRecord::from_line(line).unwrap();
        assert!(record.is_cds());
        assert_eq!(record.strand, Strand::Reverse);
        assert_eq!(record.frame, Some(2));
        assert_eq!(record.end - record.start + 1, 300);
    }

    #[test]
    fn test_gtf_rejects_bad_phase() {
        let line = "ctg1\t.\tCDS\t100\t399\t.\t+\t3\tgene_id \"g1\";";
        assert!(GtfRecord::from_line(line).is_err());
    }

    #[test]
    fn test_gtf_rejects_reversed_coordinates() {
        let line = "ctg1\t.\tCDS\t400\t399\t.\t+\t0\t.";
        assert!(GtfRecord::from_line(line).is_err());
    }

    #[test]
    fn test_parser_skips_comments_and_reports_line() {
        let data = "#gtf-version 2\n\nctg1\t.\tCDS\t1\t9\t.\t+\t0\t.\nctg1\t.\tCDS\tx\t9\t.\t+\t0\t.\n";
        let mut parser = GtfParser::new(Cursor::new(data));
        let first = parser.next().unwrap().unwrap();
        assert_eq!(first.end, 9);
        match parser.next().unwrap() {
            Err(FormatError::InvalidField { field, line, .. }) => {
                assert_eq!(field, "start");
                assert_eq!(line, 4);
            }
            other => panic!("expected field error, got {:?}", other),
        }
        assert!(parser.next().is_none());
    }
}
