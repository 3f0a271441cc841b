//! Coding-region annotation: frames and boundaries per contig position
//!
//! A [`CodingMap`] collects the coding regions of a genome from GTF `CDS`
//! rows. For each contig it produces a [`LocationList`], which answers the
//! [`FrameLookup`] questions the classifiers ask.
//!
//! # Frame rules
//!
//! For a forward region `[b, e]` with phase `p` the frame at `pos` is
//! `P((pos - b - p) mod 3)`; for a reverse region it is
//! `M((e - p - pos) mod 3)`. Positions outside every region are `F0`.
//! Positions covered by regions that disagree, and positions off the contig,
//! are `XX`.
//!
//! # Boundary rules
//!
//! Boundaries sit on the leftmost base of the codon involved, so that a
//! [`CodonFilter`](crate::sensor::CodonFilter) reading forward from the
//! position sees the codon text:
//!
//! | Strand | Start | Stop |
//! |--------|-------|------|
//! | `+` | `b` | `e + 1` (stop codon after the CDS) |
//! | `-` | `e - 2` | `b - 3` |
//!
//! Each CDS row is treated as one complete coding region, which is how
//! prokaryotic annotation pipelines write them.

mod frame;

pub use frame::{Boundary, Frame, FrameLookup};

use crate::error::Result;
use crate::formats::gtf::{GtfParser, GtfRecord};
use crate::formats::primitives::Strand;
use crate::io::compression::{CompressedReader, DataSource};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// One annotated coding region (1-based, inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodingRegion {
    /// Leftmost base
    pub start: usize,
    /// Rightmost base
    pub end: usize,
    /// Forward or reverse
    pub strand: Strand,
    /// Bases to skip at the 5' end before the first full codon
    pub phase: usize,
}

impl CodingRegion {
    /// Forward-strand region with phase 0
    pub fn forward(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            strand: Strand::Forward,
            phase: 0,
        }
    }

    /// Reverse-strand region with phase 0
    pub fn reverse(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            strand: Strand::Reverse,
            phase: 0,
        }
    }

    /// Region described by a GTF record, if it is a stranded CDS row
    pub fn from_gtf(record: &GtfRecord) -> Option<Self> {
        if !record.is_cds() || record.strand == Strand::Unknown {
            return None;
        }
        Some(Self {
            start: record.start as usize,
            end: record.end as usize,
            strand: record.strand,
            phase: record.frame.unwrap_or(0) as usize,
        })
    }

    fn frame_of(&self, position: usize) -> Frame {
        let (pos, start, end, phase) = (
            position as isize,
            self.start as isize,
            self.end as isize,
            self.phase as isize,
        );
        match self.strand {
            Strand::Forward => Frame::plus((pos - start - phase).rem_euclid(3) as usize),
            _ => Frame::minus((end - phase - pos).rem_euclid(3) as usize),
        }
    }
}

/// Frames and boundaries of one contig
#[derive(Debug, Clone)]
pub struct LocationList {
    contig_id: String,
    frames: Vec<Frame>,
    forward_edges: HashMap<usize, Boundary>,
    reverse_edges: HashMap<usize, Boundary>,
}

impl LocationList {
    /// Build the frame table of a contig from its coding regions
    pub fn new<'a, I>(contig_id: &str, length: usize, regions: I) -> Self
    where
        I: IntoIterator<Item = &'a CodingRegion>,
    {
        let mut list = Self {
            contig_id: contig_id.to_string(),
            frames: vec![Frame::F0; length],
            forward_edges: HashMap::new(),
            reverse_edges: HashMap::new(),
        };
        for region in regions {
            list.add(region);
        }
        list
    }

    /// Frame table of a contig with no coding regions
    pub fn non_coding(contig_id: &str, length: usize) -> Self {
        Self::new(contig_id, length, &[] as &[CodingRegion])
    }

    fn add(&mut self, region: &CodingRegion) {
        if region.start == 0 || region.end < region.start {
            return;
        }
        if region.end > self.frames.len() {
            debug!(
                contig = %self.contig_id,
                start = region.start,
                end = region.end,
                length = self.frames.len(),
                "coding region runs past contig end"
            );
        }
        let last = region.end.min(self.frames.len());
        let mut conflicts = 0;
        for pos in region.start..=last {
            let frame = region.frame_of(pos);
            let slot = &mut self.frames[pos - 1];
            *slot = match *slot {
                Frame::F0 => frame,
                existing if existing == frame => existing,
                _ => {
                    conflicts += 1;
                    Frame::XX
                }
            };
        }
        if conflicts > 0 {
            debug!(
                contig = %self.contig_id,
                start = region.start,
                end = region.end,
                conflicts,
                "overlapping coding regions disagree on frame"
            );
        }

        match region.strand {
            Strand::Forward => {
                self.forward_edges
                    .entry(region.start)
                    .or_insert(Boundary::Start);
                self.forward_edges
                    .entry(region.end + 1)
                    .or_insert(Boundary::Stop);
            }
            Strand::Reverse => {
                if region.end >= 3 {
                    self.reverse_edges
                        .entry(region.end - 2)
                        .or_insert(Boundary::Start);
                }
                if region.start > 3 {
                    self.reverse_edges
                        .entry(region.start - 3)
                        .or_insert(Boundary::Stop);
                }
            }
            Strand::Unknown => {}
        }
    }

    /// Contig length
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True for a zero-length contig
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameLookup for LocationList {
    fn frame_at(&self, position: usize) -> Frame {
        position
            .checked_sub(1)
            .and_then(|i| self.frames.get(i))
            .copied()
            .unwrap_or(Frame::XX)
    }

    fn boundary_at(&self, position: usize, negative: bool) -> Boundary {
        if let Some(&edge) = self.forward_edges.get(&position) {
            return edge;
        }
        if negative {
            if let Some(&edge) = self.reverse_edges.get(&position) {
                return edge;
            }
        }
        Boundary::Other
    }
}

/// Coding regions of a genome, grouped by contig ID
#[derive(Debug, Clone, Default)]
pub struct CodingMap {
    regions: HashMap<String, Vec<CodingRegion>>,
}

impl CodingMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the CDS rows of a GTF file (plain or gzip)
    pub fn from_gtf_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = CompressedReader::new(DataSource::from_path(path))?;
        let mut map = Self::new();
        let mut skipped = 0usize;
        for record in GtfParser::new(reader) {
            let record = record?;
            match CodingRegion::from_gtf(&record) {
                Some(region) => map.insert(&record.seqname, region),
                None => skipped += 1,
            }
        }
        debug!(
            contigs = map.regions.len(),
            regions = map.region_count(),
            skipped,
            "loaded coding regions"
        );
        Ok(map)
    }

    /// Add one coding region to a contig
    pub fn insert(&mut self, contig_id: &str, region: CodingRegion) {
        self.regions
            .entry(contig_id.to_string())
            .or_default()
            .push(region);
    }

    /// Whether any region was recorded for a contig
    pub fn contains(&self, contig_id: &str) -> bool {
        self.regions.contains_key(contig_id)
    }

    /// Total number of regions
    pub fn region_count(&self) -> usize {
        self.regions.values().map(Vec::len).sum()
    }

    /// Frame table for one contig; contigs without regions are all non-coding
    pub fn location_list(&self, contig_id: &str, length: usize) -> LocationList {
        match self.regions.get(contig_id) {
            Some(regions) => LocationList::new(contig_id, length, regions),
            None => LocationList::non_coding(contig_id, length),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_frames_and_edges() {
        // ATG at 4..6, stop codon at 13..15
        let list = LocationList::new("c", 20, &[CodingRegion::forward(4, 12)]);
        assert_eq!(list.frame_at(3), Frame::F0);
        assert_eq!(list.frame_at(4), Frame::P0);
        assert_eq!(list.frame_at(5), Frame::P1);
        assert_eq!(list.frame_at(6), Frame::P2);
        assert_eq!(list.frame_at(7), Frame::P0);
        assert_eq!(list.frame_at(12), Frame::P2);
        assert_eq!(list.frame_at(13), Frame::F0);
        assert_eq!(list.boundary_at(4, false), Boundary::Start);
        assert_eq!(list.boundary_at(13, false), Boundary::Stop);
        assert_eq!(list.boundary_at(5, false), Boundary::Other);
    }

    #[test]
    fn test_reverse_frames_and_edges() {
        // reverse CDS 7..15: start codon occupies 13..15, stop codon 4..6
        let list = LocationList::new("c", 20, &[CodingRegion::reverse(7, 15)]);
        assert_eq!(list.frame_at(15), Frame::M0);
        assert_eq!(list.frame_at(14), Frame::M1);
        assert_eq!(list.frame_at(13), Frame::M2);
        assert_eq!(list.frame_at(7), Frame::M2);
        assert_eq!(list.boundary_at(13, true), Boundary::Start);
        assert_eq!(list.boundary_at(4, true), Boundary::Stop);
        // hidden when only the forward strand counts
        assert_eq!(list.boundary_at(13, false), Boundary::Other);
        assert_eq!(list.boundary_at(4, false), Boundary::Other);
    }

    #[test]
    fn test_phase_shifts_frame() {
        let region = CodingRegion {
            start: 1,
            end: 10,
            strand: Strand::Forward,
            phase: 1,
        };
        let list = LocationList::new("c", 10, &[region]);
        assert_eq!(list.frame_at(1), Frame::P2);
        assert_eq!(list.frame_at(2), Frame::P0);
    }

    #[test]
    fn test_conflicting_overlap_is_invalid() {
        let regions = [CodingRegion::forward(1, 9), CodingRegion::forward(2, 10)];
        let list = LocationList::new("c", 12, &regions);
        assert_eq!(list.frame_at(1), Frame::P0);
        assert_eq!(list.frame_at(2), Frame::XX);
        assert_eq!(list.frame_at(9), Frame::XX);
        assert_eq!(list.frame_at(10), Frame::P2);
    }

    #[test]
    fn test_agreeing_overlap_is_kept() {
        let regions = [CodingRegion::forward(1, 9), CodingRegion::forward(4, 12)];
        let list = LocationList::new("c", 12, &regions);
        assert_eq!(list.frame_at(5), Frame::P1);
    }

    #[test]
    fn test_off_contig_is_invalid() {
        let list = LocationList::non_coding("c", 5);
        assert_eq!(list.frame_at(0), Frame::XX);
        assert_eq!(list.frame_at(6), Frame::XX);
        assert_eq!(list.frame_at(5), Frame::F0);
    }

    #[test]
    fn test_coding_map_from_gtf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genes.gtf");
        std::fs::write(
            &path,
            "#comment\n\
             ctg1\tsrc\tgene\t4\t15\t.\t+\t.\tgene_id \"g1\";\n\
             ctg1\tsrc\tCDS\t4\t12\t.\t+\t0\tgene_id \"g1\";\n\
             ctg2\tsrc\tCDS\t7\t15\t.\t-\t0\tgene_id \"g2\";\n",
        )
        .unwrap();

        let map = CodingMap::from_gtf_path(&path).unwrap();
        assert_eq!(map.region_count(), 2);
        assert!(map.contains("ctg1"));
        assert!(!map.contains("ctg3"));

        let list = map.location_list("ctg1", 20);
        assert_eq!(list.frame_at(4), Frame::P0);
        let empty = map.location_list("ctg3", 20);
        assert_eq!(empty.frame_at(4), Frame::F0);
    }
}
