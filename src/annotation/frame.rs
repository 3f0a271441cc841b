//! Reading-frame and coding-boundary values

use std::fmt;

/// Reading-frame state of a single base
///
/// `P0..P2` are the first, second and third base of a forward-strand codon,
/// `M0..M2` the same for a reverse-strand codon (counted in transcription
/// direction), `F0` is non-coding and `XX` means the frame is unknown or
/// contradictory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    /// Reverse strand, first codon base
    M0,
    /// Reverse strand, second codon base
    M1,
    /// Reverse strand, third codon base
    M2,
    /// Not coding
    F0,
    /// Forward strand, first codon base
    P0,
    /// Forward strand, second codon base
    P1,
    /// Forward strand, third codon base
    P2,
    /// Invalid or unknown
    XX,
}

impl Frame {
    /// Forward-strand frame for a codon phase (taken mod 3)
    pub fn plus(phase: usize) -> Self {
        [Frame::P0, Frame::P1, Frame::P2][phase % 3]
    }

    /// Reverse-strand frame for a codon phase (taken mod 3)
    pub fn minus(phase: usize) -> Self {
        [Frame::M0, Frame::M1, Frame::M2][phase % 3]
    }

    /// True for reverse-strand coding frames
    pub fn is_negative(self) -> bool {
        matches!(self, Frame::M0 | Frame::M1 | Frame::M2)
    }

    /// True for forward- or reverse-strand coding frames
    pub fn is_coding(self) -> bool {
        !matches!(self, Frame::F0 | Frame::XX)
    }

    /// True unless this is the invalid marker
    pub fn is_valid(self) -> bool {
        self != Frame::XX
    }

    /// Label text: `-1 -2 -3 0 +1 +2 +3`, `X` for invalid
    pub fn as_str(self) -> &'static str {
        match self {
            Frame::M0 => "-1",
            Frame::M1 => "-2",
            Frame::M2 => "-3",
            Frame::F0 => "0",
            Frame::P0 => "+1",
            Frame::P1 => "+2",
            Frame::P2 => "+3",
            Frame::XX => "X",
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coding-region boundary classification of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// First base of a start codon
    Start,
    /// First base of the stop codon following a coding region
    Stop,
    /// Anything else
    Other,
}

impl Boundary {
    /// Label text
    pub fn as_str(self) -> &'static str {
        match self {
            Boundary::Start => "start",
            Boundary::Stop => "stop",
            Boundary::Other => "other",
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-contig source of frames and boundaries
///
/// Positions are 1-based. Implementations return [`Frame::XX`] for positions
/// they know nothing about, including positions off the contig.
pub trait FrameLookup {
    /// Reading frame at a position
    fn frame_at(&self, position: usize) -> Frame;

    /// Boundary at a position; reverse-strand boundaries are only reported
    /// when `negative` is set
    fn boundary_at(&self, position: usize, negative: bool) -> Boundary;
}
