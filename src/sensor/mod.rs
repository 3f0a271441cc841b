//! Sensor factories: encode the DNA window around a position as a feature row
//!
//! A *sensor* is the encoded context of one contig position: `left` columns
//! upstream, the position itself, and `right` columns downstream. The six
//! encodings form a closed set selected by [`FactoryKind`]:
//!
//! | Tag | Column value | Stride |
//! |-----|--------------|--------|
//! | `direct` | A=-0.3, C=-0.6, G=0.6, T=0.3 | 1 |
//! | `channel` | the nucleotide letter itself | 1 |
//! | `one-hot` | four 0/1 columns per base | 1 |
//! | `codon-numeric` | `0.d1d2d3` over the codon starting at the column | 1 |
//! | `codon-string` | lowercase codon | 3 |
//! | `amino-acid` | translated amino acid (genetic code 11) | 3 |
//!
//! # Example
//!
//! ```
//! use contig_sensors::sensor::{FactoryKind, SensorFactory, SensorWidths};
//!
//! let widths = SensorWidths::new(4, 4);
//! let factory = SensorFactory::new(FactoryKind::Direct, widths)?;
//! let sensor = factory.create("ctg1", 1, b"AACGTCCTGAAGTC");
//!
//! assert_eq!(sensor.meta(), "ctg1;1");
//! assert_eq!(sensor.values().to_string(), "0.0\t0.0\t0.0\t0.0\t-0.3\t-0.3\t-0.6\t0.6\t0.3");
//! # Ok::<(), contig_sensors::error::SensorError>(())
//! ```

mod encoding;
pub mod filter;
pub mod genetic_code;

pub use filter::CodonFilter;

use crate::error::{Result, SensorError};
use crate::operations::codon_at;
use std::fmt;
use std::str::FromStr;

/// Default number of columns upstream of the target position
pub const DEFAULT_LEFT_WIDTH: usize = 21;

/// Default number of columns downstream of the target position
pub const DEFAULT_RIGHT_WIDTH: usize = 44;

/// Sensor encoding selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactoryKind {
    /// One float per base
    Direct,
    /// One letter per base
    Channel,
    /// One float per base, derived from the codon starting there
    CodonNumeric,
    /// One lowercase codon per 3 bases
    CodonString,
    /// Four 0/1 floats per base
    OneHot,
    /// One amino acid per 3 bases
    AminoAcid,
}

impl FactoryKind {
    /// All kinds, in tag order
    pub const ALL: [FactoryKind; 6] = [
        FactoryKind::Direct,
        FactoryKind::Channel,
        FactoryKind::CodonNumeric,
        FactoryKind::CodonString,
        FactoryKind::OneHot,
        FactoryKind::AminoAcid,
    ];

    /// Configuration tag
    pub fn tag(self) -> &'static str {
        match self {
            FactoryKind::Direct => "direct",
            FactoryKind::Channel => "channel",
            FactoryKind::CodonNumeric => "codon-numeric",
            FactoryKind::CodonString => "codon-string",
            FactoryKind::OneHot => "one-hot",
            FactoryKind::AminoAcid => "amino-acid",
        }
    }

    /// Distance in bases between consecutive columns
    pub fn stride(self) -> usize {
        match self {
            FactoryKind::CodonString | FactoryKind::AminoAcid => 3,
            _ => 1,
        }
    }

    /// Output columns per window position
    pub fn channels(self) -> usize {
        match self {
            FactoryKind::OneHot => 4,
            _ => 1,
        }
    }

    /// True when the window must line up with codon boundaries
    pub fn is_codon_aligned(self) -> bool {
        self.stride() == 3
    }
}

impl fmt::Display for FactoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FactoryKind {
    type Err = SensorError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        FactoryKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == wanted)
            .ok_or_else(|| SensorError::UnknownFactory(s.to_string()))
    }
}

/// Window widths around the target position, in output positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorWidths {
    /// Positions upstream of the target
    pub left: usize,
    /// Positions downstream of the target
    pub right: usize,
}

impl SensorWidths {
    /// Create a width pair
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    /// Symmetric widths (the classic "half-width")
    pub fn symmetric(half_width: usize) -> Self {
        Self::new(half_width, half_width)
    }

    /// `left + right + 1`
    pub fn full_width(&self) -> usize {
        self.left + self.right + 1
    }

    /// Check the widths against a factory kind
    ///
    /// Codon-aligned kinds need `left % 3 == 0` and `right % 3 == 2` so the
    /// target position starts a codon and the window ends on a codon boundary.
    pub fn validate(&self, kind: FactoryKind) -> Result<()> {
        if kind.is_codon_aligned() && (self.left % 3 != 0 || self.right % 3 != 2) {
            return Err(SensorError::InvalidWidths {
                left: self.left,
                right: self.right,
                kind: kind.tag().to_string(),
                reason: "left must be a multiple of 3 and right one less than a multiple of 3"
                    .to_string(),
            });
        }
        Ok(())
    }
}

impl Default for SensorWidths {
    fn default() -> Self {
        Self::new(DEFAULT_LEFT_WIDTH, DEFAULT_RIGHT_WIDTH)
    }
}

/// Encoded column values of one sensor
#[derive(Debug, Clone, PartialEq)]
pub enum SensorValues {
    /// Floating-point columns (direct, one-hot, codon-numeric)
    Numeric(Vec<f64>),
    /// Text columns (channel, codon-string, amino-acid)
    Text(Vec<String>),
}

impl SensorValues {
    /// Number of columns
    pub fn len(&self) -> usize {
        match self {
            SensorValues::Numeric(v) => v.len(),
            SensorValues::Text(v) => v.len(),
        }
    }

    /// True if there are no columns
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric columns, if this is a numeric sensor
    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            SensorValues::Numeric(v) => Some(v),
            SensorValues::Text(_) => None,
        }
    }

    /// Text columns, if this is a text sensor
    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            SensorValues::Text(v) => Some(v),
            SensorValues::Numeric(_) => None,
        }
    }
}

/// Tab-joined columns; whole numbers keep a `.0` so every numeric column
/// reads as a float
impl fmt::Display for SensorValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorValues::Numeric(values) => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\t")?;
                    }
                    if v.fract() == 0.0 {
                        write!(f, "{:.1}", v)?;
                    } else {
                        write!(f, "{}", v)?;
                    }
                }
            }
            SensorValues::Text(values) => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\t")?;
                    }
                    f.write_str(v)?;
                }
            }
        }
        Ok(())
    }
}

/// Encoded context of one contig position
#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    source_id: String,
    position: usize,
    codon: String,
    values: SensorValues,
    suspicious: bool,
}

impl Sensor {
    /// ID of the source contig or sequence
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// 1-based position of the target base
    pub fn position(&self) -> usize {
        self.position
    }

    /// Up to three bases starting at the target position, as written in the input
    pub fn codon(&self) -> &str {
        &self.codon
    }

    /// Encoded columns
    pub fn values(&self) -> &SensorValues {
        &self.values
    }

    /// True if the window contained a non-standard nucleotide code
    pub fn is_suspicious(&self) -> bool {
        self.suspicious
    }

    /// `<source_id>;<position>` location string
    pub fn meta(&self) -> String {
        format!("{};{}", self.source_id, self.position)
    }
}

/// Encodes sensors of one kind with fixed widths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorFactory {
    kind: FactoryKind,
    widths: SensorWidths,
}

impl SensorFactory {
    /// Create a factory, rejecting widths the kind cannot align
    pub fn new(kind: FactoryKind, widths: SensorWidths) -> Result<Self> {
        widths.validate(kind)?;
        Ok(Self { kind, widths })
    }

    /// Encoding kind
    pub fn kind(&self) -> FactoryKind {
        self.kind
    }

    /// Window widths
    pub fn widths(&self) -> SensorWidths {
        self.widths
    }

    /// Window positions sampled per sensor (`full_width / stride`)
    pub fn positions(&self) -> usize {
        self.widths.full_width() / self.kind.stride()
    }

    /// Number of output columns per sensor
    pub fn columns(&self) -> usize {
        self.positions() * self.kind.channels()
    }

    /// Column headers: `pos.<offset>`, or `pos.<offset><base>` for one-hot
    pub fn headers(&self) -> Vec<String> {
        let stride = self.kind.stride() as isize;
        let left = self.widths.left as isize;
        let offsets = (0..self.positions() as isize).map(|i| i * stride - left);
        match self.kind {
            FactoryKind::OneHot => offsets
                .flat_map(|o| ["A", "C", "G", "T"].map(|b| format!("pos.{}{}", o, b)))
                .collect(),
            _ => offsets.map(|o| format!("pos.{}", o)).collect(),
        }
    }

    /// Encode the window around a 1-based position
    ///
    /// Any position is accepted; window offsets outside the sequence produce
    /// the neutral off-contig symbol.
    pub fn create(&self, id: &str, position: usize, sequence: &[u8]) -> Sensor {
        let offset = position as isize - 1 - self.widths.left as isize;
        let positions = self.positions();
        let stride = self.kind.stride();
        let (values, suspicious) = match self.kind {
            FactoryKind::Direct => encoding::direct(sequence, offset, positions),
            FactoryKind::Channel => encoding::channel(sequence, offset, positions),
            FactoryKind::OneHot => encoding::one_hot(sequence, offset, positions),
            FactoryKind::CodonNumeric => encoding::codon_numeric(sequence, offset, positions),
            FactoryKind::CodonString => {
                encoding::codon_string(sequence, offset, positions, stride)
            }
            FactoryKind::AminoAcid => encoding::amino_acid(sequence, offset, positions, stride),
        };
        Sensor {
            source_id: id.to_string(),
            position,
            codon: String::from_utf8_lossy(codon_at(sequence, position)).into_owned(),
            values,
            suspicious,
        }
    }

    /// Lazily encode `len` positions starting at `start` (1-based), skipping
    /// suspicious sensors
    ///
    /// The range is clipped to the sequence. The returned iterator can be
    /// cloned to restart the scan from its current point.
    pub fn scan<'a>(
        &'a self,
        id: &'a str,
        sequence: &'a [u8],
        start: usize,
        len: usize,
    ) -> SensorScan<'a> {
        let start = start.max(1);
        let end = start.saturating_add(len).min(sequence.len() + 1);
        SensorScan {
            factory: self,
            id,
            sequence,
            next: start,
            end,
        }
    }
}

/// Iterator over the non-suspicious sensors of a position range
#[derive(Debug, Clone)]
pub struct SensorScan<'a> {
    factory: &'a SensorFactory,
    id: &'a str,
    sequence: &'a [u8],
    next: usize,
    end: usize,
}

impl Iterator for SensorScan<'_> {
    type Item = Sensor;

    fn next(&mut self) -> Option<Sensor> {
        while self.next < self.end {
            let sensor = self.factory.create(self.id, self.next, self.sequence);
            self.next += 1;
            if !sensor.is_suspicious() {
                return Some(sensor);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.end.saturating_sub(self.next)))
    }
}

impl std::iter::FusedIterator for SensorScan<'_> {}
