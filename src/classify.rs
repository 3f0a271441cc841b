//! Location classifiers: turn the reading-frame context of a position into a
//! training label
//!
//! A [`LocationClassifier`] is configured once with a [`ClassScheme`] and the
//! negative-strand switch, then bound to one contig's [`FrameLookup`]:
//!
//! ```
//! use contig_sensors::annotation::{CodingRegion, LocationList};
//! use contig_sensors::classify::{ClassScheme, LocationClassifier};
//!
//! let contig = LocationList::new("ctg1", 20, &[CodingRegion::forward(4, 12)]);
//! let classifier = LocationClassifier::new(ClassScheme::Coding, false);
//! let bound = classifier.bind(&contig);
//!
//! assert_eq!(bound.class_of(2), Some("space"));
//! assert_eq!(bound.class_of(5), Some("coding"));
//! assert_eq!(bound.class_of(21), None);
//! ```
//!
//! Every scheme returns `None` for positions whose frame is invalid, which
//! callers treat as "skip this position".

use crate::annotation::{Boundary, Frame, FrameLookup};
use crate::error::{Result, SensorError};
use crate::sensor::CodonFilter;
use std::fmt;
use std::str::FromStr;

/// Label vocabulary used to classify a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassScheme {
    /// Reading-frame label: `-3 -2 -1 0 +1 +2 +3`
    Phase,
    /// `coding` or `space`
    Coding,
    /// `start`, `stop` or `other`
    Edge,
    /// `start` or `other`
    Start,
    /// `stop` or `other`
    Stop,
}

impl ClassScheme {
    /// All schemes, in tag order
    pub const ALL: [ClassScheme; 5] = [
        ClassScheme::Phase,
        ClassScheme::Coding,
        ClassScheme::Edge,
        ClassScheme::Start,
        ClassScheme::Stop,
    ];

    /// Configuration tag
    pub fn tag(self) -> &'static str {
        match self {
            ClassScheme::Phase => "phase",
            ClassScheme::Coding => "coding",
            ClassScheme::Edge => "edge",
            ClassScheme::Start => "start",
            ClassScheme::Stop => "stop",
        }
    }

    /// Preset codon filter for the boundary schemes
    ///
    /// Boundary labels only make sense on start or stop codons, so scanning
    /// other positions is wasted work. Phase and Coding have no filter.
    pub fn codon_filter(self, negative: bool) -> Option<CodonFilter> {
        match self {
            ClassScheme::Edge => Some(CodonFilter::edges(negative)),
            ClassScheme::Start => Some(CodonFilter::starts(negative)),
            ClassScheme::Stop => Some(CodonFilter::stops(negative)),
            ClassScheme::Phase | ClassScheme::Coding => None,
        }
    }
}

impl fmt::Display for ClassScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ClassScheme {
    type Err = SensorError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        ClassScheme::ALL
            .into_iter()
            .find(|scheme| scheme.tag() == wanted)
            .ok_or_else(|| SensorError::UnknownScheme(s.to_string()))
    }
}

/// Classification scheme plus the negative-strand switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationClassifier {
    scheme: ClassScheme,
    negative: bool,
}

impl LocationClassifier {
    /// Create a classifier; with `negative` unset, reverse-strand coding
    /// regions are labelled as non-coding
    pub fn new(scheme: ClassScheme, negative: bool) -> Self {
        Self { scheme, negative }
    }

    /// Selected scheme
    pub fn scheme(&self) -> ClassScheme {
        self.scheme
    }

    /// Whether reverse-strand regions are labelled
    pub fn negative(&self) -> bool {
        self.negative
    }

    /// Fold reverse-strand frames into `F0` unless negative labelling is on
    pub fn normalize(&self, frame: Frame) -> Frame {
        if !self.negative && frame.is_negative() {
            Frame::F0
        } else {
            frame
        }
    }

    /// Tie the classifier to one contig
    pub fn bind<'a>(&self, lookup: &'a dyn FrameLookup) -> BoundClassifier<'a> {
        BoundClassifier {
            classifier: *self,
            lookup,
        }
    }
}

/// A classifier bound to one contig's frame lookup
#[derive(Clone, Copy)]
pub struct BoundClassifier<'a> {
    classifier: LocationClassifier,
    lookup: &'a dyn FrameLookup,
}

impl fmt::Debug for BoundClassifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundClassifier")
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}

impl BoundClassifier<'_> {
    /// Underlying classifier configuration
    pub fn classifier(&self) -> LocationClassifier {
        self.classifier
    }

    /// Label of a 1-based position, `None` to skip it
    pub fn class_of(&self, position: usize) -> Option<&'static str> {
        let frame = self.lookup.frame_at(position);
        if !frame.is_valid() {
            return None;
        }
        let negative = self.classifier.negative;
        let label = match self.classifier.scheme {
            ClassScheme::Phase => self.classifier.normalize(frame).as_str(),
            ClassScheme::Coding => {
                if self.classifier.normalize(frame) == Frame::F0 {
                    "space"
                } else {
                    "coding"
                }
            }
            ClassScheme::Edge => self.lookup.boundary_at(position, negative).as_str(),
            ClassScheme::Start => match self.lookup.boundary_at(position, negative) {
                Boundary::Start => Boundary::Start.as_str(),
                _ => Boundary::Other.as_str(),
            },
            ClassScheme::Stop => match self.lookup.boundary_at(position, negative) {
                Boundary::Stop => Boundary::Stop.as_str(),
                _ => Boundary::Other.as_str(),
            },
        };
        Some(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Lookup with one position per frame value and a few boundaries
    struct Fixed {
        frames: Vec<Frame>,
        edges: HashMap<(usize, bool), Boundary>,
    }

    impl FrameLookup for Fixed {
        fn frame_at(&self, position: usize) -> Frame {
            position
                .checked_sub(1)
                .and_then(|i| self.frames.get(i))
                .copied()
                .unwrap_or(Frame::XX)
        }

        fn boundary_at(&self, position: usize, negative: bool) -> Boundary {
            if let Some(&b) = self.edges.get(&(position, false)) {
                return b;
            }
            if negative {
                if let Some(&b) = self.edges.get(&(position, true)) {
                    return b;
                }
            }
            Boundary::Other
        }
    }

    fn fixture() -> Fixed {
        let frames = vec![
            Frame::M0,
            Frame::M1,
            Frame::M2,
            Frame::F0,
            Frame::P0,
            Frame::P1,
            Frame::P2,
            Frame::XX,
        ];
        let mut edges = HashMap::new();
        edges.insert((5, false), Boundary::Start);
        edges.insert((4, false), Boundary::Stop);
        edges.insert((3, true), Boundary::Start);
        edges.insert((8, false), Boundary::Stop);
        Fixed { frames, edges }
    }

    fn labels(scheme: ClassScheme, negative: bool) -> Vec<Option<&'static str>> {
        let lookup = fixture();
        let bound = LocationClassifier::new(scheme, negative).bind(&lookup);
        (1..=8).map(|p| bound.class_of(p)).collect()
    }

    #[test]
    fn test_normalize() {
        let positive = LocationClassifier::new(ClassScheme::Phase, false);
        let negative = LocationClassifier::new(ClassScheme::Phase, true);
        for frame in [Frame::M0, Frame::M1, Frame::M2] {
            assert_eq!(positive.normalize(frame), Frame::F0);
            assert_eq!(negative.normalize(frame), frame);
        }
        for frame in [Frame::F0, Frame::P0, Frame::P1, Frame::P2, Frame::XX] {
            assert_eq!(positive.normalize(frame), frame);
            assert_eq!(negative.normalize(frame), frame);
        }
    }

    #[test]
    fn test_phase_labels() {
        assert_eq!(
            labels(ClassScheme::Phase, false),
            vec![
                Some("0"),
                Some("0"),
                Some("0"),
                Some("0"),
                Some("+1"),
                Some("+2"),
                Some("+3"),
                None
            ]
        );
        assert_eq!(
            labels(ClassScheme::Phase, true)[..3],
            [Some("-1"), Some("-2"), Some("-3")]
        );
    }

    #[test]
    fn test_coding_labels() {
        assert_eq!(
            labels(ClassScheme::Coding, false),
            vec![
                Some("space"),
                Some("space"),
                Some("space"),
                Some("space"),
                Some("coding"),
                Some("coding"),
                Some("coding"),
                None
            ]
        );
        assert_eq!(labels(ClassScheme::Coding, true)[0], Some("coding"));
    }

    #[test]
    fn test_edge_labels() {
        let positive = labels(ClassScheme::Edge, false);
        assert_eq!(positive[2], Some("other"));
        assert_eq!(positive[3], Some("stop"));
        assert_eq!(positive[4], Some("start"));
        // boundary on an invalid frame is still skipped
        assert_eq!(positive[7], None);

        let negative = labels(ClassScheme::Edge, true);
        assert_eq!(negative[2], Some("start"));
    }

    #[test]
    fn test_start_and_stop_labels() {
        let start = labels(ClassScheme::Start, true);
        assert_eq!(start[2], Some("start"));
        assert_eq!(start[3], Some("other"));
        assert_eq!(start[4], Some("start"));

        let stop = labels(ClassScheme::Stop, false);
        assert_eq!(stop[3], Some("stop"));
        assert_eq!(stop[4], Some("other"));
        assert_eq!(stop[7], None);
    }

    #[test]
    fn test_off_contig_is_skipped() {
        let lookup = fixture();
        for scheme in ClassScheme::ALL {
            let bound = LocationClassifier::new(scheme, true).bind(&lookup);
            assert_eq!(bound.class_of(0), None);
            assert_eq!(bound.class_of(100), None);
        }
    }

    #[test]
    fn test_scheme_tags() {
        for scheme in ClassScheme::ALL {
            assert_eq!(scheme.to_string().parse::<ClassScheme>().unwrap(), scheme);
        }
        assert_eq!("EDGE".parse::<ClassScheme>().unwrap(), ClassScheme::Edge);
        assert!(matches!(
            "frame".parse::<ClassScheme>(),
            Err(SensorError::UnknownScheme(_))
        ));
    }

    #[test]
    fn test_codon_filters() {
        assert!(ClassScheme::Phase.codon_filter(true).is_none());
        assert!(ClassScheme::Coding.codon_filter(false).is_none());
        assert_eq!(ClassScheme::Edge.codon_filter(false).map(|f| f.len()), Some(6));
        assert_eq!(ClassScheme::Start.codon_filter(true).map(|f| f.len()), Some(6));
        assert_eq!(ClassScheme::Stop.codon_filter(false).map(|f| f.len()), Some(3));
    }
}
