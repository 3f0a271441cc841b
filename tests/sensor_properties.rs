//! Property tests for sensor factories, codon filters and classifiers
//!
//! These hold for every encoding and for arbitrary sequence content,
//! including ambiguity codes, lowercase input and positions off the contig.

use contig_sensors::annotation::{CodingRegion, LocationList};
use contig_sensors::classify::{ClassScheme, LocationClassifier};
use contig_sensors::sensor::{CodonFilter, FactoryKind, SensorFactory, SensorValues, SensorWidths};
use proptest::prelude::*;

fn any_kind() -> impl Strategy<Value = FactoryKind> {
    prop::sample::select(FactoryKind::ALL.to_vec())
}

/// Sequences drawn from nucleotides, lowercase, and a few ambiguity codes
fn any_sequence() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"ACGTacgtNRY".to_vec()), 0..120)
}

/// Codon-aligned widths: left a multiple of 3, right one less than a multiple of 3
fn aligned_widths() -> impl Strategy<Value = SensorWidths> {
    (0usize..8, 1usize..8).prop_map(|(l, r)| SensorWidths::new(l * 3, r * 3 - 1))
}

proptest! {
    #[test]
    fn prop_headers_match_values(
        kind in any_kind(),
        widths in aligned_widths(),
        seq in any_sequence(),
        pos in 0usize..150,
    ) {
        let factory = SensorFactory::new(kind, widths).unwrap();
        let sensor = factory.create("c", pos, &seq);
        prop_assert_eq!(factory.headers().len(), sensor.values().len());
        prop_assert_eq!(sensor.values().len(), factory.columns());
    }

    #[test]
    fn prop_column_counts(kind in any_kind(), widths in aligned_widths()) {
        let factory = SensorFactory::new(kind, widths).unwrap();
        let expected = match kind {
            FactoryKind::CodonString | FactoryKind::AminoAcid => widths.full_width() / 3,
            FactoryKind::OneHot => widths.full_width() * 4,
            _ => widths.full_width(),
        };
        prop_assert_eq!(factory.columns(), expected);
    }

    #[test]
    fn prop_clean_sequence_never_suspicious(
        kind in any_kind(),
        widths in aligned_widths(),
        seq in prop::collection::vec(prop::sample::select(b"ACGTacgt".to_vec()), 0..80),
        pos in 0usize..100,
    ) {
        let factory = SensorFactory::new(kind, widths).unwrap();
        prop_assert!(!factory.create("c", pos, &seq).is_suspicious());
    }

    #[test]
    fn prop_off_contig_is_neutral(kind in any_kind(), seq in any_sequence(), extra in 1usize..50) {
        let factory = SensorFactory::new(kind, SensorWidths::new(3, 5)).unwrap();
        // window lies entirely past the end of the sequence
        let sensor = factory.create("c", seq.len() + 4 + extra, &seq);
        prop_assert!(!sensor.is_suspicious());
        match sensor.values() {
            SensorValues::Numeric(v) => prop_assert!(v.iter().all(|x| *x == 0.0)),
            SensorValues::Text(v) => prop_assert!(v.iter().all(|x| x.chars().all(|c| c == '-'))),
        }
    }

    #[test]
    fn prop_scan_yields_clean_in_order(kind in any_kind(), seq in any_sequence(), start in 0usize..30, len in 0usize..80) {
        let factory = SensorFactory::new(kind, SensorWidths::new(3, 2)).unwrap();
        let positions: Vec<usize> = factory.scan("c", &seq, start, len).map(|s| s.position()).collect();
        let expected: Vec<usize> = (start.max(1)..start.max(1) + len)
            .filter(|p| *p <= seq.len())
            .filter(|p| !factory.create("c", *p, &seq).is_suspicious())
            .collect();
        prop_assert_eq!(positions, expected);
    }

    #[test]
    fn prop_filter_matches_codon_text(seq in any_sequence(), pos in 0usize..130) {
        let filter = CodonFilter::starts(false);
        let expected = pos >= 1
            && pos + 2 <= seq.len()
            && ["ATG", "GTG", "TTG"].contains(
                &String::from_utf8_lossy(&seq[pos - 1..pos + 2]).to_ascii_uppercase().as_str(),
            );
        prop_assert_eq!(filter.matches(pos, &seq), expected);
    }

    #[test]
    fn prop_reverse_frames_are_space_when_negative_off(start in 1usize..40, codons in 1usize..10) {
        let end = start + codons * 3 - 1;
        let contig = LocationList::new("c", end + 10, &[CodingRegion::reverse(start, end)]);
        let bound = LocationClassifier::new(ClassScheme::Coding, false).bind(&contig);
        for pos in 1..=end + 10 {
            prop_assert_eq!(bound.class_of(pos), Some("space"));
        }
    }
}

#[test]
fn test_direct_reference_vector() {
    let factory = SensorFactory::new(FactoryKind::Direct, SensorWidths::symmetric(4)).unwrap();
    let sensor = factory.create("3000.contig.1", 1, b"AACGTCCTGAAGTC");
    assert_eq!(
        sensor.values(),
        &SensorValues::Numeric(vec![0.0, 0.0, 0.0, 0.0, -0.3, -0.3, -0.6, 0.6, 0.3])
    );
    assert_eq!(
        factory.headers(),
        vec!["pos.-4", "pos.-3", "pos.-2", "pos.-1", "pos.0", "pos.1", "pos.2", "pos.3", "pos.4"]
    );
}

#[test]
fn test_codon_filter_reference_positions() {
    let seq = b"AATGTGACCTGAATAATAG";
    let filter = CodonFilter::new(["ATG", "AAT"]).unwrap();
    let matched: Vec<usize> = (1..=seq.len()).filter(|p| filter.matches(*p, seq)).collect();
    assert_eq!(matched, vec![1, 2, 12, 15]);
}

#[test]
fn test_default_widths() {
    let factory = SensorFactory::new(FactoryKind::Channel, SensorWidths::default()).unwrap();
    assert_eq!(factory.columns(), 66);
    assert_eq!(factory.headers().first().map(String::as_str), Some("pos.-21"));
    assert_eq!(factory.headers().last().map(String::as_str), Some("pos.44"));
    // 21 and 44 are codon aligned too
    let amino = SensorFactory::new(FactoryKind::AminoAcid, SensorWidths::default()).unwrap();
    assert_eq!(amino.columns(), 22);
}
