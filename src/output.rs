//! Class-balanced table output
//!
//! Training data sampled from a genome is dominated by the most common label
//! (non-coding positions, or `other` for boundary schemes). A
//! [`BalancedWriter`] with a non-zero fuzz factor holds every row in a
//! per-label bucket until [`close`](BalancedWriter::close), then caps each
//! bucket at `ceil(fuzz * smallest_bucket)` rows before writing.
//!
//! With fuzz `0` rows pass straight through.
//!
//! # Example
//!
//! ```
//! use contig_sensors::output::BalancedWriter;
//!
//! let mut out = Vec::new();
//! let mut writer = BalancedWriter::new(&mut out, "class\tpos.0", 1.0, Some(7))?;
//! writer.write("coding", "A")?;
//! writer.write("space", "C")?;
//! writer.write("space", "G")?;
//! let counts = writer.close()?;
//!
//! assert_eq!(counts["space"], (2, 1));
//! assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
//! # Ok::<(), contig_sensors::error::SensorError>(())
//! ```

use crate::error::{Result, SensorError};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::debug;

/// Lifecycle of a [`BalancedWriter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// Taking rows
    Accumulating,
    /// Writing out the reduced buckets
    Flushing,
    /// Done; further writes fail
    Closed,
}

/// Per-label `(written, emitted)` row counts
pub type LabelCounts = BTreeMap<String, (usize, usize)>;

/// Accept `0` (no balancing) or a fuzz factor between `1.0` and `2.0`
pub(crate) fn validate_fuzz(fuzz: f64) -> Result<()> {
    if fuzz == 0.0 || (1.0..=2.0).contains(&fuzz) {
        Ok(())
    } else {
        Err(SensorError::InvalidFuzz(fuzz))
    }
}

/// Tab-delimited writer that optionally balances rows across labels
#[derive(Debug)]
pub struct BalancedWriter<W: Write> {
    writer: W,
    fuzz: f64,
    rng: StdRng,
    buckets: BTreeMap<String, Vec<String>>,
    counts: LabelCounts,
    state: WriterState,
}

impl<W: Write> BalancedWriter<W> {
    /// Create a writer and emit the header line
    ///
    /// `fuzz` must be `0` (no balancing) or between `1.0` and `2.0`. `seed`
    /// fixes the subsample; `None` seeds from system entropy.
    pub fn new(mut writer: W, header: &str, fuzz: f64, seed: Option<u64>) -> Result<Self> {
        validate_fuzz(fuzz)?;
        writeln!(writer, "{}", header)?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            writer,
            fuzz,
            rng,
            buckets: BTreeMap::new(),
            counts: BTreeMap::new(),
            state: WriterState::Accumulating,
        })
    }

    /// True when rows are buffered for balancing
    pub fn is_balanced(&self) -> bool {
        self.fuzz > 0.0
    }

    /// Current lifecycle state
    pub fn state(&self) -> WriterState {
        self.state
    }

    /// Write one row; `row` holds the tab-joined columns after the label
    pub fn write(&mut self, label: &str, row: &str) -> Result<()> {
        if self.state != WriterState::Accumulating {
            return Err(SensorError::WriterClosed);
        }
        self.counts.entry(label.to_string()).or_insert((0, 0)).0 += 1;
        if self.is_balanced() {
            self.buckets
                .entry(label.to_string())
                .or_default()
                .push(row.to_string());
        } else {
            writeln!(self.writer, "{}\t{}", label, row)?;
            self.counts.entry(label.to_string()).or_insert((0, 0)).1 += 1;
        }
        Ok(())
    }

    /// Reduce and write buffered rows, then flush
    ///
    /// Each bucket keeps a uniform random subset of at most
    /// `ceil(fuzz * min_bucket)` rows, written in arrival order; buckets are
    /// written in label order. Returns per-label `(written, emitted)` counts.
    pub fn close(&mut self) -> Result<LabelCounts> {
        if self.state != WriterState::Accumulating {
            return Err(SensorError::WriterClosed);
        }
        self.state = WriterState::Flushing;

        let buckets = std::mem::take(&mut self.buckets);
        if let Some(min) = buckets.values().map(Vec::len).min() {
            let cap = (self.fuzz * min as f64).ceil() as usize;
            debug!(min, cap, labels = buckets.len(), "balancing output");
            for (label, rows) in &buckets {
                let emitted = self.flush_bucket(label, rows, cap)?;
                self.counts.entry(label.clone()).or_insert((0, 0)).1 += emitted;
            }
        }
        self.writer.flush()?;

        self.state = WriterState::Closed;
        Ok(self.counts.clone())
    }

    fn flush_bucket(&mut self, label: &str, rows: &[String], cap: usize) -> Result<usize> {
        if rows.len() <= cap {
            for row in rows {
                writeln!(self.writer, "{}\t{}", label, row)?;
            }
            return Ok(rows.len());
        }
        let mut keep = index::sample(&mut self.rng, rows.len(), cap).into_vec();
        keep.sort_unstable();
        for i in &keep {
            writeln!(self.writer, "{}\t{}", label, rows[*i])?;
        }
        Ok(keep.len())
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body(out: &[u8]) -> Vec<String> {
        String::from_utf8(out.to_vec())
            .unwrap()
            .lines()
            .skip(1)
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_rejects_bad_fuzz() {
        for fuzz in [0.5, 2.5, -1.0, f64::NAN] {
            let result = BalancedWriter::new(Vec::new(), "h", fuzz, None);
            assert!(matches!(result, Err(SensorError::InvalidFuzz(_))));
        }
        for fuzz in [0.0, 1.0, 1.5, 2.0] {
            assert!(BalancedWriter::new(Vec::new(), "h", fuzz, None).is_ok());
        }
    }

    #[test]
    fn test_pass_through() {
        let mut out = Vec::new();
        let mut writer = BalancedWriter::new(&mut out, "class\tv", 0.0, None).unwrap();
        writer.write("b", "1").unwrap();
        writer.write("a", "2").unwrap();
        writer.write("b", "3").unwrap();
        let counts = writer.close().unwrap();
        assert_eq!(counts["a"], (1, 1));
        assert_eq!(counts["b"], (2, 2));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "class\tv\nb\t1\na\t2\nb\t3\n"
        );
    }

    #[test]
    fn test_balanced_order() {
        let mut out = Vec::new();
        let mut writer = BalancedWriter::new(&mut out, "h", 1.0, Some(1)).unwrap();
        for i in 0..10 {
            writer.write("space", &i.to_string()).unwrap();
        }
        writer.write("coding", "x").unwrap();
        writer.write("coding", "y").unwrap();
        let counts = writer.close().unwrap();
        assert_eq!(counts["coding"], (2, 2));
        assert_eq!(counts["space"], (10, 2));

        let rows = body(&out);
        assert_eq!(rows[..2], ["coding\tx".to_string(), "coding\ty".to_string()]);
        // kept rows stay in arrival order
        let kept: Vec<u32> = rows[2..]
            .iter()
            .map(|r| r.split('\t').nth(1).unwrap().parse().unwrap())
            .collect();
        assert_eq!(kept.len(), 2);
        assert!(kept[0] < kept[1]);
    }

    #[test]
    fn test_fuzz_rounds_up() {
        let mut out = Vec::new();
        let mut writer = BalancedWriter::new(&mut out, "h", 1.5, Some(3)).unwrap();
        for _ in 0..3 {
            writer.write("a", "r").unwrap();
        }
        for _ in 0..20 {
            writer.write("b", "r").unwrap();
        }
        let counts = writer.close().unwrap();
        // ceil(1.5 * 3) = 5
        assert_eq!(counts["a"], (3, 3));
        assert_eq!(counts["b"], (20, 5));
    }

    #[test]
    fn test_write_after_close() {
        let mut writer = BalancedWriter::new(Vec::new(), "h", 1.0, None).unwrap();
        writer.write("a", "1").unwrap();
        writer.close().unwrap();
        assert_eq!(writer.state(), WriterState::Closed);
        assert!(matches!(writer.write("a", "2"), Err(SensorError::WriterClosed)));
        assert!(matches!(writer.close(), Err(SensorError::WriterClosed)));
    }

    #[test]
    fn test_empty_close_writes_header_only() {
        let mut out = Vec::new();
        let mut writer = BalancedWriter::new(&mut out, "class", 2.0, None).unwrap();
        assert!(writer.close().unwrap().is_empty());
        assert_eq!(String::from_utf8(out).unwrap(), "class\n");
    }

    #[test]
    fn test_same_seed_same_subset() {
        let run = || {
            let mut out = Vec::new();
            let mut writer = BalancedWriter::new(&mut out, "h", 1.0, Some(42)).unwrap();
            for i in 0..50 {
                writer.write("big", &i.to_string()).unwrap();
            }
            writer.write("small", "s").unwrap();
            writer.close().unwrap();
            out
        };
        assert_eq!(run(), run());
    }

    proptest! {
        #[test]
        fn prop_cap_holds(
            sizes in prop::collection::vec(1usize..60, 1..5),
            fuzz in prop_oneof![Just(1.0), 1.0f64..=2.0],
            seed in any::<u64>(),
        ) {
            let mut out = Vec::new();
            let mut writer = BalancedWriter::new(&mut out, "h", fuzz, Some(seed)).unwrap();
            for (label, size) in sizes.iter().enumerate() {
                for i in 0..*size {
                    writer.write(&format!("L{}", label), &i.to_string()).unwrap();
                }
            }
            let counts = writer.close().unwrap();

            let min = *sizes.iter().min().unwrap();
            let cap = (fuzz * min as f64).ceil() as usize;
            for (label, size) in sizes.iter().enumerate() {
                let (written, emitted) = counts[&format!("L{}", label)];
                prop_assert_eq!(written, *size);
                prop_assert_eq!(emitted, (*size).min(cap));
            }
            let total: usize = counts.values().map(|(_, e)| e).sum();
            prop_assert_eq!(body(&out).len(), total);
        }

        #[test]
        fn prop_zero_fuzz_keeps_everything(labels in prop::collection::vec(0u8..4, 0..100)) {
            let mut out = Vec::new();
            let mut writer = BalancedWriter::new(&mut out, "h", 0.0, None).unwrap();
            for (i, label) in labels.iter().enumerate() {
                writer.write(&label.to_string(), &i.to_string()).unwrap();
            }
            writer.close().unwrap();
            let expected: Vec<String> = labels
                .iter()
                .enumerate()
                .map(|(i, l)| format!("{}\t{}", l, i))
                .collect();
            prop_assert_eq!(body(&out), expected);
        }
    }
}
