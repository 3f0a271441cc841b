//! Chunked random sampling of labelled sensors along a contig
//!
//! Densely scanning a genome produces heavily correlated neighbouring
//! examples. The sampler instead splits the contig into chunks of
//! `chunk_size` positions, picks a random start inside each chunk, and
//! collects at most `run_length` consecutive accepted positions from there.
//! The next chunk begins at the later of the chunk end and the first
//! position the run did not scan, so the chunks tile the contig without
//! gaps or overlap.

use crate::classify::BoundClassifier;
use crate::error::{Result, SensorError};
use crate::sensor::{CodonFilter, Sensor, SensorFactory};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use tracing::trace;

/// Default positions per chunk
pub const DEFAULT_CHUNK_SIZE: usize = 50_000;

/// Default maximum accepted positions per run
pub const DEFAULT_RUN_LENGTH: usize = 200;

/// Sampling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Positions per chunk; one run starts in each chunk
    pub chunk_size: usize,
    /// Maximum accepted positions per run
    pub run_length: usize,
    /// RNG seed; `None` seeds from system entropy
    pub seed: Option<u64>,
}

impl SamplerConfig {
    /// Reject zero chunk sizes and run lengths
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(SensorError::InvalidSampler(
                "chunk size must be at least 1".to_string(),
            ));
        }
        if self.run_length == 0 {
            return Err(SensorError::InvalidSampler(
                "run length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            run_length: DEFAULT_RUN_LENGTH,
            seed: None,
        }
    }
}

/// Counters collected while sampling
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleStats {
    /// Runs started (one per chunk)
    pub runs: usize,
    /// Positions visited
    pub scanned: usize,
    /// Positions emitted
    pub accepted: usize,
    /// Positions rejected by the codon filter
    pub filtered: usize,
    /// Positions whose window held a non-standard nucleotide
    pub suspicious: usize,
    /// Positions with no valid label
    pub unlabelled: usize,
    /// Emitted positions per label
    pub labels: BTreeMap<&'static str, usize>,
}

impl SampleStats {
    /// Add another set of counters to this one
    pub fn merge(&mut self, other: &SampleStats) {
        self.runs += other.runs;
        self.scanned += other.scanned;
        self.accepted += other.accepted;
        self.filtered += other.filtered;
        self.suspicious += other.suspicious;
        self.unlabelled += other.unlabelled;
        for (label, count) in &other.labels {
            *self.labels.entry(label).or_insert(0) += count;
        }
    }
}

/// Where one sampling run sat on its contig (1-based positions)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSpan {
    /// First position of the chunk
    pub chunk_start: usize,
    /// One past the last position the run may start at
    pub chunk_end: usize,
    /// Position the run started scanning from
    pub run_start: usize,
    /// First position of the next chunk
    pub next: usize,
}

/// Randomized chunk-by-chunk traversal of contigs
///
/// One RNG stream is shared by every contig sampled, so a fixed seed
/// reproduces the full output of a run.
#[derive(Debug, Clone)]
pub struct ChunkedSampler {
    config: SamplerConfig,
    rng: StdRng,
}

impl ChunkedSampler {
    /// Create a sampler from a validated configuration
    pub fn new(config: SamplerConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    /// Sampling parameters
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Sample one contig, passing each accepted `(label, sensor)` to `emit`
    ///
    /// Positions are skipped when the filter rejects their codon, when the
    /// sensor is suspicious, or when the classifier has no label for them.
    /// An error from `emit` stops sampling and is returned unchanged.
    pub fn sample_contig<F>(
        &mut self,
        contig_id: &str,
        sequence: &[u8],
        factory: &SensorFactory,
        filter: Option<&CodonFilter>,
        classifier: &BoundClassifier<'_>,
        emit: F,
    ) -> Result<SampleStats>
    where
        F: FnMut(&'static str, &Sensor) -> Result<()>,
    {
        self.sample_runs(contig_id, sequence, factory, filter, classifier, emit, |_| {})
    }

    /// Like [`sample_contig`](Self::sample_contig), also reporting each
    /// run's [`RunSpan`] to `on_run` once the run ends
    #[allow(clippy::too_many_arguments)]
    pub fn sample_runs<F, R>(
        &mut self,
        contig_id: &str,
        sequence: &[u8],
        factory: &SensorFactory,
        filter: Option<&CodonFilter>,
        classifier: &BoundClassifier<'_>,
        mut emit: F,
        mut on_run: R,
    ) -> Result<SampleStats>
    where
        F: FnMut(&'static str, &Sensor) -> Result<()>,
        R: FnMut(RunSpan),
    {
        let length = sequence.len();
        let mut stats = SampleStats::default();
        let mut pos = 1;

        while pos <= length {
            let end = pos.saturating_add(self.config.chunk_size).min(length + 1);
            let mut start = self.rng.gen_range(pos..end);
            let run_start = start;
            let mut run = 0;
            stats.runs += 1;

            while start <= length && run < self.config.run_length {
                let position = start;
                start += 1;
                stats.scanned += 1;

                if let Some(filter) = filter {
                    if !filter.matches(position, sequence) {
                        stats.filtered += 1;
                        continue;
                    }
                }
                let sensor = factory.create(contig_id, position, sequence);
                if sensor.is_suspicious() {
                    stats.suspicious += 1;
                    continue;
                }
                let Some(label) = classifier.class_of(position) else {
                    stats.unlabelled += 1;
                    continue;
                };

                emit(label, &sensor)?;
                run += 1;
                stats.accepted += 1;
                *stats.labels.entry(label).or_insert(0) += 1;
            }

            let span = RunSpan {
                chunk_start: pos,
                chunk_end: end,
                run_start,
                next: start.max(end),
            };
            trace!(
                contig = contig_id,
                chunk_start = span.chunk_start,
                run_start,
                run_end = start - 1,
                accepted = run,
                "sampled run"
            );
            on_run(span);
            pos = span.next;
        }

        Ok(stats)
    }
}
